//! # Scroll views
//!
//! A scroll view shows a window of a larger content rect. The caller owns
//! the scroll position and passes it in every cycle; the view hands back
//! the (possibly adjusted) position from [`BeginScrollView`]:
//!
//! ```rust
//! use recall_core::*;
//! use recall_ui::*;
//!
//! let mut ui = Ui::headless();
//! let mut scroll = Vec2::ZERO;
//!
//! ui.begin_cycle(Event::repaint(Vec2::ZERO));
//! {
//!     let mut view = BeginScrollView(
//!         &mut ui,
//!         Rect::new(0.0, 0.0, 200.0, 100.0),
//!         scroll,
//!         Rect::new(0.0, 0.0, 180.0, 1000.0),
//!     );
//!     scroll = view.scroll_position();
//!     for i in 0..50 {
//!         Label(&mut view, Rect::new(0.0, i as f64 * 20.0, 180.0, 20.0), format!("Row {i}"));
//!     }
//! } // the scope guard ends the view: clip popped, wheel/touch handled
//! ui.end_cycle().unwrap();
//! ```
//!
//! Changes the view makes on its own while ending (wheel, touch drag,
//! inertia, `ScrollTo`) are stored in its [`ScrollViewRecord`] and handed
//! back by the next `BeginScrollView` of the same id.
//!
//! Inertia is the only time-driven mutation: after a touch drag is released
//! the velocity decays on every repaint, and [`Ui::needs_repaint`] stays
//! raised until it reaches zero.

use std::ops::{Deref, DerefMut};

use web_time::Instant;

use recall_core::*;

use crate::Ui;
use crate::context::ScopeKind;
use crate::scrollbar::{HorizontalScrollbar, VerticalScrollbar};

/// Per-view state, created on the first occurrence of the view's id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollViewRecord {
    /// Container rect in the parent's local space.
    pub position: Rect,
    pub scroll_position: Vec2,
    pub velocity: Vec2,
    pub view_rect: Rect,
    /// The part of `view_rect` not covered by scrollbars, at the view origin.
    pub visible_rect: Rect,
    /// Time of the last repaint; inertia integrates over the gap between
    /// repaints only.
    pub last_repaint: Option<Instant>,
    /// Time of the last touch sample, for the drag velocity.
    pub last_touch: Option<Instant>,
    pub touch_dragging: bool,
    pub touch_anchor: Vec2,
    pub touch_anchor_scroll: Vec2,
    /// `scroll_position` was changed while ending; the next begin returns it.
    pub apply: bool,
}

impl ScrollViewRecord {
    pub fn max_scroll(&self) -> Vec2 {
        Vec2::new(
            (self.view_rect.w - self.visible_rect.w).max(0.0),
            (self.view_rect.h - self.visible_rect.h).max(0.0),
        )
    }

    pub fn can_scroll_x(&self) -> bool {
        self.view_rect.w > self.visible_rect.w
    }

    pub fn can_scroll_y(&self) -> bool {
        self.view_rect.h > self.visible_rect.h
    }

    /// Offset that would bring `target` (content coordinates) into view.
    /// Targets larger than the visible area are centred.
    pub fn scroll_needed(&self, target: Rect) -> Vec2 {
        let visible = Rect::new(
            self.visible_rect.x + self.scroll_position.x,
            self.visible_rect.y + self.scroll_position.y,
            self.visible_rect.w,
            self.visible_rect.h,
        );
        let mut pos = target;
        let extra = pos.w - visible.w;
        if extra > 0.0 {
            pos.w -= extra;
            pos.x += extra * 0.5;
        }
        let extra = pos.h - visible.h;
        if extra > 0.0 {
            pos.h -= extra;
            pos.y += extra * 0.5;
        }

        let mut v = Vec2::ZERO;
        if pos.x_max() > visible.x_max() {
            v.x += pos.x_max() - visible.x_max();
        } else if pos.x < visible.x {
            v.x -= visible.x - pos.x;
        }
        if pos.y_max() > visible.y_max() {
            v.y += pos.y_max() - visible.y_max();
        } else if pos.y < visible.y {
            v.y -= visible.y - pos.y;
        }

        let view_w = self.view_rect.w.max(self.visible_rect.w);
        let view_h = self.view_rect.h.max(self.visible_rect.h);
        let s = self.scroll_position;
        v.x = v.x.clamp(
            self.view_rect.x - s.x,
            (self.view_rect.x + view_w - self.visible_rect.w - s.x).max(self.view_rect.x - s.x),
        );
        v.y = v.y.clamp(
            self.view_rect.y - s.y,
            (self.view_rect.y + view_h - self.visible_rect.h - s.y).max(self.view_rect.y - s.y),
        );
        v
    }

    /// Move at most `max_delta` toward showing `target`. False when it is
    /// already visible.
    pub fn scroll_towards(&mut self, target: Rect, max_delta: f64) -> bool {
        let mut v = self.scroll_needed(target);
        if v.x * v.x + v.y * v.y < 0.0001 {
            return false;
        }
        if max_delta == 0.0 {
            return true;
        }
        let len = v.length();
        if len > max_delta {
            v = v * (max_delta / len);
        }
        self.scroll_position += v;
        self.apply = true;
        true
    }

    pub fn scroll_to(&mut self, target: Rect) {
        self.scroll_towards(target, f64::INFINITY);
    }
}

/// One inertia step of `dt` seconds: decay to 10% per second, subtract a
/// small counter-velocity, stop below `0.1 / dt`, then integrate. The
/// position is kept in `[0, max]` and an axis that hits a bound stops.
///
/// Returns whether the position moved.
pub fn step_inertia(position: &mut Vec2, velocity: &mut Vec2, dt: f64, max: Vec2) -> bool {
    if dt <= 0.0 {
        return false;
    }
    let mut moved = false;
    for axis in 0..2 {
        let v = velocity.axis_mut(axis);
        *v *= 0.1_f64.powf(dt);
        let counter = 0.1 / dt;
        if v.abs() < counter {
            *v = 0.0;
            continue;
        }
        *v -= counter * v.signum();
        let step = *v * dt;
        let p = position.axis_mut(axis);
        let limit = max.axis(axis);
        let next = *p + step;
        if next <= 0.0 || next >= limit {
            *p = next.clamp(0.0, limit.max(0.0));
            *velocity.axis_mut(axis) = 0.0;
        } else {
            *p = next;
        }
        moved = true;
    }
    moved
}

#[derive(Clone, Debug)]
pub struct ScrollViewOptions {
    pub always_show_horizontal: bool,
    pub always_show_vertical: bool,
    /// Let the view consume wheel and touch-drag events over it.
    pub handle_scroll_wheel: bool,
    /// Draw `Skin::scroll_view` behind the content.
    pub background: bool,
}

impl Default for ScrollViewOptions {
    fn default() -> Self {
        Self {
            always_show_horizontal: false,
            always_show_vertical: false,
            handle_scroll_wheel: true,
            background: true,
        }
    }
}

/// Open scroll view; derefs to the [`Ui`] so widgets can be declared inside.
/// Dropping it ends the view.
pub struct ScrollViewScope<'a> {
    ui: &'a mut Ui,
    id: ControlId,
    scroll: Vec2,
    handle_scroll_wheel: bool,
}

impl ScrollViewScope<'_> {
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// The scroll position to store for the next cycle.
    pub fn scroll_position(&self) -> Vec2 {
        self.scroll
    }

    pub fn set_handle_scroll_wheel(&mut self, handle: bool) {
        self.handle_scroll_wheel = handle;
    }

    pub fn end(self) {}
}

impl Deref for ScrollViewScope<'_> {
    type Target = Ui;
    fn deref(&self) -> &Ui {
        self.ui
    }
}

impl DerefMut for ScrollViewScope<'_> {
    fn deref_mut(&mut self) -> &mut Ui {
        self.ui
    }
}

impl Drop for ScrollViewScope<'_> {
    fn drop(&mut self) {
        end_scroll_view(self.ui, self.handle_scroll_wheel);
    }
}

pub fn BeginScrollView(ui: &mut Ui, rect: Rect, scroll: Vec2, view_rect: Rect) -> ScrollViewScope<'_> {
    BeginScrollViewWith(ui, rect, scroll, view_rect, ScrollViewOptions::default())
}

pub fn BeginScrollViewWith(
    ui: &mut Ui,
    rect: Rect,
    scroll: Vec2,
    view_rect: Rect,
    options: ScrollViewOptions,
) -> ScrollViewScope<'_> {
    let (id, scroll) = begin_scroll_view(ui, rect, scroll, view_rect, &options);
    ScrollViewScope {
        ui,
        id,
        scroll,
        handle_scroll_wheel: options.handle_scroll_wheel,
    }
}

/// Closure form: `scroll` is updated in place.
pub fn ScrollView(
    ui: &mut Ui,
    rect: Rect,
    scroll: &mut Vec2,
    view_rect: Rect,
    content: impl FnOnce(&mut Ui),
) {
    let mut view = BeginScrollView(ui, rect, *scroll, view_rect);
    *scroll = view.scroll_position();
    content(&mut *view);
}

fn begin_scroll_view(
    ui: &mut Ui,
    rect: Rect,
    mut scroll: Vec2,
    view_rect: Rect,
    options: &ScrollViewOptions,
) -> (ControlId, Vec2) {
    if ui.event().kind == EventKind::DragUpdated && ui.hit(rect) {
        let y = ui.pointer().y;
        let margin = ui.config.drag_autoscroll_margin;
        let step = ui.config.drag_autoscroll_step;
        if (y - rect.y).abs() < margin {
            scroll.y -= step;
            ui.request_repaint();
        } else if (y - rect.y_max()).abs() < margin {
            scroll.y += step;
            ui.request_repaint();
        }
    }

    let id = ui.control_id(KindSeed::SCROLL_VIEW, FocusType::Passive, Some(rect));
    {
        let record = ui.states_mut().get_or_insert_with(id, ScrollViewRecord::default);
        if record.apply {
            scroll = record.scroll_position;
            record.apply = false;
        }
    }
    ui.scroll_views.push(id);

    let hbar = ui.skin.horizontal_scrollbar.clone();
    let vbar = ui.skin.vertical_scrollbar.clone();
    let mut clip = rect;
    let mut needs_h = options.always_show_horizontal;
    let mut needs_v = options.always_show_vertical;
    if needs_h || view_rect.w > clip.w {
        clip.h -= hbar.fixed_height + hbar.margin.top;
        needs_h = true;
    }
    if needs_v || view_rect.h > clip.h {
        clip.w -= vbar.fixed_width + vbar.margin.left;
        needs_v = true;
        if !needs_h && view_rect.w > clip.w {
            clip.h -= hbar.fixed_height + hbar.margin.top;
            needs_h = true;
        }
    }

    if options.background {
        let style = ui.skin.scroll_view.clone();
        let state = DrawState {
            selected: needs_h && needs_v,
            ..ui.draw_state(id, ui.hit(rect))
        };
        ui.draw(&style, rect, &Content::none(), state);
    }

    if needs_h {
        let bar = Rect::new(rect.x, rect.y_max() - hbar.fixed_height, clip.w, hbar.fixed_height);
        scroll.x = HorizontalScrollbar(ui, bar, scroll.x, clip.w.min(view_rect.w), 0.0, view_rect.w);
    } else {
        allocate_hidden_scrollbar_ids(ui);
        scroll.x = scroll.x.clamp(0.0, (view_rect.w - rect.w).max(0.0));
    }
    if needs_v {
        let bar = Rect::new(clip.x_max() + vbar.margin.left, clip.y, vbar.fixed_width, clip.h);
        scroll.y = VerticalScrollbar(ui, bar, scroll.y, clip.h.min(view_rect.h), 0.0, view_rect.h);
    } else {
        allocate_hidden_scrollbar_ids(ui);
        scroll.y = scroll.y.clamp(0.0, (view_rect.h - rect.h).max(0.0));
    }

    {
        let record = ui.states_mut().get_or_insert_with(id, ScrollViewRecord::default);
        record.position = rect;
        record.scroll_position = scroll;
        record.view_rect = view_rect;
        record.visible_rect = Rect::new(view_rect.x, view_rect.y, clip.w, clip.h);
    }

    let offset = Vec2::new(
        (-scroll.x - view_rect.x).round(),
        (-scroll.y - view_rect.y).round(),
    );
    log::trace!("scroll view {:?} begin at {:?}", id, scroll);
    ui.push_scope(ScopeKind::ScrollView, clip, offset, Vec2::ZERO, false);
    (id, scroll)
}

/// A hidden scrollbar still takes its three ids so later controls keep theirs.
fn allocate_hidden_scrollbar_ids(ui: &mut Ui) {
    ui.control_id(KindSeed::SLIDER, FocusType::Passive, None);
    ui.control_id(KindSeed::REPEAT_BUTTON, FocusType::Passive, None);
    ui.control_id(KindSeed::REPEAT_BUTTON, FocusType::Passive, None);
}

fn end_scroll_view(ui: &mut Ui, handle_scroll_wheel: bool) {
    let Some(id) = ui.scroll_views.pop() else {
        log::warn!("end_scroll_view: no scroll view is open");
        return;
    };
    ui.pop_scope(ScopeKind::ScrollView);

    let now = ui.now();
    let event = ui.event().clone();
    let pointer = ui.pointer();
    let position = ui
        .states()
        .get::<ScrollViewRecord>(id)
        .map_or(Rect::default(), |r| r.position);
    let inside = ui.hit(position);
    let wheel_multiplier = ui.config.wheel_multiplier;
    let touch_modifier = ui.config.touch_scroll_modifier;

    let mut consume = false;
    let mut acquire = false;
    let mut release = false;
    let mut animating = false;
    {
        let record = ui.states_mut().get_or_insert_with(id, ScrollViewRecord::default);
        let since =
            |t: Option<Instant>| t.map_or(0.0, |t| now.saturating_duration_since(t).as_secs_f64());
        let mut apply = false;

        if event.kind == EventKind::Repaint {
            let dt = since(record.last_repaint);
            record.last_repaint = Some(now);
            if !record.velocity.is_zero() && !record.touch_dragging {
                let max = record.max_scroll();
                if step_inertia(&mut record.scroll_position, &mut record.velocity, dt, max) {
                    apply = true;
                }
                animating = !record.velocity.is_zero();
            }
        }

        if event.kind == EventKind::TouchUp && record.touch_dragging {
            record.touch_dragging = false;
            // inertia starts counting from the release
            record.last_repaint = Some(now);
            release = true;
            animating = !record.velocity.is_zero();
        }

        if handle_scroll_wheel && (record.can_scroll_x() || record.can_scroll_y()) {
            let max = record.max_scroll();
            match event.kind {
                EventKind::Wheel
                    if inside
                        && ((record.can_scroll_x() && event.delta.x != 0.0)
                            || (record.can_scroll_y() && event.delta.y != 0.0)) =>
                {
                    let s = &mut record.scroll_position;
                    if record.view_rect.w > record.visible_rect.w {
                        s.x = (s.x + event.delta.x * wheel_multiplier).clamp(0.0, max.x);
                    }
                    if record.view_rect.h > record.visible_rect.h {
                        s.y = (s.y + event.delta.y * wheel_multiplier).clamp(0.0, max.y);
                    }
                    consume = true;
                    apply = true;
                }
                EventKind::TouchDown if inside && event.modifiers.contains(touch_modifier) => {
                    record.touch_dragging = true;
                    record.touch_anchor = pointer;
                    record.touch_anchor_scroll = record.scroll_position;
                    record.last_touch = Some(now);
                    record.velocity = Vec2::ZERO;
                    acquire = true;
                    consume = true;
                }
                EventKind::TouchMove if record.touch_dragging => {
                    let dt = since(record.last_touch);
                    record.last_touch = Some(now);
                    let previous = record.scroll_position;
                    let dragged = record.touch_anchor_scroll - (pointer - record.touch_anchor);
                    record.scroll_position =
                        Vec2::new(dragged.x.clamp(0.0, max.x), dragged.y.clamp(0.0, max.y));
                    if dt > 0.0 {
                        let sample = (record.scroll_position - previous) / dt;
                        record.velocity = record.velocity.lerp(sample, dt * 10.0);
                    }
                    consume = true;
                    apply = true;
                }
                _ => {}
            }
        }

        if apply {
            record.scroll_position.x = record.scroll_position.x.max(0.0);
            record.scroll_position.y = record.scroll_position.y.max(0.0);
            record.apply = true;
        }
    }

    if acquire {
        ui.capture_mut().try_acquire_mouse(id);
    }
    if release {
        ui.capture_mut().release_mouse(id);
    }
    if consume {
        ui.consume_event();
    }
    if animating {
        ui.request_repaint();
    }
}

/// Scroll the innermost open view so `target` (its content coordinates)
/// becomes visible on the next cycle.
pub fn ScrollTo(ui: &mut Ui, target: Rect) {
    if let Some(record) = innermost(ui) {
        record.scroll_to(target);
    }
}

/// Like [`ScrollTo`], moving at most `max_delta`. False when nothing needs
/// to move or no view is open.
pub fn ScrollTowards(ui: &mut Ui, target: Rect, max_delta: f64) -> bool {
    innermost(ui).is_some_and(|record| record.scroll_towards(target, max_delta))
}

fn innermost(ui: &mut Ui) -> Option<&mut ScrollViewRecord> {
    let id = *ui.scroll_views.last()?;
    ui.states_mut().get_mut::<ScrollViewRecord>(id)
}
