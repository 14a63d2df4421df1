//! Scrollbars: a slider with a `size`-unit thumb between two repeat buttons.
//!
//! Holding an end button steps the value by `UiConfig::scroll_step`: once
//! immediately, again after `first_repeat_wait`, then every
//! `repeat_interval`. Only one scrollbar can be "in repeat" at a time.

use recall_core::*;

use crate::Ui;
use crate::control::do_repeat_button;
use crate::slider::do_slider;

/// The four styles a scrollbar draws with.
#[derive(Clone, Debug)]
pub struct ScrollbarStyles {
    pub track: Style,
    pub thumb: Style,
    /// Left or up.
    pub min_button: Style,
    /// Right or down.
    pub max_button: Style,
}

impl ScrollbarStyles {
    pub fn horizontal(skin: &Skin) -> Self {
        Self {
            track: skin.horizontal_scrollbar.clone(),
            thumb: skin.horizontal_scrollbar_thumb.clone(),
            min_button: skin.horizontal_scrollbar_left_button.clone(),
            max_button: skin.horizontal_scrollbar_right_button.clone(),
        }
    }

    pub fn vertical(skin: &Skin) -> Self {
        Self {
            track: skin.vertical_scrollbar.clone(),
            thumb: skin.vertical_scrollbar_thumb.clone(),
            min_button: skin.vertical_scrollbar_up_button.clone(),
            max_button: skin.vertical_scrollbar_down_button.clone(),
        }
    }
}

pub fn HorizontalScrollbar(
    ui: &mut Ui,
    rect: Rect,
    value: f64,
    size: f64,
    left: f64,
    right: f64,
) -> f64 {
    let styles = ScrollbarStyles::horizontal(&ui.skin);
    Scroller(ui, rect, value, size, left, right, &styles, true)
}

pub fn VerticalScrollbar(
    ui: &mut Ui,
    rect: Rect,
    value: f64,
    size: f64,
    top: f64,
    bottom: f64,
) -> f64 {
    let styles = ScrollbarStyles::vertical(&ui.skin);
    Scroller(ui, rect, value, size, top, bottom, &styles, false)
}

/// Allocates one slider id and two repeat-button ids, in that order.
pub fn Scroller(
    ui: &mut Ui,
    rect: Rect,
    value: f64,
    size: f64,
    start: f64,
    end: f64,
    styles: &ScrollbarStyles,
    horizontal: bool,
) -> f64 {
    let id = ui.control_id(KindSeed::SLIDER, FocusType::Passive, Some(rect));

    let (track, min_rect, max_rect) = if horizontal {
        let lw = styles.min_button.fixed_width;
        let rw = styles.max_button.fixed_width;
        (
            Rect::new(rect.x + lw, rect.y, rect.w - lw - rw, rect.h),
            Rect::new(rect.x, rect.y, lw, rect.h),
            Rect::new(rect.x_max() - rw, rect.y, rw, rect.h),
        )
    } else {
        let th = styles.min_button.fixed_height;
        let bh = styles.max_button.fixed_height;
        (
            Rect::new(rect.x, rect.y + th, rect.w, rect.h - th - bh),
            Rect::new(rect.x, rect.y, rect.w, th),
            Rect::new(rect.x, rect.y_max() - bh, rect.w, bh),
        )
    };

    let mut value = do_slider(
        ui,
        id,
        track,
        value,
        size,
        start,
        end,
        &styles.track,
        &styles.thumb,
        horizontal,
    );

    let was_pointer_up = ui.event().kind == EventKind::PointerUp;
    let dir = if start < end { 1.0 } else { -1.0 };
    let step = ui.config.scroll_step;
    if scroller_repeat_button(ui, id, min_rect, &styles.min_button) {
        value -= step * dir;
        ui.set_changed();
    }
    if scroller_repeat_button(ui, id, max_rect, &styles.max_button) {
        value += step * dir;
        ui.set_changed();
    }
    if was_pointer_up && ui.event().is_used() {
        ui.repeat.active = None;
    }

    let (lo, hi) = if start < end { (start, end) } else { (end, start) };
    value.clamp(lo, (hi - size).max(lo))
}

/// An end button of scroller `scroller_id`. True when a step is due.
fn scroller_repeat_button(ui: &mut Ui, scroller_id: ControlId, rect: Rect, style: &Style) -> bool {
    if !do_repeat_button(ui, rect, &Content::none(), style, FocusType::Passive) {
        return false;
    }
    let now = ui.now();
    let first_click = ui.repeat.active != Some(scroller_id);
    ui.repeat.active = Some(scroller_id);

    let due = if first_click {
        ui.repeat.next_step = Some(now + ui.config.first_repeat_wait);
        true
    } else if ui.repeat.next_step.is_some_and(|t| now >= t) {
        ui.repeat.next_step = Some(now + ui.config.repeat_interval);
        true
    } else {
        false
    };
    if ui.is_repaint() {
        ui.request_repaint();
    }
    due
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: Rect = Rect::new(0.0, 0.0, 100.0, 15.0);

    fn run(ui: &mut Ui, event: Event, value: f64) -> f64 {
        ui.begin_cycle(event);
        let v = HorizontalScrollbar(ui, BAR, value, 10.0, 0.0, 100.0);
        ui.end_cycle().unwrap();
        v
    }

    #[test]
    fn scroller_allocates_three_ids() {
        let mut ui = Ui::headless();
        ui.begin_cycle(Event::layout(Vec2::ZERO));
        HorizontalScrollbar(&mut ui, BAR, 0.0, 10.0, 0.0, 100.0);
        assert_eq!(ui.ids().allocated(), 3);
        ui.end_cycle().unwrap();
    }

    #[test]
    fn release_after_first_step_does_not_step_again() {
        let clock = ManualClock::new();
        let mut ui = Ui::new(NullPainter, NullClip, clock.clone());
        let right = Vec2::new(92.0, 7.0);

        let mut value = run(&mut ui, Event::pointer_down(right), 0.0);
        assert_eq!(value, 0.0);
        value = run(&mut ui, Event::repaint(right), value);
        assert_eq!(value, 10.0);
        clock.advance_ms(100);
        value = run(&mut ui, Event::pointer_up(right), value);
        assert_eq!(value, 10.0);
        assert!(ui.repeat.active.is_none());
    }

    #[test]
    fn holding_another_bar_takes_over_the_repeat() {
        let clock = ManualClock::new();
        let mut ui = Ui::new(NullPainter, NullClip, clock.clone());
        let bar_b = Rect::new(0.0, 20.0, 100.0, 15.0);
        let over_a = Vec2::new(92.0, 7.0);
        let over_b = Vec2::new(92.0, 27.0);
        let frame = |ui: &mut Ui, event: Event, (a, b): (f64, f64)| {
            ui.begin_cycle(event);
            let a = HorizontalScrollbar(ui, BAR, a, 10.0, 0.0, 100.0);
            let b = HorizontalScrollbar(ui, bar_b, b, 10.0, 0.0, 100.0);
            ui.end_cycle().unwrap();
            (a, b)
        };

        let mut values = frame(&mut ui, Event::pointer_down(over_a), (0.0, 0.0));
        values = frame(&mut ui, Event::repaint(over_a), values);
        clock.advance_ms(260);
        values = frame(&mut ui, Event::repaint(over_a), values);
        assert_eq!(values, (20.0, 0.0));
        let repeating_a = ui.repeat.active;
        assert!(repeating_a.is_some());

        // the host drops capture without a release reaching bar A
        ui.capture_mut().reset_mouse();
        values = frame(&mut ui, Event::pointer_down(over_b), values);
        values = frame(&mut ui, Event::repaint(over_b), values);
        assert_eq!(values, (20.0, 10.0));
        assert!(ui.repeat.active.is_some());
        assert_ne!(ui.repeat.active, repeating_a);

        // B waits out its own first delay; A never steps again
        clock.advance_ms(100);
        values = frame(&mut ui, Event::repaint(over_b), values);
        assert_eq!(values, (20.0, 10.0));
        clock.advance_ms(160);
        values = frame(&mut ui, Event::repaint(over_b), values);
        assert_eq!(values, (20.0, 20.0));
        for _ in 0..3 {
            clock.advance_ms(30);
            values = frame(&mut ui, Event::repaint(over_a), values);
            assert_eq!(values.0, 20.0);
        }
    }

    #[test]
    fn left_button_steps_down_in_inverted_range() {
        let clock = ManualClock::new();
        let mut ui = Ui::new(NullPainter, NullClip, clock.clone());
        let left = Vec2::new(5.0, 7.0);
        let mut value = 50.0;
        for event in [Event::pointer_down(left), Event::repaint(left)] {
            ui.begin_cycle(event);
            value = HorizontalScrollbar(&mut ui, BAR, value, 10.0, 100.0, 0.0);
            ui.end_cycle().unwrap();
        }
        // in a reversed range the "left" button increases the value
        assert_eq!(value, 60.0);
    }

    #[test]
    fn trough_click_pages_by_size() {
        let clock = ManualClock::new();
        let mut ui = Ui::new(NullPainter, NullClip, clock.clone());
        let far = Vec2::new(80.0, 7.0);

        let mut value = run(&mut ui, Event::pointer_down(far), 0.0);
        assert_eq!(value, 10.0);
        value = run(&mut ui, Event::repaint(far), value);
        assert_eq!(value, 10.0);
        clock.advance_ms(250);
        value = run(&mut ui, Event::repaint(far), value);
        assert_eq!(value, 20.0);
        value = run(&mut ui, Event::pointer_up(far), value);
        assert_eq!(value, 20.0);
        assert!(ui.capture().is_mouse_free());
    }
}
