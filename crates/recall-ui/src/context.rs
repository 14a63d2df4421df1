//! # The dispatch context
//!
//! [`Ui`] owns everything that outlives a single widget call: the current
//! event, the id allocator, capture state, the per-id state registry, the
//! open scope stack and the injected collaborators (painter, clip stack,
//! clock). The host drives it one event at a time:
//!
//! ```rust
//! use recall_core::*;
//! use recall_ui::*;
//!
//! let mut ui = Ui::headless();
//! for event in [Event::layout(Vec2::ZERO), Event::repaint(Vec2::ZERO)] {
//!     ui.begin_cycle(event);
//!     if Button(&mut ui, Rect::new(10.0, 10.0, 80.0, 20.0), "OK") {
//!         println!("clicked");
//!     }
//!     ui.end_cycle().expect("scopes are balanced");
//! }
//! ```
//!
//! Widgets see the pointer in *local* coordinates: every open group, clip
//! or scroll view shifts the origin, and hit tests also respect the
//! intersection of the open clip rects.

use web_time::Instant;

use recall_core::*;

use crate::textfield::{TextEditSession, default_session};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScopeKind {
    Group,
    Clip,
    ScrollView,
}

impl ScopeKind {
    fn name(self) -> &'static str {
        match self {
            ScopeKind::Group => "group",
            ScopeKind::Clip => "clip",
            ScopeKind::ScrollView => "scroll view",
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ScopeFrame {
    kind: ScopeKind,
    /// Absolute position of the local origin.
    origin: Vec2,
    /// Absolute visible area.
    clip: Rect,
}

/// The single "in repeat" slot shared by every repeat button and scrollbar
/// trough.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RepeatTimer {
    pub active: Option<ControlId>,
    pub next_step: Option<Instant>,
}

type SessionFactory = Box<dyn Fn() -> Box<dyn TextEditSession>>;

pub struct Ui {
    event: Event,
    ids: IdAllocator,
    capture: CaptureState,
    states: StateRegistry,
    pub(crate) repeat: RepeatTimer,
    pub(crate) scroll_views: Vec<ControlId>,
    frames: Vec<ScopeFrame>,
    clock: Box<dyn Clock>,
    diagnostics: Diagnostics,
    painter: Box<dyn Painter>,
    clip: Box<dyn ClipStack>,
    pub(crate) new_session: SessionFactory,
    pub skin: Skin,
    pub config: UiConfig,
    /// Disabled controls still allocate ids and draw, but ignore input.
    pub enabled: bool,
    changed: bool,
    mouse_used: bool,
    needs_repaint: bool,
    focus_chain: Vec<ControlId>,
    last_focus_chain: Vec<ControlId>,
}

impl Ui {
    pub fn new(
        painter: impl Painter + 'static,
        clip: impl ClipStack + 'static,
        clock: impl Clock,
    ) -> Self {
        Self {
            event: Event::layout(Vec2::ZERO),
            ids: IdAllocator::new(),
            capture: CaptureState::new(),
            states: StateRegistry::new(),
            repeat: RepeatTimer::default(),
            scroll_views: Vec::new(),
            frames: Vec::new(),
            clock: Box::new(clock),
            diagnostics: Diagnostics::new(),
            painter: Box::new(painter),
            clip: Box::new(clip),
            new_session: Box::new(default_session),
            skin: Skin::default(),
            config: UiConfig::default(),
            enabled: true,
            changed: false,
            mouse_used: false,
            needs_repaint: false,
            focus_chain: Vec::new(),
            last_focus_chain: Vec::new(),
        }
    }

    /// No drawing, no clipping, wall-clock time.
    pub fn headless() -> Self {
        Self::new(NullPainter, NullClip, SystemClock)
    }

    pub fn with_skin(mut self, skin: Skin) -> Self {
        self.skin = skin;
        self
    }

    pub fn with_config(mut self, config: UiConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the editing session created for each new text field id.
    pub fn with_text_sessions(
        mut self,
        factory: impl Fn() -> Box<dyn TextEditSession> + 'static,
    ) -> Self {
        self.new_session = Box::new(factory);
        self
    }

    /// Start a dispatch cycle for `event` (absolute coordinates).
    pub fn begin_cycle(&mut self, event: Event) {
        if !self.frames.is_empty() {
            log::warn!(
                "begin_cycle: {} scope(s) still open from the previous cycle",
                self.frames.len()
            );
            self.close_open_scopes();
        }
        self.event = event;
        self.ids.begin_cycle();
        self.scroll_views.clear();
        self.focus_chain.clear();
        self.enabled = true;
        self.mouse_used = false;
        self.needs_repaint = false;
    }

    /// Finish the cycle. An unconsumed Tab moves keyboard focus along the
    /// chain of this cycle's focusable controls.
    ///
    /// Scopes left open are closed here so the clip stack stays balanced;
    /// that is reported and returned as [`UiError::UnbalancedScope`].
    pub fn end_cycle(&mut self) -> Result<(), UiError> {
        let unbalanced = self.frames.last().map(|f| f.kind.name());
        self.close_open_scopes();

        self.last_focus_chain = std::mem::take(&mut self.focus_chain);
        if self.event.kind == EventKind::KeyDown && self.event.key == Some(Key::Tab) {
            let moved = if self.event.shift() {
                self.focus_prev()
            } else {
                self.focus_next()
            };
            if moved.is_some() {
                self.event.consume();
            }
        }

        match unbalanced {
            Some(kind) => Err(UiError::UnbalancedScope(kind)),
            None => Ok(()),
        }
    }

    fn close_open_scopes(&mut self) {
        while let Some(frame) = self.frames.pop() {
            self.diagnostics
                .report(UiError::UnbalancedScope(frame.kind.name()));
            self.clip.pop();
        }
        self.scroll_views.clear();
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn consume_event(&mut self) {
        self.event.consume();
    }

    pub fn is_repaint(&self) -> bool {
        self.event.kind == EventKind::Repaint
    }

    pub fn is_layout(&self) -> bool {
        self.event.kind == EventKind::Layout
    }

    /// The event kind as `id` should react to it. Pointer events are hidden
    /// from everyone but the capture owner, and input is hidden from
    /// disabled controls that are not mid-drag.
    pub fn event_kind(&self, id: ControlId) -> EventKind {
        let kind = self.event.kind_for_control(id, self.capture.mouse_owner());
        if !self.enabled && !self.capture.has_mouse(id) && is_input(kind) {
            return EventKind::Ignore;
        }
        kind
    }

    /// Pointer position in the current local coordinate space.
    pub fn pointer(&self) -> Vec2 {
        self.event.position - self.origin()
    }

    /// Whether the pointer is over `rect` (local) and inside every open clip.
    pub fn hit(&self, rect: Rect) -> bool {
        let inside_clip = self
            .frames
            .last()
            .is_none_or(|f| f.clip.contains(self.event.position));
        inside_clip && rect.contains(self.pointer())
    }

    fn origin(&self) -> Vec2 {
        self.frames.last().map_or(Vec2::ZERO, |f| f.origin)
    }

    /// Allocate the identity of the next control of kind `seed`.
    pub fn control_id(&mut self, seed: KindSeed, focus: FocusType, rect: Option<Rect>) -> ControlId {
        let id = self.ids.allocate(seed, rect);
        if focus == FocusType::Keyboard {
            self.focus_chain.push(id);
        }
        id
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn capture(&self) -> &CaptureState {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut CaptureState {
        &mut self.capture
    }

    pub fn states(&self) -> &StateRegistry {
        &self.states
    }

    pub fn states_mut(&mut self) -> &mut StateRegistry {
        &mut self.states
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn report(&mut self, err: UiError) {
        self.diagnostics.report(err);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Ask the painter to draw. No-op outside repaint cycles.
    pub fn draw(&mut self, style: &Style, rect: Rect, content: &Content, mut state: DrawState) {
        if !self.is_repaint() {
            return;
        }
        state.enabled &= self.enabled;
        self.painter.draw(style, rect, content, state);
    }

    /// [`Ui::draw`] for a focused text field, with its caret and selection.
    pub fn draw_text_cursor(
        &mut self,
        style: &Style,
        rect: Rect,
        content: &Content,
        mut state: DrawState,
        cursor: TextCursor,
    ) {
        if !self.is_repaint() {
            return;
        }
        state.enabled &= self.enabled;
        self.painter.draw_text_cursor(style, rect, content, state, cursor);
    }

    pub(crate) fn painter_mut(&mut self) -> &mut dyn Painter {
        self.painter.as_mut()
    }

    pub fn measure(&self, style: &Style, content: &Content) -> Size {
        self.painter.measure(style, content)
    }

    /// Interaction state every control passes to the painter.
    pub fn draw_state(&self, id: ControlId, hot: bool) -> DrawState {
        DrawState {
            hot,
            captured: self.capture.has_mouse(id),
            selected: false,
            keyboard_focus: self.capture.has_keyboard_focus(id),
            enabled: self.enabled,
        }
    }

    /// Read and clear the "some control changed its value" flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn set_changed(&mut self) {
        self.changed = true;
    }

    /// Raised when something animates on its own (a held repeat button,
    /// scroll inertia); the host should schedule another repaint.
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub fn request_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Whether the pointer was over a control or group this cycle.
    pub fn mouse_used(&self) -> bool {
        self.mouse_used
    }

    pub(crate) fn mark_mouse_used(&mut self) {
        self.mouse_used = true;
    }

    /// Focusable ids of the last completed cycle, in declaration order.
    pub fn focus_chain(&self) -> &[ControlId] {
        &self.last_focus_chain
    }

    pub fn focus_next(&mut self) -> Option<ControlId> {
        self.step_focus(1)
    }

    pub fn focus_prev(&mut self) -> Option<ControlId> {
        self.step_focus(-1)
    }

    fn step_focus(&mut self, dir: isize) -> Option<ControlId> {
        let chain = &self.last_focus_chain;
        if chain.is_empty() {
            return None;
        }
        let len = chain.len() as isize;
        let current = self
            .capture
            .keyboard_owner()
            .and_then(|id| chain.iter().position(|c| *c == id));
        let next = match current {
            Some(i) => (i as isize + dir).rem_euclid(len),
            None if dir > 0 => 0,
            None => len - 1,
        };
        let id = chain[next as usize];
        self.capture.set_keyboard_focus(id);
        Some(id)
    }

    /// Open a clip scope. `rect` is in the current local space; content
    /// inside is offset by `rect.origin + scroll_offset`.
    pub(crate) fn push_scope(
        &mut self,
        kind: ScopeKind,
        rect: Rect,
        scroll_offset: Vec2,
        render_offset: Vec2,
        reset_transform: bool,
    ) {
        let origin = self.origin();
        let abs = rect.translate(origin);
        let clip = match self.frames.last() {
            Some(parent) if !reset_transform => parent.clip.intersect(&abs),
            _ => abs,
        };
        self.frames.push(ScopeFrame {
            kind,
            origin: abs.origin() + scroll_offset,
            clip,
        });
        self.clip
            .push(rect, scroll_offset, render_offset, reset_transform);
    }

    pub(crate) fn pop_scope(&mut self, kind: ScopeKind) {
        match self.frames.pop() {
            Some(frame) => {
                if frame.kind != kind {
                    log::warn!(
                        "closing a {} scope but the innermost open scope is a {}",
                        kind.name(),
                        frame.kind.name()
                    );
                }
                self.clip.pop();
            }
            None => log::warn!("closing a {} scope that is not open", kind.name()),
        }
    }

    /// Number of open groups, clips and scroll views.
    pub fn scope_depth(&self) -> usize {
        self.frames.len()
    }
}

fn is_input(kind: EventKind) -> bool {
    kind.is_pointer()
        || kind.is_touch()
        || matches!(kind, EventKind::KeyDown | EventKind::KeyUp | EventKind::Wheel)
}
