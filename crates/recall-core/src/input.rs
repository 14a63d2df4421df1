//! The event stream: exactly one [`Event`] is dispatched per cycle.
//!
//! A widget that acts on the event calls [`Event::consume`], after which every
//! later observer in the same cycle sees [`EventKind::Used`].

use bitflags::bitflags;

use crate::{ControlId, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerDown,
    PointerDrag,
    PointerUp,
    KeyDown,
    KeyUp,
    Wheel,
    TouchDown,
    TouchMove,
    TouchUp,
    /// A drag-and-drop payload is hovering.
    DragUpdated,
    Repaint,
    Layout,
    /// Already consumed by an earlier control this cycle.
    Used,
    /// Not for this control: another control holds mouse capture.
    Ignore,
}

impl EventKind {
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            EventKind::PointerMove
                | EventKind::PointerDown
                | EventKind::PointerDrag
                | EventKind::PointerUp
        )
    }

    pub fn is_touch(self) -> bool {
        matches!(
            self,
            EventKind::TouchDown | EventKind::TouchMove | EventKind::TouchUp
        )
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
        /// Cmd on Mac, Win key on Windows
        const COMMAND = 1 << 3;
        const CAPS_LOCK = 1 << 4;
    }
}

impl Modifiers {
    /// Modifiers that change the meaning of an activation key.
    pub fn any_command(self) -> bool {
        self.intersects(Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::ALT | Modifiers::COMMAND)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Enter,
    KeypadEnter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    F(u8), // F1-F12
}

impl Key {
    pub fn is_activation(self) -> bool {
        matches!(self, Key::Space | Key::Enter | Key::KeypadEnter)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub position: Vec2,
    pub delta: Vec2,
    pub modifiers: Modifiers,
    pub key: Option<Key>,
    /// Text produced by a key press, if any.
    pub character: Option<char>,
    pub click_count: u32,
}

impl Event {
    pub fn new(kind: EventKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            delta: Vec2::ZERO,
            modifiers: Modifiers::empty(),
            key: None,
            character: None,
            click_count: 0,
        }
    }

    pub fn repaint(position: Vec2) -> Self {
        Self::new(EventKind::Repaint, position)
    }

    pub fn layout(position: Vec2) -> Self {
        Self::new(EventKind::Layout, position)
    }

    pub fn pointer_move(position: Vec2) -> Self {
        Self::new(EventKind::PointerMove, position)
    }

    pub fn pointer_down(position: Vec2) -> Self {
        Self {
            click_count: 1,
            ..Self::new(EventKind::PointerDown, position)
        }
    }

    pub fn pointer_drag(position: Vec2, delta: Vec2) -> Self {
        Self {
            delta,
            ..Self::new(EventKind::PointerDrag, position)
        }
    }

    pub fn pointer_up(position: Vec2) -> Self {
        Self::new(EventKind::PointerUp, position)
    }

    pub fn wheel(position: Vec2, delta: Vec2) -> Self {
        Self {
            delta,
            ..Self::new(EventKind::Wheel, position)
        }
    }

    pub fn touch(kind: EventKind, position: Vec2) -> Self {
        debug_assert!(kind.is_touch());
        Self::new(kind, position)
    }

    pub fn key_down(key: Key) -> Self {
        let character = match key {
            Key::Character(c) => Some(c),
            Key::Space => Some(' '),
            _ => None,
        };
        Self {
            key: Some(key),
            character,
            ..Self::new(EventKind::KeyDown, Vec2::ZERO)
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_click_count(mut self, clicks: u32) -> Self {
        self.click_count = clicks;
        self
    }

    /// Mark the event as handled. Idempotent.
    pub fn consume(&mut self) {
        if self.kind != EventKind::Used {
            log::trace!("event {:?} consumed", self.kind);
        }
        self.kind = EventKind::Used;
    }

    pub fn is_used(&self) -> bool {
        self.kind == EventKind::Used
    }

    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    pub fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// The kind as seen by `id`: while another control holds mouse capture,
    /// pointer events are not delivered to anyone else.
    pub fn kind_for_control(&self, id: ControlId, mouse_owner: Option<ControlId>) -> EventKind {
        match mouse_owner {
            Some(owner) if owner != id && self.kind.is_pointer() => EventKind::Ignore,
            _ => self.kind,
        }
    }
}
