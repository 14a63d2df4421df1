use crate::ControlId;

/// Single owner of mouse capture and keyboard focus.
///
/// One instance per dispatcher. A captured id that stops being declared is
/// never matched again; it is abandoned rather than cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureState {
    mouse: Option<ControlId>,
    keyboard: Option<ControlId>,
}

impl CaptureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// First claim wins. Re-acquiring by the current owner succeeds.
    pub fn try_acquire_mouse(&mut self, id: ControlId) -> bool {
        match self.mouse {
            None => {
                log::trace!("mouse capture -> {:?}", id);
                self.mouse = Some(id);
                true
            }
            Some(owner) => owner == id,
        }
    }

    /// No-op unless `id` holds capture.
    pub fn release_mouse(&mut self, id: ControlId) {
        if self.mouse == Some(id) {
            log::trace!("mouse capture released by {:?}", id);
            self.mouse = None;
        }
    }

    pub fn has_mouse(&self, id: ControlId) -> bool {
        self.mouse == Some(id)
    }

    pub fn mouse_owner(&self) -> Option<ControlId> {
        self.mouse
    }

    pub fn is_mouse_free(&self) -> bool {
        self.mouse.is_none()
    }

    /// Host escape hatch, e.g. when the window loses focus mid-drag.
    pub fn reset_mouse(&mut self) {
        self.mouse = None;
    }

    pub fn set_keyboard_focus(&mut self, id: ControlId) {
        if self.keyboard != Some(id) {
            log::trace!("keyboard focus -> {:?}", id);
        }
        self.keyboard = Some(id);
    }

    pub fn clear_keyboard_focus(&mut self) {
        self.keyboard = None;
    }

    pub fn has_keyboard_focus(&self, id: ControlId) -> bool {
        self.keyboard == Some(id)
    }

    pub fn keyboard_owner(&self) -> Option<ControlId> {
        self.keyboard
    }
}
