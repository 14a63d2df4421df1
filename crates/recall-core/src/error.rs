use thiserror::Error;

/// Non-fatal problems found while dispatching. None of them abort the cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    #[error("selection grid needs a positive number of items per row, got {items_per_row}")]
    InvalidGrid { items_per_row: i32 },
    #[error("enabled flags cover {actual} items but the grid has {expected}")]
    EnabledFlagsMismatch { expected: usize, actual: usize },
    #[error("missing {0} passed to a drawing operation")]
    MissingResource(&'static str),
    #[error("{0} scope was not closed before the cycle ended")]
    UnbalancedScope(&'static str),
}

/// The host's diagnostic channel.
#[derive(Debug, Default)]
pub struct Diagnostics {
    reported: Vec<UiError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, err: UiError) {
        log::warn!("{err}");
        self.reported.push(err);
    }

    pub fn reported(&self) -> &[UiError] {
        &self.reported
    }

    pub fn drain(&mut self) -> Vec<UiError> {
        std::mem::take(&mut self.reported)
    }
}
