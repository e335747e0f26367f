use serde::{Deserialize, Serialize};

/// Pointer state tracked between frames.
///
/// Only hover is kept here; activation is fire-and-forget and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    cursor: Option<(f64, f64)>,
    hovered_entry: Option<usize>,
}

impl InteractionState {
    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    /// Row index of the entry under the pointer, if any.
    #[must_use]
    pub fn hovered_entry(self) -> Option<usize> {
        self.hovered_entry
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, hovered_entry: Option<usize>) {
        self.cursor = Some((x, y));
        self.hovered_entry = hovered_entry;
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.hovered_entry = None;
    }

    /// Drops hover state that may point at a row that no longer exists.
    pub fn reset_hover(&mut self) {
        self.hovered_entry = None;
    }
}
