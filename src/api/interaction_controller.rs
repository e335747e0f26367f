use tracing::{debug, trace};

use crate::core::TimelineEntry;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::hit_test::hit_test_entry;
use super::layout_helpers::FrameGeometry;
use super::{EntryActivatedCallback, TimelineEngine};

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn hovered_entry(&self) -> Option<&TimelineEntry> {
        self.interaction
            .hovered_entry()
            .and_then(|row| self.entries.get(row))
    }

    /// Registers the activation callback, replacing any previous one.
    pub fn set_on_entry_activated(&mut self, callback: impl FnMut(&TimelineEntry) + 'static) {
        self.on_entry_activated = Some(Box::new(callback) as EntryActivatedCallback);
    }

    pub fn clear_on_entry_activated(&mut self) {
        self.on_entry_activated = None;
    }

    /// Row index of the entry drawn under the pixel `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        hit_test_entry(
            &self.entries,
            self.view.window(),
            self.view.zoom_factor(),
            FrameGeometry::new(self.config.viewport, self.config.layout),
            x,
            y,
        )
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let hovered = self.hit_test(x, y);
        if hovered != self.interaction.hovered_entry() {
            trace!(?hovered, x, y, "hovered entry changed");
        }
        self.interaction.on_pointer_move(x, y, hovered);
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    /// Resolves a click at `(x, y)`.
    ///
    /// When an entry is hit, the activation callback (if any) receives it and
    /// the entry is returned. Clicks on empty space return `None`.
    pub fn click(&mut self, x: f64, y: f64) -> Option<&TimelineEntry> {
        let row = self.hit_test(x, y)?;
        let entry = &self.entries[row];
        debug!(entry_id = %entry.id, row, "entry activated");
        if let Some(callback) = self.on_entry_activated.as_mut() {
            callback(entry);
        }
        Some(entry)
    }
}
