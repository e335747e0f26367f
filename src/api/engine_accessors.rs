use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::core::{
    AxisTick, NavigateDirection, ProgressSummary, TimelineEntry, TimelineView, ViewMode,
    ViewState, ViewWindow, Viewport, ZoomDirection,
};
use crate::error::TimelineResult;
use crate::render::Renderer;

use super::engine_config::validate_viewport;
use super::{TimelineEngine, TimelineEngineConfig, TimelineStyle};

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> TimelineResult<()> {
        validate_viewport(viewport, self.config.layout)?;
        self.config.viewport = viewport;
        self.interaction.reset_hover();
        Ok(())
    }

    #[must_use]
    pub fn style(&self) -> TimelineStyle {
        self.config.style
    }

    pub fn set_style(&mut self, style: TimelineStyle) -> TimelineResult<()> {
        style.validate()?;
        self.config.style = style;
        Ok(())
    }

    /// Replaces the entry collection.
    ///
    /// Entries are kept as given. Inverted ranges and duplicate ids are
    /// reported but not rejected: inverted entries draw with zero width and
    /// the first entry carrying a duplicated id wins dependency lookups.
    pub fn set_entries(&mut self, entries: Vec<TimelineEntry>) {
        for entry in entries.iter().filter(|entry| entry.has_inverted_range()) {
            warn!(entry_id = %entry.id, start = %entry.start, end = %entry.end, "entry ends before it starts");
        }
        let mut seen_ids = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen_ids.insert(entry.id.as_str()) {
                warn!(entry_id = %entry.id, "duplicate entry id; the first occurrence wins dependency lookups");
            }
        }

        debug!(count = entries.len(), "timeline entries replaced");
        self.entries = entries;
        self.interaction.reset_hover();
    }

    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn progress_summary(&self) -> ProgressSummary {
        ProgressSummary::from_entries(&self.entries)
    }

    #[must_use]
    pub fn view(&self) -> TimelineView {
        self.view
    }

    #[must_use]
    pub fn window(&self) -> ViewWindow {
        self.view.window()
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<DateTime<Utc>> {
        self.view.ticks()
    }

    #[must_use]
    pub fn axis_ticks_at(&self, now: DateTime<Utc>) -> Vec<AxisTick> {
        self.view.axis_ticks(now)
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.view.zoom_factor()
    }

    pub fn navigate(&mut self, direction: NavigateDirection) {
        self.view.navigate(direction);
        self.interaction.reset_hover();
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        self.view.zoom(direction);
        self.interaction.reset_hover();
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.view.set_mode(mode);
        self.interaction.reset_hover();
    }

    pub fn set_anchor(&mut self, anchor: DateTime<Utc>) {
        self.view.set_anchor(anchor);
        self.interaction.reset_hover();
    }

    /// Jumps back to the current day, keeping mode and zoom.
    pub fn go_to_today(&mut self) {
        self.set_anchor(Utc::now());
    }

    /// Restores a previously captured view (mode, anchor and zoom).
    pub fn set_view_state(&mut self, state: ViewState) {
        self.view = TimelineView::from_state(state);
        self.interaction.reset_hover();
    }
}
