use chrono::{DateTime, Utc};

use crate::core::{dependency_edges, intersects_window, layout_entries, now_marker};
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::{EngineSnapshot, EntryPlacementSnapshot, TimelineEngine};

impl<R: Renderer> TimelineEngine<R> {
    /// Builds a deterministic snapshot with `now` as the reference instant.
    #[must_use]
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> EngineSnapshot {
        let window = self.view.window();
        let zoom = self.view.zoom_factor();
        let placements = layout_entries(&self.entries, window, zoom)
            .into_iter()
            .zip(&self.entries)
            .map(|(placement, entry)| EntryPlacementSnapshot {
                id: entry.id.clone(),
                placement,
                visible: intersects_window(entry, window),
            })
            .collect();

        EngineSnapshot {
            viewport: self.config.viewport,
            view: self.view.state(),
            window,
            ticks: self.view.axis_ticks(now),
            placements,
            dependency_edges: dependency_edges(&self.entries, window, zoom),
            now_marker: now_marker(
                window,
                zoom,
                now,
                self.view.anchor(),
                self.config.now_marker_policy,
            ),
            hovered_entry: self.interaction.hovered_entry(),
            summary: self.progress_summary(),
        }
    }

    /// Serializes the snapshot as pretty JSON for fixture-based regression
    /// checks.
    pub fn snapshot_json_pretty_at(&self, now: DateTime<Utc>) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.snapshot_at(now))
            .map_err(|e| TimelineError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
