use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::primitives::span_millis;
use crate::core::render_model::is_current_period;
use crate::core::types::TimelineEntry;
use crate::core::window::ViewWindow;

/// Horizontal placement of one entry, as fractions of the plot width.
///
/// Both values are pre-scaled by zoom, so they may exceed `1.0` when zoomed
/// in. For marker entries (milestones) only `left` is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryPlacement {
    pub left: f64,
    pub width: f64,
    pub is_marker: bool,
}

impl EntryPlacement {
    /// X fraction where outgoing dependency edges start.
    #[must_use]
    pub fn right_edge(self) -> f64 {
        if self.is_marker {
            self.left
        } else {
            self.left + self.width
        }
    }
}

/// Lays out `entry` inside `window`.
///
/// Entries starting before the window are pinned to its left edge; entries
/// running past its right edge are truncated so `left + width <= 1` before
/// zoom. Returns `None` when the window has no positive span.
#[must_use]
pub fn position(entry: &TimelineEntry, window: ViewWindow, zoom: f64) -> Option<EntryPlacement> {
    let total_span = window.span_millis();
    if !(total_span > 0.0) || !zoom.is_finite() {
        return None;
    }

    let start_offset = span_millis(window.start, entry.start).max(0.0);
    let raw_left = start_offset / total_span;
    let raw_width = (entry.duration_millis() / total_span)
        .min(1.0 - raw_left)
        .max(0.0);

    Some(EntryPlacement {
        left: raw_left * zoom,
        width: raw_width * zoom,
        is_marker: entry.is_milestone(),
    })
}

/// Whether any part of `entry` falls inside `window`.
#[must_use]
pub fn intersects_window(entry: &TimelineEntry, window: ViewWindow) -> bool {
    let end = entry.end.max(entry.start);
    end >= window.start && entry.start <= window.end
}

/// Places every entry, preserving input order.
#[must_use]
pub fn layout_entries(
    entries: &[TimelineEntry],
    window: ViewWindow,
    zoom: f64,
) -> Vec<Option<EntryPlacement>> {
    #[cfg(feature = "parallel-layout")]
    {
        use rayon::prelude::*;
        entries
            .par_iter()
            .map(|entry| position(entry, window, zoom))
            .collect()
    }

    #[cfg(not(feature = "parallel-layout"))]
    {
        entries
            .iter()
            .map(|entry| position(entry, window, zoom))
            .collect()
    }
}

/// Connector geometry between two laid-out entries, in plot fractions.
///
/// The curve is a quadratic from `start_x` to `end_x` whose control point sits
/// at `control_x`; the vertical lift is applied in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub start_x: f64,
    pub end_x: f64,
    pub control_x: f64,
}

/// Edge bound to the rows it connects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDependencyEdge {
    pub from_id: String,
    pub to_id: String,
    pub from_index: usize,
    pub to_index: usize,
    pub edge: DependencyEdge,
}

/// Connects the right edge of `from` to the left edge of `to`.
#[must_use]
pub fn dependency_edge(
    from: &TimelineEntry,
    to: &TimelineEntry,
    window: ViewWindow,
    zoom: f64,
) -> Option<DependencyEdge> {
    let from_placement = position(from, window, zoom)?;
    let to_placement = position(to, window, zoom)?;
    Some(edge_between(from_placement, to_placement))
}

fn edge_between(from: EntryPlacement, to: EntryPlacement) -> DependencyEdge {
    let start_x = from.right_edge();
    let end_x = to.left;
    DependencyEdge {
        start_x,
        end_x,
        control_x: (start_x + end_x) / 2.0,
    }
}

/// Resolves all dependency references in `entries` into edges.
///
/// Ids with no matching entry are skipped without error. When ids collide the
/// first entry carrying the id is the dependency target. Duplicate references
/// inside one entry produce a single edge.
#[must_use]
pub fn dependency_edges(
    entries: &[TimelineEntry],
    window: ViewWindow,
    zoom: f64,
) -> Vec<ResolvedDependencyEdge> {
    let placements = layout_entries(entries, window, zoom);
    let index_by_id = index_entries_by_id(entries);

    let mut edges = Vec::new();
    for (to_index, entry) in entries.iter().enumerate() {
        let Some(to_placement) = placements[to_index] else {
            continue;
        };
        let mut seen: SmallVec<[usize; 4]> = SmallVec::new();
        for dependency_id in &entry.dependencies {
            let Some(&from_index) = index_by_id.get(dependency_id.as_str()) else {
                trace!(
                    entry_id = %entry.id,
                    dependency_id = %dependency_id,
                    "dangling dependency skipped"
                );
                continue;
            };
            if seen.contains(&from_index) {
                continue;
            }
            seen.push(from_index);

            let Some(from_placement) = placements[from_index] else {
                continue;
            };
            edges.push(ResolvedDependencyEdge {
                from_id: entries[from_index].id.clone(),
                to_id: entry.id.clone(),
                from_index,
                to_index,
                edge: edge_between(from_placement, to_placement),
            });
        }
    }
    edges
}

pub(crate) fn index_entries_by_id(entries: &[TimelineEntry]) -> HashMap<&str, usize> {
    let mut index_by_id = HashMap::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if index_by_id.contains_key(entry.id.as_str()) {
            trace!(entry_id = %entry.id, index, "duplicate entry id ignored for dependency lookup");
            continue;
        }
        index_by_id.insert(entry.id.as_str(), index);
    }
    index_by_id
}

/// When the vertical "now" marker is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NowMarkerPolicy {
    /// Only while the anchor itself falls on today; navigating away hides it.
    AnchorIsToday,
    /// Whenever the current instant lies inside the visible window.
    #[default]
    WhenVisible,
}

/// X fraction of the "now" marker, pre-scaled by zoom.
#[must_use]
pub fn now_marker(
    window: ViewWindow,
    zoom: f64,
    now: DateTime<Utc>,
    anchor: DateTime<Utc>,
    policy: NowMarkerPolicy,
) -> Option<f64> {
    match policy {
        NowMarkerPolicy::AnchorIsToday if !is_current_period(anchor, now) => return None,
        NowMarkerPolicy::AnchorIsToday => {}
        NowMarkerPolicy::WhenVisible if !window.contains(now) => return None,
        NowMarkerPolicy::WhenVisible => {}
    }
    let fraction = window.fraction_of(now)?;
    Some(fraction * zoom)
}
