use serde::{Deserialize, Serialize};

use crate::core::{
    AxisTick, EntryPlacement, ProgressSummary, ResolvedDependencyEdge, ViewState, ViewWindow,
    Viewport,
};

/// Placement of one entry as seen by the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPlacementSnapshot {
    pub id: String,
    /// `None` when the window is degenerate.
    pub placement: Option<EntryPlacement>,
    /// Whether any part of the entry falls inside the window.
    pub visible: bool,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub view: ViewState,
    pub window: ViewWindow,
    pub ticks: Vec<AxisTick>,
    pub placements: Vec<EntryPlacementSnapshot>,
    pub dependency_edges: Vec<ResolvedDependencyEdge>,
    /// X fraction of the now marker, pre-scaled by zoom.
    pub now_marker: Option<f64>,
    pub hovered_entry: Option<usize>,
    pub summary: ProgressSummary,
}
