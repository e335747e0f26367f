pub mod layout;
pub mod primitives;
pub mod render_model;
pub mod stats;
pub mod ticks;
pub mod timeline_view;
pub mod types;
pub mod window;

pub use layout::{
    DependencyEdge, EntryPlacement, NowMarkerPolicy, ResolvedDependencyEdge, dependency_edge,
    dependency_edges, intersects_window, layout_entries, now_marker, position,
};
pub use render_model::{
    ColorToken, EntryShape, color_of, is_current_period, kind_label, shape_of,
};
pub use stats::ProgressSummary;
pub use ticks::{AxisTick, MAX_TICKS, axis_ticks, compute_ticks, tick_label};
pub use timeline_view::{
    DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, NavigateDirection, TimelineView, ViewState, ZOOM_STEP,
    ZoomDirection,
};
pub use types::{EntryKind, TimelineEntry, Viewport};
pub use window::{CalendarStep, ViewMode, ViewWindow, compute_window};
