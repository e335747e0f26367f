mod engine;
mod engine_accessors;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;
mod layout_helpers;
mod render_frame_builder;
mod render_style;
mod snapshot_controller;
mod validation;

pub use engine::{EntryActivatedCallback, TimelineEngine};
pub use engine_config::{TimelineEngineConfig, TimelineLayout};
pub use engine_snapshot::{EngineSnapshot, EntryPlacementSnapshot};
pub use json_contract::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1, TIMELINE_ENTRIES_JSON_SCHEMA_V1,
    TimelineEntriesJsonContractV1, entries_from_json_compat_str,
    entries_to_json_contract_v1_pretty,
};
pub use render_style::TimelineStyle;
