//! gantt-rs: timeline (Gantt) layout and rendering engine.
//!
//! Entries are laid out against a calendar window derived from an anchor date
//! and a view mode, turned into backend-agnostic draw primitives, and handed
//! to a `Renderer`. A small keyed JSON store is included for hosts that
//! persist the records behind their entries.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod store;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
