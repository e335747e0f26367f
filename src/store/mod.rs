//! Local persistence collaborator.
//!
//! Rows are plain JSON objects keyed by their `"id"` field and grouped into
//! tables declared up front. The timeline itself never touches the store;
//! hosts use it to persist the records they turn into entries.

mod collection;
mod json_file;
mod memory;

pub use collection::{Collection, Stamped};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use thiserror::Error;

/// Tables a store knows about unless configured otherwise.
pub const DEFAULT_TABLES: [&str; 5] = ["projects", "tasks", "tickets", "users", "automation_rules"];

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("row in table `{table}` has no string `id` field")]
    MissingId { table: String },

    #[error("row `{id}` not found in table `{table}`")]
    NotFound { table: String, id: String },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Keyed JSON row storage.
///
/// `upsert` replaces a row with the same id in place (keeping its position)
/// or appends a new one; `list` returns rows in insertion order.
pub trait LocalStore {
    fn tables(&self) -> Vec<String>;

    fn get(&self, table: &str, id: &str) -> StoreResult<Option<Value>>;

    fn list(&self, table: &str) -> StoreResult<Vec<Value>>;

    fn upsert(&mut self, table: &str, row: Value) -> StoreResult<()>;

    /// Removes a row. Removing a missing id is not an error.
    fn remove(&mut self, table: &str, id: &str) -> StoreResult<()>;

    fn clear(&mut self, table: &str) -> StoreResult<()>;
}

pub(crate) fn row_id(table: &str, row: &Value) -> StoreResult<String> {
    row.get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| StoreError::MissingId {
            table: table.to_owned(),
        })
}
