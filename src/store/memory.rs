use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use super::{DEFAULT_TABLES, LocalStore, StoreError, StoreResult, row_id};

type Table = IndexMap<String, Value>;

/// In-memory store; rows keep insertion order per table.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: IndexMap<String, Table>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Store with the default table set.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tables(DEFAULT_TABLES)
    }

    #[must_use]
    pub fn with_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: tables
                .into_iter()
                .map(|name| (name.into(), Table::new()))
                .collect(),
        }
    }

    fn table(&self, table: &str) -> StoreResult<&Table> {
        self.tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_owned()))
    }

    fn table_mut(&mut self, table: &str) -> StoreResult<&mut Table> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_owned()))
    }
}

impl LocalStore for MemoryStore {
    fn tables(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    fn get(&self, table: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self.table(table)?.get(id).cloned())
    }

    fn list(&self, table: &str) -> StoreResult<Vec<Value>> {
        Ok(self.table(table)?.values().cloned().collect())
    }

    fn upsert(&mut self, table: &str, row: Value) -> StoreResult<()> {
        let id = row_id(table, &row)?;
        trace!(table, %id, "memory store upsert");
        self.table_mut(table)?.insert(id, row);
        Ok(())
    }

    fn remove(&mut self, table: &str, id: &str) -> StoreResult<()> {
        self.table_mut(table)?.shift_remove(id);
        Ok(())
    }

    fn clear(&mut self, table: &str) -> StoreResult<()> {
        self.table_mut(table)?.clear();
        Ok(())
    }
}
