use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{LocalStore, StoreError, StoreResult};

/// Record as persisted: caller data plus identity and timestamps.
///
/// Timestamps serialize as `createdAt` / `updatedAt` next to the flattened
/// data fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stamped<T> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: T,
}

/// Caller-side view of one store table.
///
/// Keeps an in-memory copy of the table's records, assigns ids and
/// timestamps on writes, and remembers the last failure so UI code can show
/// it without threading the error through. Failures are returned as well.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    table: String,
    items: Vec<Stamped<T>>,
    last_error: Option<String>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            items: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn items(&self) -> &[Stamped<T>] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Stamped<T>> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Replaces the in-memory records with the table's current rows.
    pub fn load(&mut self, store: &impl LocalStore) -> StoreResult<()> {
        let loaded = store.list(&self.table).and_then(|rows| {
            rows.into_iter()
                .map(|row| serde_json::from_value::<Stamped<T>>(row).map_err(StoreError::from))
                .collect::<StoreResult<Vec<_>>>()
        });
        let items = self.record(loaded)?;
        debug!(table = %self.table, count = items.len(), "collection loaded");
        self.items = items;
        Ok(())
    }

    /// Persists `data` as a new record with a fresh v4 id and both
    /// timestamps set to `now`.
    pub fn add(
        &mut self,
        store: &mut impl LocalStore,
        data: T,
        now: DateTime<Utc>,
    ) -> StoreResult<&Stamped<T>> {
        let record = Stamped {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            data,
        };
        let persisted = persist(store, &self.table, &record);
        self.record(persisted)?;

        debug!(table = %self.table, id = %record.id, "collection record added");
        let index = self.items.len();
        self.items.push(record);
        Ok(&self.items[index])
    }

    /// Applies `change` to the record's data and bumps `updated_at`.
    pub fn update<F>(
        &mut self,
        store: &mut impl LocalStore,
        id: &str,
        now: DateTime<Utc>,
        change: F,
    ) -> StoreResult<&Stamped<T>>
    where
        F: FnOnce(&mut T),
    {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return self.record(Err(StoreError::NotFound {
                table: self.table.clone(),
                id: id.to_owned(),
            }));
        };

        let mut record = self.items[index].clone();
        change(&mut record.data);
        record.updated_at = now;
        let persisted = persist(store, &self.table, &record);
        self.record(persisted)?;

        debug!(table = %self.table, id, "collection record updated");
        self.items[index] = record;
        Ok(&self.items[index])
    }

    /// Deletes a record. Returns whether a record with `id` was held.
    pub fn delete(&mut self, store: &mut impl LocalStore, id: &str) -> StoreResult<bool> {
        let removed = store.remove(&self.table, id);
        self.record(removed)?;

        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let deleted = self.items.len() != before;
        debug!(table = %self.table, id, deleted, "collection record deleted");
        Ok(deleted)
    }

    fn record<V>(&mut self, result: StoreResult<V>) -> StoreResult<V> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => {
                warn!(table = %self.table, error = %err, "collection operation failed");
                self.last_error = Some(err.to_string());
            }
        }
        result
    }
}

fn persist<T: Serialize>(
    store: &mut impl LocalStore,
    table: &str,
    record: &Stamped<T>,
) -> StoreResult<()> {
    let row = serde_json::to_value(record)?;
    store.upsert(table, row)
}
