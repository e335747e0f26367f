use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::{DEFAULT_TABLES, LocalStore, StoreError, StoreResult, row_id};

/// File-backed store: one `<table>.json` array per table under `root`.
///
/// Every mutation rewrites the table file through a temporary file and a
/// rename, so a crash mid-write leaves the previous contents intact. Rows are
/// held in memory after `open` and only change once the write succeeds.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    tables: IndexMap<String, IndexMap<String, Value>>,
}

impl JsonFileStore {
    /// Opens (creating `root` if needed) with the default table set.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open_with_tables(root, DEFAULT_TABLES)
    }

    pub fn open_with_tables<I, S>(root: impl Into<PathBuf>, tables: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let mut loaded = IndexMap::new();
        for name in tables {
            let name = name.into();
            let rows = load_table(&table_path(&root, &name), &name)?;
            debug!(table = %name, rows = rows.len(), "json store table loaded");
            loaded.insert(name, rows);
        }

        Ok(Self {
            root,
            tables: loaded,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table(&self, table: &str) -> StoreResult<&IndexMap<String, Value>> {
        self.tables
            .get(table)
            .ok_or_else(|| StoreError::UnknownTable(table.to_owned()))
    }

    fn mutate<F>(&mut self, table: &str, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut IndexMap<String, Value>),
    {
        let mut rows = self.table(table)?.clone();
        apply(&mut rows);
        let snapshot: Vec<&Value> = rows.values().collect();
        write_table(&table_path(&self.root, table), &snapshot)?;
        debug!(table, rows = snapshot.len(), "json store table written");
        self.tables.insert(table.to_owned(), rows);
        Ok(())
    }
}

impl LocalStore for JsonFileStore {
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
        self.mutate(table, |rows| {
            rows.insert(id, row);
        })
    }

    fn remove(&mut self, table: &str, id: &str) -> StoreResult<()> {
        self.mutate(table, |rows| {
            rows.shift_remove(id);
        })
    }

    fn clear(&mut self, table: &str) -> StoreResult<()> {
        self.mutate(table, IndexMap::clear)
    }
}

fn table_path(root: &Path, table: &str) -> PathBuf {
    root.join(format!("{table}.json"))
}

fn load_table(path: &Path, table: &str) -> StoreResult<IndexMap<String, Value>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(IndexMap::new()),
        Err(err) => return Err(err.into()),
    };
    let rows: Vec<Value> = serde_json::from_str(&contents)?;
    rows.into_iter()
        .map(|row| Ok((row_id(table, &row)?, row)))
        .collect()
}

fn write_table(path: &Path, rows: &[&Value]) -> StoreResult<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, serde_json::to_vec_pretty(rows)?)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
