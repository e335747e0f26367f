use chrono::{DateTime, TimeZone, Utc};
use gantt_rs::store::{
    Collection, DEFAULT_TABLES, JsonFileStore, LocalStore, MemoryStore, StoreError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Task {
    title: String,
    progress: u8,
    due_date: Option<DateTime<Utc>>,
}

fn task(title: &str) -> Task {
    Task {
        title: title.to_owned(),
        progress: 0,
        due_date: None,
    }
}

fn exercise_crud(store: &mut impl LocalStore) {
    store
        .upsert("tasks", json!({"id": "a", "title": "First"}))
        .expect("insert a");
    store
        .upsert("tasks", json!({"id": "b", "title": "Second"}))
        .expect("insert b");
    store
        .upsert("tasks", json!({"id": "a", "title": "First, edited"}))
        .expect("replace a");

    let rows = store.list("tasks").expect("list");
    let titles: Vec<_> = rows.iter().map(|row| row["title"].clone()).collect();
    assert_eq!(titles, vec![json!("First, edited"), json!("Second")]);
    assert_eq!(
        store.get("tasks", "b").expect("get"),
        Some(json!({"id": "b", "title": "Second"}))
    );
    assert_eq!(store.get("tasks", "zzz").expect("get missing"), None);

    store.remove("tasks", "a").expect("remove");
    store.remove("tasks", "a").expect("remove twice");
    assert_eq!(store.list("tasks").expect("list").len(), 1);

    store.clear("tasks").expect("clear");
    assert!(store.list("tasks").expect("list").is_empty());
}

#[test]
fn memory_store_crud() {
    let mut store = MemoryStore::new();
    assert_eq!(store.tables(), DEFAULT_TABLES.map(str::to_owned).to_vec());
    exercise_crud(&mut store);
}

#[test]
fn memory_store_rejects_unknown_tables_and_missing_ids() {
    let mut store = MemoryStore::with_tables(["tasks"]);

    let err = store.list("projects").expect_err("unknown table");
    assert!(matches!(err, StoreError::UnknownTable(name) if name == "projects"));

    let err = store
        .upsert("tasks", json!({"title": "No id"}))
        .expect_err("missing id");
    assert!(matches!(err, StoreError::MissingId { .. }));

    let err = store
        .upsert("tasks", json!({"id": 42}))
        .expect_err("numeric id");
    assert!(matches!(err, StoreError::MissingId { .. }));
}

#[test]
fn json_file_store_crud() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = JsonFileStore::open(dir.path()).expect("open");
    exercise_crud(&mut store);
}

#[test]
fn json_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut store = JsonFileStore::open(dir.path()).expect("open");
        store
            .upsert("projects", json!({"id": "p1", "name": "Platform"}))
            .expect("insert p1");
        store
            .upsert("projects", json!({"id": "p2", "name": "Mobile"}))
            .expect("insert p2");
    }

    assert!(dir.path().join("projects.json").exists());
    assert!(!dir.path().join("projects.json.tmp").exists());

    let store = JsonFileStore::open(dir.path()).expect("reopen");
    let ids: Vec<_> = store
        .list("projects")
        .expect("list")
        .into_iter()
        .map(|row| row["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!("p1"), json!("p2")]);
    assert!(store.list("users").expect("list users").is_empty());
}

#[test]
fn json_file_store_keeps_memory_unchanged_when_write_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("db");
    let mut store = JsonFileStore::open(&root).expect("open");
    store
        .upsert("tasks", json!({"id": "kept", "title": "Kept"}))
        .expect("insert kept");

    std::fs::remove_dir_all(&root).expect("remove root");

    let err = store
        .upsert("tasks", json!({"id": "t1", "title": "x"}))
        .expect_err("write into missing root");
    assert!(matches!(err, StoreError::Io(_)));
    assert_eq!(store.get("tasks", "t1").expect("get"), None);

    store.remove("tasks", "kept").expect_err("remove into missing root");
    assert!(store.get("tasks", "kept").expect("get").is_some());
    store.clear("tasks").expect_err("clear into missing root");
    assert_eq!(store.list("tasks").expect("list").len(), 1);
}

#[test]
fn json_file_store_reports_corrupt_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("tasks.json"), "{not json").expect("write corrupt file");

    let err = JsonFileStore::open(dir.path()).expect_err("corrupt table");
    assert!(matches!(err, StoreError::Serialization(_)));
}

#[test]
fn collection_add_stamps_id_and_timestamps() {
    let mut store = MemoryStore::new();
    let mut tasks = Collection::<Task>::new("tasks");
    let now = utc(2024, 6, 15);

    let added = tasks.add(&mut store, task("Write docs"), now).expect("add").clone();

    assert_eq!(added.id.len(), 36);
    assert_eq!(added.created_at, now);
    assert_eq!(added.updated_at, now);

    let row = store
        .get("tasks", &added.id)
        .expect("get")
        .expect("row persisted");
    assert_eq!(row["title"], json!("Write docs"));
    assert_eq!(row["createdAt"], json!("2024-06-15T00:00:00Z"));
    assert!(row.get("updatedAt").is_some());

    let second = tasks.add(&mut store, task("Review"), now).expect("add").id.clone();
    assert_ne!(second, added.id);
    assert_eq!(tasks.items().len(), 2);
}

#[test]
fn collection_update_touches_updated_at_only() {
    let mut store = MemoryStore::new();
    let mut tasks = Collection::<Task>::new("tasks");
    let created = utc(2024, 6, 15);
    let id = tasks
        .add(&mut store, task("Write docs"), created)
        .expect("add")
        .id
        .clone();

    let later = utc(2024, 6, 18);
    let updated = tasks
        .update(&mut store, &id, later, |task| {
            task.progress = 60;
            task.due_date = Some(utc(2024, 7, 1));
        })
        .expect("update")
        .clone();

    assert_eq!(updated.created_at, created);
    assert_eq!(updated.updated_at, later);
    assert_eq!(updated.data.progress, 60);

    let mut reloaded = Collection::<Task>::new("tasks");
    reloaded.load(&store).expect("load");
    assert_eq!(reloaded.get(&id), Some(&updated));
}

#[test]
fn collection_records_last_error() {
    let mut store = MemoryStore::new();
    let mut tasks = Collection::<Task>::new("tasks");

    let err = tasks
        .update(&mut store, "missing", utc(2024, 6, 15), |task| task.progress = 1)
        .expect_err("missing record");
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert!(tasks.last_error().is_some_and(|message| message.contains("missing")));

    tasks.add(&mut store, task("Recover"), utc(2024, 6, 15)).expect("add");
    assert!(tasks.last_error().is_none());

    let mut unknown = Collection::<Task>::new("nope");
    assert!(unknown.load(&store).is_err());
    assert!(unknown.last_error().is_some());
}

#[test]
fn collection_delete_removes_from_store_and_memory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = JsonFileStore::open(dir.path()).expect("open");
    let mut tasks = Collection::<Task>::new("tasks");
    let id = tasks
        .add(&mut store, task("Temporary"), utc(2024, 6, 15))
        .expect("add")
        .id
        .clone();

    assert!(tasks.delete(&mut store, &id).expect("delete"));
    assert!(!tasks.delete(&mut store, &id).expect("delete again"));
    assert!(tasks.items().is_empty());
    assert_eq!(store.get("tasks", &id).expect("get"), None);
}
