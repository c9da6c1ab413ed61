use daykeeper_core::db::{open_db, open_db_in_memory};
use daykeeper_core::{
    default_fixed_goals, DateKey, DayState, KeyValueStore, ReadingLog, SnapshotUpdate,
    SqliteKeyValueStore, StoreError,
};
use rusqlite::Connection;

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

fn memory_store() -> SqliteKeyValueStore {
    SqliteKeyValueStore::try_new(open_db_in_memory().unwrap()).unwrap()
}

#[test]
fn set_get_remove_roundtrip() {
    let store = memory_store();

    assert_eq!(store.get("missing").unwrap(), None);

    store.set("greeting", "hello").unwrap();
    assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));

    store.set("greeting", "replaced").unwrap();
    assert_eq!(store.get("greeting").unwrap().as_deref(), Some("replaced"));

    store.remove("greeting").unwrap();
    assert_eq!(store.get("greeting").unwrap(), None);
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKeyValueStore::try_new(conn) {
        Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_kv_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        daykeeper_core::db::migrations::latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqliteKeyValueStore::try_new(conn),
        Err(StoreError::MissingRequiredTable("kv"))
    ));
}

#[test]
fn malformed_persisted_payloads_degrade_to_defaults() {
    let store = memory_store();
    store.set("daily-records", "{not valid json").unwrap();
    store.set("goal-history", "42").unwrap();
    store.set("fixed-goals", "\"oops\"").unwrap();
    store.set("last-access-date", "\"yesterday\"").unwrap();

    let state = DayState::load_at(store, key("2026-08-06")).unwrap();
    let snapshot = state.snapshot();

    assert!(snapshot.goal_history.is_empty());
    assert!(snapshot.daily_goals.is_empty());
    // An unreadable fixed-goal list reseeds the default set.
    assert_eq!(snapshot.fixed_goals, default_fixed_goals());
}

#[test]
fn data_survives_a_reopen_of_the_same_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("daykeeper.sqlite3");

    let store = SqliteKeyValueStore::try_new(open_db(&db_path).unwrap()).unwrap();
    let state = DayState::load_at(store, key("2026-08-06")).unwrap();
    state
        .save(SnapshotUpdate {
            reading: Some(Some(ReadingLog { pages: 21 })),
            ..SnapshotUpdate::default()
        })
        .unwrap();
    drop(state);

    let store = SqliteKeyValueStore::try_new(open_db(&db_path).unwrap()).unwrap();
    let state = DayState::load_at(store, key("2026-08-06")).unwrap();
    assert_eq!(state.snapshot().reading, Some(ReadingLog { pages: 21 }));
}
