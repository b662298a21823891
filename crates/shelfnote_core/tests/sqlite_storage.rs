use rusqlite::Connection;
use shelfnote_core::db::{open_db, open_db_in_memory};
use shelfnote_core::{
    ItemStore, KeyValueStorage, NewItem, NotesPad, SqliteKvStorage, StorageError, StoreConfig,
    DASHBOARD_NOTES_KEY,
};

#[test]
fn get_set_remove_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    assert_eq!(storage.get("tasks").unwrap(), None);

    storage.set("tasks", "[]").unwrap();
    storage.set("tasks", "[1]").unwrap();
    assert_eq!(storage.get("tasks").unwrap().as_deref(), Some("[1]"));
    assert_eq!(storage.keys().unwrap(), vec!["tasks".to_string()]);

    storage.remove("tasks").unwrap();
    storage.remove("tasks").unwrap();
    assert_eq!(storage.get("tasks").unwrap(), None);
}

#[test]
fn rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStorage::try_new(&conn) {
        Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lists.db");

    let created = {
        let conn = open_db(&path).unwrap();
        let storage = SqliteKvStorage::try_new(&conn).unwrap();
        let mut store = ItemStore::open(&storage, StoreConfig::course_tasks());
        let item = store
            .create(NewItem::new("Math HW").secondary("Calculus"))
            .unwrap();
        store.toggle_classification(&item.id).unwrap()
    };

    let conn = open_db(&path).unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();
    let store = ItemStore::open(&storage, StoreConfig::course_tasks());
    assert_eq!(store.items(), &[created]);
}

#[test]
fn variants_share_one_database_without_interference() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteKvStorage::try_new(&conn).unwrap();

    let mut tasks = ItemStore::open(&storage, StoreConfig::dashboard_tasks());
    let books = ItemStore::open(&storage, StoreConfig::bookshelf());
    let notes = NotesPad::new(&storage, DASHBOARD_NOTES_KEY);

    tasks.create(NewItem::new("Plan week")).unwrap();
    notes.save("remember milk").unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(books.len(), 3);
    assert_eq!(
        storage.keys().unwrap(),
        vec![
            "books".to_string(),
            "pd_notes_v3".to_string(),
            "pd_tasks_v3".to_string()
        ]
    );
}
