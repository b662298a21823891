use chrono::NaiveDate;
use shelfnote_core::{
    export_document_on, import_file, import_str, parse_import, write_export, Classification, Item,
    ItemStore, MemoryStorage, NewItem, ShelfStatus, StoreConfig, TransferError,
};

#[test]
fn export_document_is_pretty_and_dated() {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::dashboard_tasks());
    store.create(NewItem::new("Plan week")).unwrap();

    let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    let document = export_document_on(&store, date).unwrap();

    assert_eq!(document.file_name, "tasks_2025-03-07.json");
    assert!(document.contents.contains("\n  {"));
    let decoded: Vec<Item> = serde_json::from_str(&document.contents).unwrap();
    assert_eq!(decoded, store.items());
}

#[test]
fn export_then_import_into_fresh_store_restores_items() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = ItemStore::open(MemoryStorage::new(), StoreConfig::bookshelf());
    source.create(NewItem::new("Dune").secondary("Frank Herbert")).unwrap();

    let path = write_export(&source, dir.path()).unwrap();
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("books_"));

    let mut target = ItemStore::open(
        MemoryStorage::new(),
        StoreConfig::bookshelf().with_seed(Vec::new()),
    );
    let imported = import_file(&mut target, &path).unwrap();

    assert_eq!(imported, source.len());
    assert_eq!(target.items(), source.items());
}

#[test]
fn wire_shape_uses_camel_case_and_flattened_classification() {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::bookshelf());
    let item = store.create(NewItem::new("Dune").secondary("Frank Herbert")).unwrap();

    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value["id"], item.id.as_str());
    assert_eq!(value["primaryText"], "Dune");
    assert_eq!(value["secondaryText"], "Frank Herbert");
    assert_eq!(value["status"], "own");
    assert_eq!(value["priority"], "medium");
    assert!(value["createdAt"].is_string());
    assert!(value.get("completed").is_none());
    assert!(value.get("auxiliary").is_none());
}

#[test]
fn malformed_import_document_is_rejected_without_mutation() {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::bookshelf());
    let before = store.items().to_vec();

    let err = import_str(&mut store, "{\"books\": []}").unwrap_err();
    assert!(matches!(err, TransferError::Malformed(_)));
    assert_eq!(store.items(), before.as_slice());
}

#[test]
fn missing_import_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::course_tasks());
    let err = import_file(&mut store, dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, TransferError::Io(_)));
}

#[test]
fn import_scenario_against_three_books() {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::bookshelf());
    assert_eq!(store.len(), 3);

    let imported = import_str(
        &mut store,
        r#"[{"id": 9, "title": "New Book", "author": "A"}, {"title": "No Id"}]"#,
    )
    .unwrap();

    assert_eq!(imported, 1);
    assert_eq!(store.len(), 4);
    assert!(store.items().iter().all(|item| item.primary_text != "No Id"));
}

#[test]
fn parse_import_keeps_only_object_entries() {
    let records = parse_import(r#"[{"id": "a", "text": "x"}, null, {"title": "y"}]"#).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].is_acceptable());
    assert!(!records[1].is_acceptable());
}

#[test]
fn import_accepts_epoch_millis_created_at() {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::dashboard_tasks());

    let imported = import_str(
        &mut store,
        r#"[{"id": "1700000000000", "text": "Write report", "createdAt": 1700000000000}]"#,
    )
    .unwrap();

    assert_eq!(imported, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.items()[0].created_at.timestamp_millis(), 1_700_000_000_000);
}

#[test]
fn import_tolerates_several_text_aliases() {
    let mut store = ItemStore::open(MemoryStorage::new(), StoreConfig::dashboard_tasks());

    let imported = import_str(
        &mut store,
        r#"[{"id": 5, "name": "Math HW", "text": "Math HW", "course": "Calculus", "author": "X"}]"#,
    )
    .unwrap();

    assert_eq!(imported, 1);
    assert_eq!(store.items()[0].primary_text, "Math HW");
    assert_eq!(store.items()[0].secondary_text.as_deref(), Some("X"));
}

#[test]
fn import_defaults_mistyped_status() {
    let mut store = ItemStore::open(
        MemoryStorage::new(),
        StoreConfig::bookshelf().with_seed(Vec::new()),
    );

    let imported = import_str(&mut store, r#"[{"id": 6, "title": "Dune", "status": 2}]"#).unwrap();

    assert_eq!(imported, 1);
    assert_eq!(
        store.items()[0].classification,
        Classification::Status(ShelfStatus::Own)
    );
}
