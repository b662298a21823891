//! Core logic for Shelfnote persisted lists.
//! This crate is the single source of truth for item invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{ConfigError, DuplicatePolicy, InsertPosition, StoreConfig, DASHBOARD_NOTES_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::classification::{Classification, ClassificationScheme, Priority, ShelfStatus};
pub use model::item::{Item, ItemField, ItemId, ItemPatch, NewItem, ValidationError};
pub use service::notes::{NoteRecord, NotesPad};
pub use service::stats::CollectionStats;
pub use service::transfer::{
    export_document, export_document_on, import_file, import_str, parse_import, write_export,
    ExportDocument, TransferError,
};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteKvStorage, StorageError, StorageResult};
pub use store::import::ImportRecord;
pub use store::item_store::{encode_items, ItemStore, PersistenceError, StoreError, StoreResult};
pub use view::filter::{ClassificationFilter, UnknownFilter, ViewFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
