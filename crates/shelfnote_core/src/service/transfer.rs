//! JSON file import and export for item collections.
//!
//! # Responsibility
//! - Produce dated, pretty-printed export documents.
//! - Parse user-supplied import documents leniently.
//!
//! # Invariants
//! - A document that is not a JSON array is rejected as a whole.
//! - Array entries that do not look like items are dropped, not reported.

use crate::storage::KeyValueStorage;
use crate::store::import::ImportRecord;
use crate::store::item_store::ItemStore;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum TransferError {
    Io(std::io::Error),
    /// Import document is not a JSON array.
    Malformed(String),
    Encode(String),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Malformed(message) => write!(f, "malformed import document: {message}"),
            Self::Encode(message) => write!(f, "failed to encode export: {message}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(_) | Self::Encode(_) => None,
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Export file name and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// `<prefix>_<YYYY-MM-DD>.json`
    pub file_name: String,
    /// Pretty-printed JSON array of the whole collection.
    pub contents: String,
}

/// Builds the export document dated today (UTC).
pub fn export_document<S: KeyValueStorage>(
    store: &ItemStore<S>,
) -> Result<ExportDocument, TransferError> {
    export_document_on(store, Utc::now().date_naive())
}

/// Builds the export document for an explicit date.
pub fn export_document_on<S: KeyValueStorage>(
    store: &ItemStore<S>,
    date: NaiveDate,
) -> Result<ExportDocument, TransferError> {
    let contents = serde_json::to_string_pretty(store.items())
        .map_err(|err| TransferError::Encode(err.to_string()))?;
    Ok(ExportDocument {
        file_name: format!(
            "{}_{}.json",
            store.config().export_prefix(),
            date.format("%Y-%m-%d")
        ),
        contents,
    })
}

/// Writes today's export into `dir` and returns the file path.
pub fn write_export<S: KeyValueStorage>(
    store: &ItemStore<S>,
    dir: impl AsRef<Path>,
) -> Result<PathBuf, TransferError> {
    let document = export_document(store)?;
    let path = dir.as_ref().join(&document.file_name);
    std::fs::write(&path, document.contents.as_bytes())?;

    info!(
        "event=export_write module=transfer status=ok key={} count={}",
        store.config().storage_key(),
        store.len()
    );
    Ok(path)
}

/// Parses an import document into records.
///
/// Entries that are not JSON objects are skipped; objects always yield a
/// record, acceptable or not.
pub fn parse_import(text: &str) -> Result<Vec<ImportRecord>, TransferError> {
    let entries = serde_json::from_str::<Vec<serde_json::Value>>(text)
        .map_err(|err| TransferError::Malformed(err.to_string()))?;
    let total = entries.len();

    let records = entries
        .into_iter()
        .filter_map(|entry| match entry {
            serde_json::Value::Object(fields) => Some(ImportRecord::from_fields(&fields)),
            _ => None,
        })
        .collect::<Vec<_>>();

    debug!(
        "event=import_parse module=transfer status=ok entries={} records={}",
        total,
        records.len()
    );
    Ok(records)
}

/// Parses `text` and merges it into the store.
pub fn import_str<S: KeyValueStorage>(
    store: &mut ItemStore<S>,
    text: &str,
) -> Result<usize, TransferError> {
    let records = parse_import(text)?;
    Ok(store.import_merge(records))
}

/// Reads an import file and merges it into the store.
pub fn import_file<S: KeyValueStorage>(
    store: &mut ItemStore<S>,
    path: impl AsRef<Path>,
) -> Result<usize, TransferError> {
    let text = std::fs::read_to_string(path)?;
    import_str(store, &text)
}
