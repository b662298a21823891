//! Free-text notes pad kept in its own slot.
//!
//! # Invariants
//! - The slot holds a JSON array with at most one `{content, lastSaved}`
//!   record.
//! - Unreadable slot content loads as "no notes" instead of failing.

use crate::storage::KeyValueStorage;
use crate::store::item_store::PersistenceError;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Saved notes blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub content: String,
    pub last_saved: DateTime<Utc>,
}

/// Notes pad bound to one storage slot.
pub struct NotesPad<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> NotesPad<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Replaces the saved notes and stamps `last_saved` with the current time.
    pub fn save(&self, content: impl Into<String>) -> Result<NoteRecord, PersistenceError> {
        let record = NoteRecord {
            content: content.into(),
            last_saved: Utc::now(),
        };
        let payload = serde_json::to_string(&[&record])
            .map_err(|err| PersistenceError::Encode(err.to_string()))?;
        self.storage.set(&self.key, &payload)?;

        info!(
            "event=notes_save module=notes status=ok key={} chars={}",
            self.key,
            record.content.chars().count()
        );
        Ok(record)
    }

    /// Returns the saved notes, or `None` when nothing usable is stored.
    pub fn load(&self) -> Option<NoteRecord> {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(
                    "event=notes_load module=notes status=error key={} error_code=storage_read_failed error={}",
                    self.key, err
                );
                return None;
            }
        };

        match serde_json::from_str::<Vec<NoteRecord>>(&raw) {
            Ok(records) => records.into_iter().next(),
            Err(err) => {
                warn!(
                    "event=notes_load module=notes status=error key={} error_code=slot_corrupt error={}",
                    self.key, err
                );
                None
            }
        }
    }

    /// Removes the notes slot.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.storage.remove(&self.key)?;
        info!("event=notes_clear module=notes status=ok key={}", self.key);
        Ok(())
    }
}
