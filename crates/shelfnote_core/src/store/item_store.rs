//! Persisted item collection.
//!
//! # Responsibility
//! - Own the authoritative in-memory collection of one list variant.
//! - Mirror the full collection into its storage slot after every mutation.
//!
//! # Invariants
//! - Every mutating call persists exactly once, even when it changes nothing.
//! - A rejected mutation (validation, unknown id) leaves the collection and
//!   the slot untouched.
//! - Persistence failures never surface as errors; they are logged and kept
//!   in `last_persistence_error()` while the in-memory state stands.

use crate::config::{DuplicatePolicy, InsertPosition, StoreConfig};
use crate::model::item::{Item, ItemId, ItemPatch, NewItem, ValidationError};
use crate::storage::{KeyValueStorage, StorageError};
use crate::store::import::ImportRecord;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-facing error for item store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ValidationError),
    NotFound(ItemId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "item not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Slot read/write failure, recovered inside the store.
#[derive(Debug)]
pub enum PersistenceError {
    Storage(StorageError),
    /// Slot content is not a valid item array for this variant.
    Corrupt(String),
    Encode(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Corrupt(message) => write!(f, "corrupt slot payload: {message}"),
            Self::Encode(message) => write!(f, "failed to encode items: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Corrupt(_) | Self::Encode(_) => None,
        }
    }
}

impl From<StorageError> for PersistenceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

enum SlotRead {
    Missing,
    Items(Vec<Item>),
    Unreadable(PersistenceError),
}

/// Serializes a collection in the slot wire format.
pub fn encode_items(items: &[Item]) -> Result<String, PersistenceError> {
    serde_json::to_string(items).map_err(|err| PersistenceError::Encode(err.to_string()))
}

/// Item collection bound to one storage slot.
pub struct ItemStore<S: KeyValueStorage> {
    storage: S,
    config: StoreConfig,
    items: Vec<Item>,
    persistence_error: Option<PersistenceError>,
}

impl<S: KeyValueStorage> ItemStore<S> {
    /// Opens the store and loads the slot.
    ///
    /// A missing slot starts empty, or with `config.seed` persisted when
    /// seed items are configured. An unreadable slot starts from
    /// `config.fallback` and is not overwritten until the next mutation.
    pub fn open(storage: S, config: StoreConfig) -> Self {
        let mut store = Self {
            storage,
            config,
            items: Vec::new(),
            persistence_error: None,
        };

        match store.read_slot() {
            SlotRead::Items(items) => store.items = items,
            SlotRead::Missing => {
                if !store.config.seed.is_empty() {
                    store.items = store.seed_items();
                    store.persist("seed");
                }
            }
            SlotRead::Unreadable(err) => {
                store.items = store.config.fallback.clone();
                store.persistence_error = Some(err);
            }
        }

        info!(
            "event=store_open module=store status=ok key={} count={}",
            store.config.storage_key(),
            store.items.len()
        );
        store
    }

    /// Reads the persisted collection without touching the in-memory copy.
    ///
    /// Missing slot yields an empty vector; unreadable data yields
    /// `config.fallback`. Never fails.
    pub fn load(&self) -> Vec<Item> {
        match self.read_slot() {
            SlotRead::Missing => Vec::new(),
            SlotRead::Items(items) => items,
            SlotRead::Unreadable(_) => self.config.fallback.clone(),
        }
    }

    /// Validates and inserts a new item, then persists.
    ///
    /// # Errors
    /// - `Validation` when a required field is blank; nothing is stored.
    pub fn create(&mut self, new_item: NewItem) -> StoreResult<Item> {
        let mut item = new_item.into_item(self.config.scheme.default_classification());
        if let Err(err) = item.validate(&self.config.required, self.config.scheme) {
            warn!(
                "event=item_create module=store status=rejected key={} error={}",
                self.config.storage_key(),
                err
            );
            return Err(err.into());
        }
        while self.contains(&item.id) {
            item.id = ItemId::generate();
        }

        match self.config.insert_position {
            InsertPosition::Append => self.items.push(item.clone()),
            InsertPosition::Prepend => self.items.insert(0, item.clone()),
        }
        self.persist("create");
        Ok(item)
    }

    /// Merges a patch into an existing item and persists.
    ///
    /// # Errors
    /// - `NotFound` for unknown ids.
    /// - `Validation` when the merged item breaks required fields or scheme.
    pub fn update(&mut self, id: &ItemId, patch: ItemPatch) -> StoreResult<Item> {
        let index = self.index_of(id)?;
        let mut candidate = self.items[index].clone();
        candidate.apply_patch(patch);
        candidate.validate(&self.config.required, self.config.scheme)?;

        self.items[index] = candidate.clone();
        self.persist("update");
        Ok(candidate)
    }

    /// Flips the completion flag or advances the shelf status.
    pub fn toggle_classification(&mut self, id: &ItemId) -> StoreResult<Item> {
        let index = self.index_of(id)?;
        let item = &mut self.items[index];
        item.classification = item.classification.toggled();
        let updated = item.clone();

        self.persist("toggle");
        Ok(updated)
    }

    /// Removes every item with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &ItemId) {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        debug!(
            "event=item_delete module=store key={} removed={}",
            self.config.storage_key(),
            before - self.items.len()
        );
        self.persist("delete");
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
        self.persist("clear_all");
    }

    /// Prepends acceptable external records and returns how many were taken.
    ///
    /// Records without id or primary text are dropped. Ids already present
    /// are handled per `config.duplicate_policy`.
    pub fn import_merge(&mut self, records: Vec<ImportRecord>) -> usize {
        let scheme = self.config.scheme;
        let policy = self.config.duplicate_policy;
        let existing = self
            .items
            .iter()
            .map(|item| item.id.clone())
            .collect::<HashSet<_>>();

        let mut incoming_ids = HashSet::new();
        let mut accepted = Vec::new();
        let mut dropped = 0usize;
        let mut skipped = 0usize;

        for record in records {
            let Some(item) = record.into_item(scheme) else {
                dropped += 1;
                continue;
            };
            let fresh_in_batch = incoming_ids.insert(item.id.clone());
            let keep = match policy {
                DuplicatePolicy::Keep => true,
                DuplicatePolicy::SkipExisting => fresh_in_batch && !existing.contains(&item.id),
                DuplicatePolicy::ReplaceExisting => fresh_in_batch,
            };
            if keep {
                accepted.push(item);
            } else {
                skipped += 1;
            }
        }

        if policy == DuplicatePolicy::ReplaceExisting {
            self.items.retain(|item| !incoming_ids.contains(&item.id));
        }

        let imported = accepted.len();
        accepted.append(&mut self.items);
        self.items = accepted;

        info!(
            "event=item_import module=store status=ok key={} imported={} dropped={} skipped={}",
            self.config.storage_key(),
            imported,
            dropped,
            skipped
        );
        self.persist("import");
        imported
    }

    /// Returns the collection in its persisted text form.
    pub fn export_snapshot(&self) -> Result<String, PersistenceError> {
        encode_items(&self.items)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Read-only snapshot in collection order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Failure of the most recent slot read at open or write, if any.
    pub fn last_persistence_error(&self) -> Option<&PersistenceError> {
        self.persistence_error.as_ref()
    }

    fn index_of(&self, id: &ItemId) -> StoreResult<usize> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn seed_items(&self) -> Vec<Item> {
        let default_classification = self.config.scheme.default_classification();
        self.config
            .seed
            .iter()
            .cloned()
            .filter_map(|new_item| {
                let item = new_item.into_item(default_classification);
                match item.validate(&self.config.required, self.config.scheme) {
                    Ok(()) => Some(item),
                    Err(err) => {
                        warn!(
                            "event=store_seed module=store status=skipped key={} error={}",
                            self.config.storage_key(),
                            err
                        );
                        None
                    }
                }
            })
            .collect()
    }

    fn read_slot(&self) -> SlotRead {
        let key = self.config.storage_key();
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SlotRead::Missing,
            Err(err) => {
                warn!(
                    "event=slot_read module=store status=error key={} error_code=storage_read_failed error={}",
                    key, err
                );
                return SlotRead::Unreadable(err.into());
            }
        };

        let items = match serde_json::from_str::<Vec<Item>>(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "event=slot_read module=store status=error key={} error_code=slot_corrupt error={}",
                    key, err
                );
                return SlotRead::Unreadable(PersistenceError::Corrupt(err.to_string()));
            }
        };

        if let Some(foreign) = items
            .iter()
            .find(|item| item.classification.scheme() != self.config.scheme)
        {
            warn!(
                "event=slot_read module=store status=error key={} error_code=scheme_mismatch id={}",
                key, foreign.id
            );
            return SlotRead::Unreadable(PersistenceError::Corrupt(format!(
                "item {} does not use the `{}` scheme",
                foreign.id, self.config.scheme
            )));
        }

        SlotRead::Items(items)
    }

    fn persist(&mut self, operation: &'static str) {
        let key = self.config.storage_key();
        let result = encode_items(&self.items)
            .and_then(|payload| self.storage.set(key, &payload).map_err(Into::into));

        match result {
            Ok(()) => {
                debug!(
                    "event=slot_write module=store status=ok op={} key={} count={}",
                    operation,
                    key,
                    self.items.len()
                );
                self.persistence_error = None;
            }
            Err(err) => {
                warn!(
                    "event=slot_write module=store status=error op={} key={} error_code=persist_failed error={}",
                    operation, key, err
                );
                self.persistence_error = Some(err);
            }
        }
    }
}
