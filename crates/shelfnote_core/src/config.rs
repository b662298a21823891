//! List variant configuration.
//!
//! # Responsibility
//! - Describe one list variant: storage slot, classification scheme,
//!   required fields, insert position and import duplicate policy.
//! - Provide presets for the course task list, the dashboard task list and
//!   the bookshelf catalog.
//!
//! # Invariants
//! - Storage keys and export prefixes match `SLOT_NAME_RE`.
//! - `PrimaryText` is always part of `required`.

use crate::model::classification::{Classification, ClassificationScheme, ShelfStatus};
use crate::model::item::{Item, ItemField, NewItem};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static SLOT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$").expect("valid slot name regex"));

/// Slot holding the dashboard notes pad.
pub const DASHBOARD_NOTES_KEY: &str = "pd_notes_v3";

/// Where `create` inserts new items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertPosition {
    #[default]
    Append,
    Prepend,
}

/// How `import_merge` treats ids that already exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Accept duplicates as-is; the collection may hold repeated ids.
    Keep,
    /// Drop incoming records whose id is already present.
    #[default]
    SkipExisting,
    /// Remove the existing item; the incoming record is prepended with the
    /// rest of the batch, so the replaced entry moves to the front.
    ReplaceExisting,
}

/// Configuration error for list variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidStorageKey(String),
    InvalidExportPrefix(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStorageKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::InvalidExportPrefix(prefix) => write!(f, "invalid export prefix `{prefix}`"),
        }
    }
}

impl Error for ConfigError {}

/// Parameters of one persisted list variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    storage_key: String,
    export_prefix: String,
    /// Classification every item in the collection uses.
    pub scheme: ClassificationScheme,
    /// Text fields that must be non-empty after trimming.
    pub required: Vec<ItemField>,
    pub insert_position: InsertPosition,
    pub duplicate_policy: DuplicatePolicy,
    /// Items created on first open when the slot does not exist yet.
    pub seed: Vec<NewItem>,
    /// Collection used when the slot holds unreadable data.
    pub fallback: Vec<Item>,
}

impl StoreConfig {
    /// Creates a configuration with only `PrimaryText` required, append
    /// insertion and `SkipExisting` import policy.
    ///
    /// The export prefix defaults to the storage key.
    pub fn new(
        storage_key: impl Into<String>,
        scheme: ClassificationScheme,
    ) -> Result<Self, ConfigError> {
        let storage_key = storage_key.into();
        if !SLOT_NAME_RE.is_match(&storage_key) {
            return Err(ConfigError::InvalidStorageKey(storage_key));
        }

        Ok(Self {
            export_prefix: storage_key.clone(),
            storage_key,
            scheme,
            required: vec![ItemField::PrimaryText],
            insert_position: InsertPosition::default(),
            duplicate_policy: DuplicatePolicy::default(),
            seed: Vec::new(),
            fallback: Vec::new(),
        })
    }

    /// Course task list: name and course required, appended, `tasks` slot.
    pub fn course_tasks() -> Self {
        Self::preset("tasks", ClassificationScheme::Flag)
            .with_required(&[ItemField::SecondaryText])
    }

    /// Dashboard task list: name required, newest first.
    pub fn dashboard_tasks() -> Self {
        let mut config = Self::preset("pd_tasks_v3", ClassificationScheme::Flag);
        config.insert_position = InsertPosition::Prepend;
        config.export_prefix = "tasks".to_string();
        config
    }

    /// Bookshelf catalog: title and author required, newest first, seeded
    /// with three sample books on first run. The same books stand in for an
    /// unreadable slot.
    pub fn bookshelf() -> Self {
        let mut config = Self::preset("books", ClassificationScheme::Status)
            .with_required(&[ItemField::SecondaryText]);
        config.insert_position = InsertPosition::Prepend;
        config.seed = vec![
            NewItem::new("1984").secondary("George Orwell"),
            NewItem::new("Atomic Habits")
                .secondary("James Clear")
                .classification(Classification::Status(ShelfStatus::Reading)),
            NewItem::new("The Psychology of Money")
                .secondary("Morgan Housel")
                .classification(Classification::Status(ShelfStatus::ToBuy)),
        ];
        config.fallback = config
            .seed
            .iter()
            .cloned()
            .map(|book| book.into_item(config.scheme.default_classification()))
            .collect();
        config
    }

    fn preset(storage_key: &'static str, scheme: ClassificationScheme) -> Self {
        Self {
            storage_key: storage_key.to_string(),
            export_prefix: storage_key.to_string(),
            scheme,
            required: vec![ItemField::PrimaryText],
            insert_position: InsertPosition::default(),
            duplicate_policy: DuplicatePolicy::default(),
            seed: Vec::new(),
            fallback: Vec::new(),
        }
    }

    /// Adds required fields; duplicates are ignored.
    pub fn with_required(mut self, fields: &[ItemField]) -> Self {
        for field in fields {
            if !self.required.contains(field) {
                self.required.push(*field);
            }
        }
        self.required.sort();
        self
    }

    pub fn with_insert_position(mut self, position: InsertPosition) -> Self {
        self.insert_position = position;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: Vec<NewItem>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_fallback(mut self, fallback: Vec<Item>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets the file name prefix used by exports.
    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if !SLOT_NAME_RE.is_match(&prefix) {
            return Err(ConfigError::InvalidExportPrefix(prefix));
        }
        self.export_prefix = prefix;
        Ok(self)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn export_prefix(&self) -> &str {
        &self.export_prefix
    }
}
