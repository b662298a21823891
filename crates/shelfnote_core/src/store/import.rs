//! Lenient record shape for imported documents.
//!
//! Exports from every list variant are accepted: task lists use
//! `name`/`course`/`deadline`/`done` or `text`/`notes`/`due`/`completed`,
//! the catalog uses `title`/`author`/`status`.

use crate::model::classification::{Classification, ClassificationScheme, Priority, ShelfStatus};
use crate::model::item::{normalize_optional, Item, ItemId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

const PRIMARY_KEYS: &[&str] = &["primaryText", "title", "name", "text"];
const SECONDARY_KEYS: &[&str] = &["secondaryText", "author", "course"];
const AUXILIARY_KEYS: &[&str] = &["auxiliary", "notes"];
const DUE_KEYS: &[&str] = &["due", "deadline"];
const COMPLETED_KEYS: &[&str] = &["completed", "done"];

/// One item-like object from an import document.
///
/// Every field is optional and mistyped values read as absent, so only a
/// missing id or primary text can disqualify a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRecord {
    pub id: Option<ItemId>,
    pub primary_text: Option<String>,
    pub secondary_text: Option<String>,
    pub auxiliary: Option<String>,
    pub due: Option<String>,
    pub completed: Option<bool>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for ImportRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_fields(&fields))
    }
}

impl ImportRecord {
    /// Reads a record from one JSON object.
    ///
    /// Aliases are tried in order and the first one holding a value of the
    /// right type wins. `createdAt` accepts RFC 3339 text or epoch millis.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let id = match fields.get("id") {
            Some(Value::String(text)) => Some(ItemId::from(text.as_str())),
            Some(Value::Number(number)) => Some(ItemId::from(number.to_string())),
            _ => None,
        };

        Self {
            id,
            primary_text: first_text(fields, PRIMARY_KEYS),
            secondary_text: first_text(fields, SECONDARY_KEYS),
            auxiliary: first_text(fields, AUXILIARY_KEYS),
            due: first_text(fields, DUE_KEYS),
            completed: COMPLETED_KEYS
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_bool)),
            status: first_text(fields, &["status"]),
            priority: first_text(fields, &["priority"]),
            created_at: fields.get("createdAt").and_then(parse_timestamp),
        }
    }

    pub fn new(id: impl Into<ItemId>, primary_text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            primary_text: Some(primary_text.into()),
            ..Self::default()
        }
    }

    /// Returns whether the record carries an id and a non-blank primary text.
    pub fn is_acceptable(&self) -> bool {
        let has_id = self.id.as_ref().is_some_and(|id| !id.is_blank());
        let has_text = self
            .primary_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        has_id && has_text
    }

    /// Converts into an item of the given scheme.
    ///
    /// Returns `None` for records that are not acceptable. Missing or
    /// unparseable classification, priority and timestamp fall back to
    /// defaults; `notes` wins over `due` for the auxiliary text.
    pub fn into_item(self, scheme: ClassificationScheme) -> Option<Item> {
        if !self.is_acceptable() {
            return None;
        }
        let id = self.id?;
        let primary_text = self.primary_text?.trim().to_string();

        let classification = match scheme {
            ClassificationScheme::Flag => Classification::Completed(self.completed.unwrap_or(false)),
            ClassificationScheme::Status => Classification::Status(
                self.status
                    .as_deref()
                    .and_then(ShelfStatus::parse)
                    .unwrap_or(ShelfStatus::Own),
            ),
        };

        let created_at = self.created_at.unwrap_or_else(Utc::now);

        Some(Item {
            id,
            primary_text,
            secondary_text: normalize_optional(self.secondary_text),
            classification,
            auxiliary: normalize_optional(self.auxiliary).or(normalize_optional(self.due)),
            priority: self
                .priority
                .as_deref()
                .and_then(Priority::parse)
                .unwrap_or_default(),
            created_at,
        })
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Number(number) => number.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
