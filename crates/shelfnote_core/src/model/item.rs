//! Item domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by task and catalog lists.
//! - Provide validation of required text fields.
//!
//! # Invariants
//! - `id` is stable and never reassigned after creation.
//! - `created_at` is set once at creation and never mutated.
//! - Stored text fields are trimmed; optional fields are `None` rather than
//!   empty strings.

use crate::model::classification::{Classification, ClassificationScheme, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier for one item.
///
/// Generated ids are UUID v4 text. Imported documents may carry numeric ids,
/// which are kept verbatim as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether the identifier carries no usable text.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// Text fields that a list variant may declare as required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    /// Task name or book title.
    PrimaryText,
    /// Course name or author.
    SecondaryText,
    /// Note or deadline.
    Auxiliary,
}

impl ItemField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryText => "primary_text",
            Self::SecondaryText => "secondary_text",
            Self::Auxiliary => "auxiliary",
        }
    }
}

impl Display for ItemField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for item submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are empty after trimming.
    MissingFields(Vec<ItemField>),
    /// Classification value does not belong to the collection scheme.
    SchemeMismatch { expected: ClassificationScheme },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                let names = fields
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "required fields are empty: {names}")
            }
            Self::SchemeMismatch { expected } => {
                write!(f, "classification must use the `{expected}` scheme")
            }
        }
    }
}

impl Error for ValidationError {}

/// Canonical record for one task or catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// Task name or book title.
    pub primary_text: String,
    /// Course name or author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    /// Flattened as `completed` or `status`.
    #[serde(flatten)]
    pub classification: Classification,
    /// Free-text note or deadline. Never filtered on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Returns the text of one field, treating empty optional fields as
    /// absent.
    pub fn field_text(&self, field: ItemField) -> Option<&str> {
        let value = match field {
            ItemField::PrimaryText => Some(self.primary_text.as_str()),
            ItemField::SecondaryText => self.secondary_text.as_deref(),
            ItemField::Auxiliary => self.auxiliary.as_deref(),
        };
        value.filter(|text| !text.trim().is_empty())
    }

    /// Checks required fields and classification scheme.
    ///
    /// Missing fields are reported together, in declaration order.
    pub fn validate(
        &self,
        required: &[ItemField],
        scheme: ClassificationScheme,
    ) -> Result<(), ValidationError> {
        let mut missing = required
            .iter()
            .copied()
            .filter(|field| self.field_text(*field).is_none())
            .collect::<Vec<_>>();
        if self.primary_text.trim().is_empty() && !missing.contains(&ItemField::PrimaryText) {
            missing.push(ItemField::PrimaryText);
        }
        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            return Err(ValidationError::MissingFields(missing));
        }

        if self.classification.scheme() != scheme {
            return Err(ValidationError::SchemeMismatch { expected: scheme });
        }

        Ok(())
    }

    /// Applies a patch in place. `id` and `created_at` are never touched.
    pub fn apply_patch(&mut self, patch: ItemPatch) {
        if let Some(primary) = patch.primary_text {
            self.primary_text = primary.trim().to_string();
        }
        if let Some(secondary) = patch.secondary_text {
            self.secondary_text = normalize_optional(Some(secondary));
        }
        if let Some(auxiliary) = patch.auxiliary {
            self.auxiliary = normalize_optional(Some(auxiliary));
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(classification) = patch.classification {
            self.classification = classification;
        }
    }
}

/// User submission for a new item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub primary_text: String,
    pub secondary_text: Option<String>,
    pub auxiliary: Option<String>,
    pub priority: Priority,
    /// Explicit initial classification; scheme default when `None`.
    pub classification: Option<Classification>,
}

impl NewItem {
    pub fn new(primary_text: impl Into<String>) -> Self {
        Self {
            primary_text: primary_text.into(),
            ..Self::default()
        }
    }

    pub fn secondary(mut self, value: impl Into<String>) -> Self {
        self.secondary_text = Some(value.into());
        self
    }

    pub fn auxiliary(mut self, value: impl Into<String>) -> Self {
        self.auxiliary = Some(value.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Builds a full item with a fresh id and the current time.
    ///
    /// Text fields are trimmed; validation is left to the caller.
    pub fn into_item(self, default_classification: Classification) -> Item {
        Item {
            id: ItemId::generate(),
            primary_text: self.primary_text.trim().to_string(),
            secondary_text: normalize_optional(self.secondary_text),
            classification: self.classification.unwrap_or(default_classification),
            auxiliary: normalize_optional(self.auxiliary),
            priority: self.priority,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for an existing item.
///
/// `None` leaves a field unchanged. For optional text fields, an empty
/// string clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub primary_text: Option<String>,
    pub secondary_text: Option<String>,
    pub auxiliary: Option<String>,
    pub priority: Option<Priority>,
    pub classification: Option<Classification>,
}

impl ItemPatch {
    pub fn primary(mut self, value: impl Into<String>) -> Self {
        self.primary_text = Some(value.into());
        self
    }

    pub fn secondary(mut self, value: impl Into<String>) -> Self {
        self.secondary_text = Some(value.into());
        self
    }

    pub fn auxiliary(mut self, value: impl Into<String>) -> Self {
        self.auxiliary = Some(value.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }
}

/// Trims optional text, mapping blank input to `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{normalize_optional, ItemField, ItemPatch, NewItem, ValidationError};
    use crate::model::classification::{Classification, ClassificationScheme};

    #[test]
    fn new_item_trims_text_and_drops_blank_optionals() {
        let item = NewItem::new("  Essay ")
            .secondary(" History ")
            .auxiliary("   ")
            .into_item(Classification::Completed(false));

        assert_eq!(item.primary_text, "Essay");
        assert_eq!(item.secondary_text.as_deref(), Some("History"));
        assert_eq!(item.auxiliary, None);
        assert!(!item.id.is_blank());
    }

    #[test]
    fn validate_names_every_missing_field() {
        let item = NewItem::new(" ").into_item(Classification::Completed(false));
        let err = item
            .validate(
                &[ItemField::PrimaryText, ItemField::SecondaryText],
                ClassificationScheme::Flag,
            )
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::MissingFields(vec![ItemField::PrimaryText, ItemField::SecondaryText])
        );
        assert!(err.to_string().contains("secondary_text"));
    }

    #[test]
    fn primary_text_is_always_required() {
        let item = NewItem::new("").into_item(Classification::Completed(false));
        let err = item.validate(&[], ClassificationScheme::Flag).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![ItemField::PrimaryText])
        );
    }

    #[test]
    fn patch_keeps_identity_fields() {
        let mut item = NewItem::new("draft").into_item(Classification::Completed(false));
        let id = item.id.clone();
        let created_at = item.created_at;

        item.apply_patch(ItemPatch::default().primary(" final ").auxiliary(""));

        assert_eq!(item.id, id);
        assert_eq!(item.created_at, created_at);
        assert_eq!(item.primary_text, "final");
        assert_eq!(item.auxiliary, None);
    }

    #[test]
    fn normalize_optional_maps_blank_to_none() {
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(normalize_optional(None), None);
        assert_eq!(
            normalize_optional(Some(" x ".to_string())).as_deref(),
            Some("x")
        );
    }
}
