//! Query and classification filter.
//!
//! # Invariants
//! - Output order is the input order.
//! - Applying the same filter twice yields the same result as once.
//! - A blank query with `All` returns the input unchanged.

use crate::model::classification::{Classification, ShelfStatus};
use crate::model::item::Item;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Classification selector shown next to the search box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassificationFilter {
    #[default]
    All,
    /// Flag items with `completed = true`.
    Completed,
    /// Flag items with `completed = false`.
    Pending,
    /// Status items with the given status.
    Status(ShelfStatus),
}

impl ClassificationFilter {
    pub fn matches(self, classification: Classification) -> bool {
        match (self, classification) {
            (Self::All, _) => true,
            (Self::Completed, Classification::Completed(done)) => done,
            (Self::Pending, Classification::Completed(done)) => !done,
            (Self::Status(wanted), Classification::Status(actual)) => wanted == actual,
            _ => false,
        }
    }
}

/// Unknown selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown classification filter `{}`; expected all|done|completed|pending|own|reading|to-buy",
            self.0
        )
    }
}

impl Error for UnknownFilter {}

impl FromStr for ClassificationFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Self::All),
            "done" | "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            other => ShelfStatus::parse(other)
                .map(Self::Status)
                .ok_or_else(|| UnknownFilter(value.to_string())),
        }
    }
}

/// Search text plus classification selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Free text; whitespace-only counts as no query.
    pub query: String,
    pub classification: ClassificationFilter,
}

impl ViewFilter {
    pub fn new(query: impl Into<String>, classification: ClassificationFilter) -> Self {
        Self {
            query: query.into(),
            classification,
        }
    }

    /// Filter that lets every item through.
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns whether one item is visible.
    pub fn matches(&self, item: &Item) -> bool {
        let needle = self.folded_query();
        self.matches_folded(item, needle.as_deref())
    }

    /// Returns the visible items in input order.
    pub fn apply<'a, I>(&self, items: I) -> Vec<&'a Item>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let needle = self.folded_query();
        items
            .into_iter()
            .filter(|item| self.matches_folded(item, needle.as_deref()))
            .collect()
    }

    fn folded_query(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return None;
        }
        Some(self.query.to_lowercase())
    }

    fn matches_folded(&self, item: &Item, needle: Option<&str>) -> bool {
        if !self.classification.matches(item.classification) {
            return false;
        }
        let Some(needle) = needle else {
            return true;
        };

        item.primary_text.to_lowercase().contains(needle)
            || item
                .secondary_text
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle))
    }
}
