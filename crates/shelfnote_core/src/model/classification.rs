//! Classification schemes for list items.
//!
//! # Responsibility
//! - Define the closed set of states an item can be in.
//! - Own the toggle/cycle rules for each scheme.
//!
//! # Invariants
//! - A collection uses exactly one scheme; an item never carries both a
//!   completion flag and a shelf status.
//! - Status cycling has period 3: `own -> reading -> to-buy -> own`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Which classification a list variant tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationScheme {
    /// Boolean `completed` flag (task lists).
    Flag,
    /// Enumerated shelf status (book catalog).
    Status,
}

impl ClassificationScheme {
    /// Default classification assigned to newly created items.
    pub fn default_classification(self) -> Classification {
        match self {
            Self::Flag => Classification::Completed(false),
            Self::Status => Classification::Status(ShelfStatus::Own),
        }
    }
}

impl Display for ClassificationScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "flag"),
            Self::Status => write!(f, "status"),
        }
    }
}

/// Catalog status for the bookshelf variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShelfStatus {
    /// Already on the shelf.
    Own,
    /// Currently being read.
    Reading,
    /// Wish list entry.
    ToBuy,
}

impl ShelfStatus {
    /// All statuses in cycle order.
    pub const ALL: [ShelfStatus; 3] = [Self::Own, Self::Reading, Self::ToBuy];

    /// Next status in the fixed cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Own => Self::Reading,
            Self::Reading => Self::ToBuy,
            Self::ToBuy => Self::Own,
        }
    }

    /// Wire name used in storage and filter selectors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Reading => "reading",
            Self::ToBuy => "to-buy",
        }
    }

    /// Parses a wire name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "own" => Some(Self::Own),
            "reading" => Some(Self::Reading),
            "to-buy" | "to_buy" => Some(Self::ToBuy),
            _ => None,
        }
    }
}

impl Display for ShelfStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority carried by the dashboard variant. Not used for filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parses a wire name; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Classification value of one item.
///
/// Serialized as a single flattened key on the item object: either
/// `"completed": <bool>` or `"status": "<own|reading|to-buy>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Completed(bool),
    Status(ShelfStatus),
}

impl Classification {
    /// Scheme this value belongs to.
    pub fn scheme(self) -> ClassificationScheme {
        match self {
            Self::Completed(_) => ClassificationScheme::Flag,
            Self::Status(_) => ClassificationScheme::Status,
        }
    }

    /// Flips the flag or advances the status cycle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Completed(done) => Self::Completed(!done),
            Self::Status(status) => Self::Status(status.next()),
        }
    }

    /// Returns `true` for a completed flag item; status items are never
    /// considered completed.
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed(true))
    }
}
