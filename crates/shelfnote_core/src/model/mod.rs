//! Domain model for persisted list items.
//!
//! # Responsibility
//! - Define canonical data structures used by the item store and view filter.
//! - Keep one item shape for task and catalog variants.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Deletion is permanent; there are no tombstones.

pub mod classification;
pub mod item;
