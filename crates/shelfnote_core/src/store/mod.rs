//! Item store: the authoritative persisted collection.
//!
//! # Responsibility
//! - Keep create/update/toggle/delete/import keyed on stable ids.
//! - Isolate slot encoding from callers.
//!
//! # Invariants
//! - Callers only ever see read-only snapshots of the collection.

pub mod import;
pub mod item_store;
