//! Use-case services layered on top of the item store.
//!
//! # Responsibility
//! - Derive statistics from a collection snapshot.
//! - Manage the free-text notes slot.
//! - Move collections in and out of JSON files.

pub mod notes;
pub mod stats;
pub mod transfer;
