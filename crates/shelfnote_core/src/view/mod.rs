//! Derived views over an item snapshot.
//!
//! # Responsibility
//! - Compute the visible subset for a query and classification selector.
//! - Stay pure: no storage access, no mutation.

pub mod filter;
