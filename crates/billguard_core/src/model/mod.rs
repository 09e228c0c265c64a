//! Domain model for tracked bills.
//!
//! # Responsibility
//! - Define the canonical bill record shared by store, urgency and notify.
//! - Own field-level validation so every write path applies the same rules.
//!
//! # Invariants
//! - A bill name is never empty after trimming.
//! - A bill amount is never negative.

pub mod bill;
