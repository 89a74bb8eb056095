//! Domain model for the employee directory.
//!
//! # Responsibility
//! - Define the persisted `Employee` record and its insert/update payload.
//! - Own field-level validation shared by every write path.
//!
//! # Invariants
//! - `Employee::id` is assigned by the store, never by callers.

pub mod employee;
