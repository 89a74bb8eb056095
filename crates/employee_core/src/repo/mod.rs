//! Repository layer for employee persistence.
//!
//! # Responsibility
//! - Own every SQL statement issued against the `employees` table.
//! - Own the transactional batch insert path.
//!
//! # Invariants
//! - Write payloads are validated before a connection is acquired.
//! - "Nothing matched" is reported as `Ok(None)` or `Ok(0)`, never as an
//!   error; store failures are always returned as `Err`.

mod batch;
pub mod employee_repo;
