//! SQLite connection acquisition and store error classification.
//!
//! # Responsibility
//! - Hand out fresh, configured SQLite connections per logical operation.
//! - Own the `employees` schema DDL and seed rows.
//! - Map raw `rusqlite` failures onto a small set of store error kinds.
//!
//! # Invariants
//! - Connections are never cached or shared between operations.
//! - Duplicate detection happens only in [`classify`], nowhere else.

use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod provider;
pub mod schema;

pub use provider::{ConnectionProvider, SqliteConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// The store could not be opened or configured.
    Connection(rusqlite::Error),
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Returns the underlying engine error.
    pub fn sqlite(&self) -> &rusqlite::Error {
        match self {
            Self::Connection(err) | Self::Sqlite(err) => err,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "cannot connect to database: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.sqlite())
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Coarse category of a store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    UniqueViolation { column: Option<String> },
    /// Any other constraint (NOT NULL, CHECK, ...) rejected the write.
    ConstraintViolation,
    /// The store could not be reached, opened or locked.
    Unavailable,
    Other,
}

// SQLite reports unique failures as "UNIQUE constraint failed: <table>.<column>".
static CONSTRAINT_COLUMN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"constraint failed: \w+\.(\w+)").ok());

/// Classifies a raw SQLite error.
///
/// This is the single place where constraint signals are inspected; callers
/// branch on the returned kind instead of engine codes or message text.
pub fn classify(err: &rusqlite::Error) -> StoreErrorKind {
    let rusqlite::Error::SqliteFailure(failure, message) = err else {
        return StoreErrorKind::Other;
    };

    match failure.code {
        ErrorCode::ConstraintViolation => {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
            {
                StoreErrorKind::UniqueViolation {
                    column: message.as_deref().and_then(violated_column),
                }
            } else {
                StoreErrorKind::ConstraintViolation
            }
        }
        ErrorCode::CannotOpen
        | ErrorCode::DatabaseBusy
        | ErrorCode::DatabaseLocked
        | ErrorCode::NotADatabase
        | ErrorCode::PermissionDenied
        | ErrorCode::SystemIoFailure => StoreErrorKind::Unavailable,
        _ => StoreErrorKind::Other,
    }
}

fn violated_column(message: &str) -> Option<String> {
    CONSTRAINT_COLUMN
        .as_ref()?
        .captures(message)
        .map(|caps| caps[1].to_string())
}
