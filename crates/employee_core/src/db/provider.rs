//! Connection acquisition for SQLite.
//!
//! # Responsibility
//! - Open a fresh file-backed SQLite connection per caller request.
//! - Configure connection pragmas required by repository behavior.
//!
//! # Invariants
//! - Returned connections are in auto-commit mode.
//! - Returned connections have `foreign_keys=ON`.
//! - Failures to open or configure surface as `DbError::Connection`.

use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Source of transient store connections.
///
/// The caller owns each returned handle; dropping it releases the
/// connection. No pooling or reuse happens behind this trait.
pub trait ConnectionProvider {
    fn acquire(&self) -> DbResult<Connection>;
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    fn acquire(&self) -> DbResult<Connection> {
        (**self).acquire()
    }
}

/// Opens connections to one SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteConnectionProvider {
    path: PathBuf,
}

impl SqliteConnectionProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Database file every acquired connection points at.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    /// Opens the database file, creating it when missing.
    ///
    /// # Side effects
    /// - Emits `db_open` logging events with duration and status.
    fn acquire(&self) -> DbResult<Connection> {
        let started_at = Instant::now();

        let conn = match Connection::open(&self.path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(DbError::Connection(err));
            }
        };

        match configure_connection(&conn) {
            Ok(()) => {
                info!(
                    "event=db_open module=db status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_configure_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(DbError::Connection(err))
            }
        }
    }
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
