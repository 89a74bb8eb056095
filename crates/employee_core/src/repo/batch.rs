//! Transactional batch insert.
//!
//! # Responsibility
//! - Insert a set of employees as one all-or-nothing unit.
//! - Leave the connection in auto-commit mode on every exit path.
//!
//! # Invariants
//! - A failed batch leaves the table exactly as it was before the call.
//! - Rollback failures are logged, never escalated over the original error.

use crate::model::employee::NewEmployee;
use crate::repo::employee_repo::{write_error, RepoResult, INSERT_SQL};
use log::{error, info, warn};
use rusqlite::{params, Connection, DropBehavior, Transaction, TransactionBehavior};

/// Rows queued against one prepared insert statement.
struct InsertBatch<'a> {
    rows: Vec<&'a NewEmployee>,
}

impl<'a> InsertBatch<'a> {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn add(&mut self, employee: &'a NewEmployee) {
        self.rows.push(employee);
    }

    /// Runs every queued insert inside `tx`; returns per-row affected counts.
    fn execute(self, tx: &Transaction<'_>) -> RepoResult<Vec<usize>> {
        let mut stmt = tx.prepare(INSERT_SQL)?;
        let mut results = Vec::with_capacity(self.rows.len());
        for employee in self.rows {
            let changed = stmt
                .execute(params![
                    employee.name.as_str(),
                    employee.email.as_str(),
                    employee.country.as_str(),
                ])
                .map_err(|err| write_error(err, &employee.email))?;
            results.push(changed);
        }
        Ok(results)
    }
}

/// Inserts `employees` on `conn` inside one explicit transaction.
///
/// Commits when every insert succeeds, otherwise rolls back and returns the
/// first failure. `conn` is back in auto-commit mode when this returns.
pub(crate) fn run_batch(conn: &Connection, employees: &[NewEmployee]) -> RepoResult<usize> {
    let result = run_in_transaction(conn, employees);
    restore_autocommit(conn);
    result
}

fn run_in_transaction(conn: &Connection, employees: &[NewEmployee]) -> RepoResult<usize> {
    let mut tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    // A failed COMMIT leaves the transaction open; it is rolled back below.
    tx.set_drop_behavior(DropBehavior::Ignore);

    let mut batch = InsertBatch::new();
    for employee in employees {
        batch.add(employee);
    }

    match batch.execute(&tx) {
        Ok(results) => {
            if let Err(err) = tx.commit() {
                error!(
                    "event=batch_insert module=repo status=error stage=commit requested={} error={}",
                    employees.len(),
                    err
                );
                log_rollback(conn.execute_batch("ROLLBACK;"));
                return Err(err.into());
            }
            let inserted: usize = results.iter().sum();
            info!(
                "event=batch_insert module=repo status=ok requested={} inserted={}",
                employees.len(),
                inserted
            );
            Ok(inserted)
        }
        Err(err) => {
            error!(
                "event=batch_insert module=repo status=error requested={} error={}",
                employees.len(),
                err
            );
            log_rollback(tx.rollback());
            Err(err)
        }
    }
}

fn log_rollback(result: rusqlite::Result<()>) {
    match result {
        Ok(()) => info!("event=batch_rollback module=repo status=ok"),
        Err(err) => error!("event=batch_rollback module=repo status=error error={err}"),
    }
}

fn restore_autocommit(conn: &Connection) {
    if conn.is_autocommit() {
        return;
    }

    warn!("event=batch_autocommit_restore module=repo status=start");
    if let Err(err) = conn.execute_batch("ROLLBACK;") {
        error!("event=batch_autocommit_restore module=repo status=error error={err}");
    }
}
