//! `employees` table DDL and demo seed data.
//!
//! # Invariants
//! - `email` carries a UNIQUE constraint enforced by the store.
//! - Reset always leaves exactly the seed rows behind.

use rusqlite::{params, Connection};

/// Upper bound for every text column, mirrored by model validation.
pub const MAX_TEXT_LEN: usize = 100;

pub const DROP_TABLE_SQL: &str = "DROP TABLE IF EXISTS employees;";

pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(100) NOT NULL UNIQUE,
    country VARCHAR(100) NOT NULL
);";

/// Seed rows inserted after every reset, in id order.
pub const SEED_EMPLOYEES: &[(&str, &str, &str)] = &[
    ("John Doe", "john.doe@example.com", "USA"),
    ("Jane Smith", "jane.smith@example.com", "UK"),
];

/// Drops, recreates and seeds the `employees` table in one transaction.
pub fn reset_employees_table(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(DROP_TABLE_SQL)?;
    tx.execute_batch(CREATE_TABLE_SQL)?;
    {
        let mut stmt =
            tx.prepare("INSERT INTO employees (name, email, country) VALUES (?1, ?2, ?3);")?;
        for (name, email, country) in SEED_EMPLOYEES {
            stmt.execute(params![name, email, country])?;
        }
    }
    tx.commit()
}
