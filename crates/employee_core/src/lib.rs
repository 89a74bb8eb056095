//! Employee directory core: model, SQLite persistence and report rendering.
//! Every store invariant for the `employees` table is enforced here.

pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;

pub use db::{
    classify, ConnectionProvider, DbError, DbResult, SqliteConnectionProvider, StoreErrorKind,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{
    Employee, EmployeeField, EmployeeId, EmployeeValidationError, NewEmployee,
};
pub use report::{render_employee_table, EmployeeTable};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
