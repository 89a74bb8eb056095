//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `employees` table.
//! - Translate store failures into domain errors at one boundary.
//!
//! # Invariants
//! - Each call acquires its own connection and releases it before returning.
//! - Unique-email violations surface as `RepoError::DuplicateEmail`.
//! - Update-by-name/email affect every matching row.

use crate::db::schema::reset_employees_table;
use crate::db::{classify, ConnectionProvider, DbError, StoreErrorKind};
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError, NewEmployee};
use crate::repo::batch::run_batch;
use log::{error, info, warn};
use rusqlite::{params, Connection, Row, ToSql};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) const INSERT_SQL: &str =
    "INSERT INTO employees (name, email, country) VALUES (?1, ?2, ?3);";

const SELECT_ALL_SQL: &str = "SELECT id, name, email, country FROM employees ORDER BY id;";

const SELECT_BY_ID_SQL: &str = "SELECT id, name, email, country FROM employees WHERE id = ?1;";

const UPDATE_BY_ID_SQL: &str =
    "UPDATE employees SET name = ?1, email = ?2, country = ?3 WHERE id = ?4;";

const UPDATE_BY_NAME_SQL: &str =
    "UPDATE employees SET name = ?1, email = ?2, country = ?3 WHERE name = ?4;";

const UPDATE_BY_EMAIL_SQL: &str =
    "UPDATE employees SET name = ?1, email = ?2, country = ?3 WHERE email = ?4;";

const DELETE_BY_ID_SQL: &str = "DELETE FROM employees WHERE id = ?1;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    /// The store could not be reached or opened.
    Connection(DbError),
    /// Another row already uses this email.
    DuplicateEmail { email: String },
    /// Any other store-level failure.
    Persistence(DbError),
    /// Dropping, creating or seeding the table failed.
    Schema(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Connection(err) => write!(f, "{err}"),
            Self::DuplicateEmail { email } => write!(f, "email '{email}' already exists"),
            Self::Persistence(err) => write!(f, "database operation failed: {err}"),
            Self::Schema(err) => write!(f, "schema initialization failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Connection(err) | Self::Persistence(err) | Self::Schema(err) => Some(err),
            Self::DuplicateEmail { .. } => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Connection(_) => Self::Connection(value),
            DbError::Sqlite(_) => Self::Persistence(value),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Persistence(DbError::Sqlite(value))
    }
}

/// Maps a failed write carrying `email` onto a domain error.
pub(crate) fn write_error(err: rusqlite::Error, email: &str) -> RepoError {
    match classify(&err) {
        StoreErrorKind::UniqueViolation { column }
            if column.as_deref().map_or(true, |name| name == "email") =>
        {
            RepoError::DuplicateEmail {
                email: email.to_string(),
            }
        }
        _ => err.into(),
    }
}

/// Repository interface for employee CRUD operations.
pub trait EmployeeRepository {
    /// Drops, recreates and seeds the `employees` table.
    fn initialize_schema(&self) -> RepoResult<()>;
    /// Inserts one employee and returns its store-assigned id.
    fn insert(&self, employee: &NewEmployee) -> RepoResult<EmployeeId>;
    /// Inserts all employees atomically and returns the inserted row count.
    fn batch_insert(&self, employees: &[NewEmployee]) -> RepoResult<usize>;
    /// Lists every employee ordered by id.
    fn list_all(&self) -> RepoResult<Vec<Employee>>;
    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Overwrites name/email/country of the row with `id`; returns rows affected.
    fn update_by_id(&self, id: EmployeeId, changes: &NewEmployee) -> RepoResult<usize>;
    /// Overwrites every row whose name equals `name`; returns rows affected.
    fn update_by_name(&self, name: &str, changes: &NewEmployee) -> RepoResult<usize>;
    /// Overwrites the row whose email equals `email`; returns rows affected.
    fn update_by_email(&self, email: &str, changes: &NewEmployee) -> RepoResult<usize>;
    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<usize>;
}

impl<T: EmployeeRepository + ?Sized> EmployeeRepository for &T {
    fn initialize_schema(&self) -> RepoResult<()> {
        (**self).initialize_schema()
    }

    fn insert(&self, employee: &NewEmployee) -> RepoResult<EmployeeId> {
        (**self).insert(employee)
    }

    fn batch_insert(&self, employees: &[NewEmployee]) -> RepoResult<usize> {
        (**self).batch_insert(employees)
    }

    fn list_all(&self) -> RepoResult<Vec<Employee>> {
        (**self).list_all()
    }

    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        (**self).get_by_id(id)
    }

    fn update_by_id(&self, id: EmployeeId, changes: &NewEmployee) -> RepoResult<usize> {
        (**self).update_by_id(id, changes)
    }

    fn update_by_name(&self, name: &str, changes: &NewEmployee) -> RepoResult<usize> {
        (**self).update_by_name(name, changes)
    }

    fn update_by_email(&self, email: &str, changes: &NewEmployee) -> RepoResult<usize> {
        (**self).update_by_email(email, changes)
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<usize> {
        (**self).delete_by_id(id)
    }
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteEmployeeRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    fn connect(&self) -> RepoResult<Connection> {
        self.provider.acquire().map_err(|err| match err {
            DbError::Connection(_) => RepoError::Connection(err),
            DbError::Sqlite(inner) => RepoError::Connection(DbError::Connection(inner)),
        })
    }

    fn update_where(
        &self,
        op: &str,
        sql: &str,
        key: &dyn ToSql,
        changes: &NewEmployee,
    ) -> RepoResult<usize> {
        changes.validate()?;

        let conn = self.connect()?;
        let result = conn
            .execute(
                sql,
                params![
                    changes.name.as_str(),
                    changes.email.as_str(),
                    changes.country.as_str(),
                    key,
                ],
            )
            .map_err(|err| write_error(err, &changes.email));
        release(conn);

        match &result {
            Ok(changed) => info!("event={op} module=repo status=ok rows_affected={changed}"),
            Err(err) => error!("event={op} module=repo status=error error={err}"),
        }
        result
    }
}

impl<P: ConnectionProvider> EmployeeRepository for SqliteEmployeeRepository<P> {
    fn initialize_schema(&self) -> RepoResult<()> {
        let mut conn = self.connect()?;
        let result = reset_employees_table(&mut conn)
            .map_err(|err| RepoError::Schema(DbError::Sqlite(err)));
        release(conn);

        match &result {
            Ok(()) => info!("event=schema_init module=repo status=ok"),
            Err(err) => error!("event=schema_init module=repo status=error error={err}"),
        }
        result
    }

    fn insert(&self, employee: &NewEmployee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        let conn = self.connect()?;
        let result = conn
            .execute(
                INSERT_SQL,
                params![
                    employee.name.as_str(),
                    employee.email.as_str(),
                    employee.country.as_str(),
                ],
            )
            .map(|_| conn.last_insert_rowid())
            .map_err(|err| write_error(err, &employee.email));
        release(conn);

        match &result {
            Ok(id) => info!("event=employee_insert module=repo status=ok id={id}"),
            Err(RepoError::DuplicateEmail { .. }) => {
                warn!("event=employee_insert module=repo status=conflict reason=duplicate_email")
            }
            Err(err) => error!("event=employee_insert module=repo status=error error={err}"),
        }
        result
    }

    fn batch_insert(&self, employees: &[NewEmployee]) -> RepoResult<usize> {
        if employees.is_empty() {
            info!("event=batch_insert module=repo status=skipped reason=empty_input");
            return Ok(0);
        }
        for employee in employees {
            employee.validate()?;
        }

        let conn = self.connect()?;
        let result = run_batch(&conn, employees);
        release(conn);
        result
    }

    fn list_all(&self) -> RepoResult<Vec<Employee>> {
        let conn = self.connect()?;
        let result = query_all(&conn);
        release(conn);

        if let Err(err) = &result {
            error!("event=employee_list module=repo status=error error={err}");
        }
        result
    }

    fn get_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let conn = self.connect()?;
        let result = query_by_id(&conn, id);
        release(conn);

        if let Err(err) = &result {
            error!("event=employee_get module=repo status=error id={id} error={err}");
        }
        result
    }

    fn update_by_id(&self, id: EmployeeId, changes: &NewEmployee) -> RepoResult<usize> {
        self.update_where("employee_update_by_id", UPDATE_BY_ID_SQL, &id, changes)
    }

    fn update_by_name(&self, name: &str, changes: &NewEmployee) -> RepoResult<usize> {
        self.update_where("employee_update_by_name", UPDATE_BY_NAME_SQL, &name, changes)
    }

    fn update_by_email(&self, email: &str, changes: &NewEmployee) -> RepoResult<usize> {
        self.update_where(
            "employee_update_by_email",
            UPDATE_BY_EMAIL_SQL,
            &email,
            changes,
        )
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<usize> {
        let conn = self.connect()?;
        let result = conn
            .execute(DELETE_BY_ID_SQL, [id])
            .map_err(RepoError::from);
        release(conn);

        match &result {
            Ok(deleted) => {
                info!("event=employee_delete module=repo status=ok id={id} rows_affected={deleted}")
            }
            Err(err) => error!("event=employee_delete module=repo status=error id={id} error={err}"),
        }
        result
    }
}

fn query_all(conn: &Connection) -> RepoResult<Vec<Employee>> {
    let mut stmt = conn.prepare(SELECT_ALL_SQL)?;
    let mut rows = stmt.query([])?;
    let mut employees = Vec::new();

    while let Some(row) = rows.next()? {
        employees.push(parse_employee_row(row)?);
    }

    Ok(employees)
}

fn query_by_id(conn: &Connection, id: EmployeeId) -> RepoResult<Option<Employee>> {
    let mut stmt = conn.prepare(SELECT_BY_ID_SQL)?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_employee_row(row)?));
    }

    Ok(None)
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        country: row.get("country")?,
    })
}

/// Closes a connection, logging instead of failing on close errors.
pub(crate) fn release(conn: Connection) {
    if let Err((_, err)) = conn.close() {
        warn!("event=db_close module=repo status=error error={err}");
    }
}
