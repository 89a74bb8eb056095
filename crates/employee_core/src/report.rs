//! Fixed-width text rendering of employee listings.

use crate::model::employee::Employee;
use std::fmt;

const BORDER: &str = "+----+--------------+---------------------------+---------------+";
const HEADER: &str = "| ID | Name         | Email                     | Country       |";

/// Message rendered in place of a table when there are no rows.
pub const EMPTY_LISTING: &str = "No employees found.";

/// Bordered table view over a slice of employees, one line per row.
///
/// Values wider than their column overflow rather than being truncated.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeTable<'a>(pub &'a [Employee]);

impl fmt::Display for EmployeeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "{EMPTY_LISTING}");
        }

        writeln!(f, "{BORDER}")?;
        writeln!(f, "{HEADER}")?;
        writeln!(f, "{BORDER}")?;
        for employee in self.0 {
            writeln!(
                f,
                "| {:>2} | {:<12} | {:>25} | {:<13} |",
                employee.id, employee.name, employee.email, employee.country
            )?;
        }
        writeln!(f, "{BORDER}")
    }
}

/// Renders employees as a bordered table into an owned string.
pub fn render_employee_table(employees: &[Employee]) -> String {
    EmployeeTable(employees).to_string()
}
