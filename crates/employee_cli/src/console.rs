//! Interactive menu loop over an employee repository.
//!
//! # Responsibility
//! - Prompt for input, dispatch to repository operations, print outcomes.
//! - Keep I/O injectable so sessions can be scripted in tests.
//!
//! # Invariants
//! - Repository failures are printed, never propagated out of the loop.
//! - End of input ends the session like choosing exit.

use employee_core::{
    render_employee_table, EmployeeId, EmployeeRepository, NewEmployee, RepoError,
};
use std::io::{self, BufRead, Write};

const MENU: &str = "
----------- MENU -----------
1. List all employees
2. Add new employee
3. Update employee by ID
4. Delete employee by ID
5. Batch insert sample employees
6. Find employee by ID
7. Update employee by name
8. Update employee by email
0. Exit
----------------------------";

const SAMPLE_EMPLOYEES: &[(&str, &str, &str)] = &[
    ("Emily Davis", "emily@example.com", "Australia"),
    ("David Brown", "david@example.com", "Germany"),
    ("Laura Wilson", "laura@example.com", "France"),
    ("Mike Johnson", "mike@example.com", "Canada"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    List,
    Add,
    UpdateById,
    DeleteById,
    BatchInsertSamples,
    FindById,
    UpdateByName,
    UpdateByEmail,
    Exit,
}

impl MenuChoice {
    fn from_number(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::List),
            2 => Some(Self::Add),
            3 => Some(Self::UpdateById),
            4 => Some(Self::DeleteById),
            5 => Some(Self::BatchInsertSamples),
            6 => Some(Self::FindById),
            7 => Some(Self::UpdateByName),
            8 => Some(Self::UpdateByEmail),
            0 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Console session bound to one input source, output sink and repository.
pub struct Console<R, W, Repo> {
    input: R,
    output: W,
    repo: Repo,
}

impl<R: BufRead, W: Write, Repo: EmployeeRepository> Console<R, W, Repo> {
    pub fn new(input: R, output: W, repo: Repo) -> Self {
        Self {
            input,
            output,
            repo,
        }
    }

    /// Runs the menu loop until exit is chosen or input is exhausted.
    ///
    /// # Errors
    /// Returns only I/O errors from the input source or output sink.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "=== Employee Management System (SQLite) ===")?;

        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(number) = self.read_int("Enter your choice: ")? else {
                break;
            };

            let completed = match MenuChoice::from_number(number) {
                Some(MenuChoice::List) => self.print_employees().map(Some)?,
                Some(MenuChoice::Add) => self.add_employee()?,
                Some(MenuChoice::UpdateById) => self.update_by_id()?,
                Some(MenuChoice::DeleteById) => self.delete_by_id()?,
                Some(MenuChoice::BatchInsertSamples) => self.batch_insert_samples().map(Some)?,
                Some(MenuChoice::FindById) => self.find_by_id()?,
                Some(MenuChoice::UpdateByName) => self.update_by_name()?,
                Some(MenuChoice::UpdateByEmail) => self.update_by_email()?,
                Some(MenuChoice::Exit) => break,
                None => {
                    writeln!(self.output, "Invalid choice, please try again.")?;
                    Some(())
                }
            };
            if completed.is_none() {
                break;
            }
        }

        writeln!(self.output, "Exiting application. Goodbye!")?;
        self.output.flush()
    }

    /// Consumes the session and returns the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    fn print_employees(&mut self) -> io::Result<()> {
        match self.repo.list_all() {
            Ok(employees) => writeln!(self.output, "{}", render_employee_table(&employees)),
            Err(err) => writeln!(self.output, "Failed to list employees: {err}"),
        }
    }

    fn add_employee(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "\n--- Add New Employee ---")?;
        let Some(employee) = self.read_employee_fields("")? else {
            return Ok(None);
        };

        match self.repo.insert(&employee) {
            Ok(_) => writeln!(self.output, "Employee inserted successfully.")?,
            Err(RepoError::DuplicateEmail { email }) => writeln!(
                self.output,
                "Failed to insert employee: email '{email}' already exists."
            )?,
            Err(err) => writeln!(self.output, "Failed to insert employee: {err}")?,
        }
        Ok(Some(()))
    }

    fn update_by_id(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "\n--- Update Employee By ID ---")?;
        let Some(id) = self.read_id("Enter employee ID: ")? else {
            return Ok(None);
        };
        let Some(changes) = self.read_employee_fields("New ")? else {
            return Ok(None);
        };

        match self.repo.update_by_id(id, &changes) {
            Ok(0) => writeln!(self.output, "No employee found with ID: {id}")?,
            Ok(_) => writeln!(self.output, "Employee with ID {id} updated successfully.")?,
            Err(err) => self.report_update_failure(&err)?,
        }
        Ok(Some(()))
    }

    fn update_by_name(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "\n--- Update Employee By Name ---")?;
        let Some(name) = self.read_non_empty("Enter employee name: ")? else {
            return Ok(None);
        };
        let Some(changes) = self.read_employee_fields("New ")? else {
            return Ok(None);
        };

        match self.repo.update_by_name(&name, &changes) {
            Ok(0) => writeln!(self.output, "No employee found with name: {name}")?,
            Ok(_) => writeln!(
                self.output,
                "Employee(s) with name '{name}' updated successfully."
            )?,
            Err(err) => self.report_update_failure(&err)?,
        }
        Ok(Some(()))
    }

    fn update_by_email(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "\n--- Update Employee By Email ---")?;
        let Some(email) = self.read_non_empty("Enter employee email: ")? else {
            return Ok(None);
        };
        let Some(changes) = self.read_employee_fields("New ")? else {
            return Ok(None);
        };

        match self.repo.update_by_email(&email, &changes) {
            Ok(0) => writeln!(self.output, "No employee found with email: {email}")?,
            Ok(_) => writeln!(
                self.output,
                "Employee with email '{email}' updated successfully."
            )?,
            Err(err) => self.report_update_failure(&err)?,
        }
        Ok(Some(()))
    }

    fn report_update_failure(&mut self, err: &RepoError) -> io::Result<()> {
        match err {
            RepoError::DuplicateEmail { email } => writeln!(
                self.output,
                "Failed to update employee: email '{email}' already exists."
            ),
            other => writeln!(self.output, "Failed to update employee: {other}"),
        }
    }

    fn delete_by_id(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "\n--- Delete Employee By ID ---")?;
        let Some(id) = self.read_id("Enter employee ID to delete: ")? else {
            return Ok(None);
        };

        match self.repo.delete_by_id(id) {
            Ok(0) => writeln!(self.output, "No employee found with ID: {id}")?,
            Ok(_) => writeln!(self.output, "Employee with ID {id} deleted successfully.")?,
            Err(err) => writeln!(self.output, "Failed to delete employee: {err}")?,
        }
        Ok(Some(()))
    }

    fn batch_insert_samples(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Batch Insert Sample Employees ---")?;
        let employees: Vec<NewEmployee> = SAMPLE_EMPLOYEES
            .iter()
            .map(|(name, email, country)| NewEmployee::new(*name, *email, *country))
            .collect();

        match self.repo.batch_insert(&employees) {
            Ok(inserted) => writeln!(
                self.output,
                "Batch executed successfully. Inserted {inserted} records."
            )?,
            Err(err) => writeln!(
                self.output,
                "Batch insert failed, transaction rolled back: {err}"
            )?,
        }
        self.print_employees()
    }

    fn find_by_id(&mut self) -> io::Result<Option<()>> {
        writeln!(self.output, "\n--- Find Employee By ID ---")?;
        let Some(id) = self.read_id("Enter employee ID: ")? else {
            return Ok(None);
        };

        match self.repo.get_by_id(id) {
            Ok(Some(employee)) => writeln!(self.output, "Found: {employee}")?,
            Ok(None) => writeln!(self.output, "No employee found with ID: {id}")?,
            Err(err) => writeln!(self.output, "Failed to look up employee: {err}")?,
        }
        Ok(Some(()))
    }

    /// Prompts for name, email and country; `prefix` is prepended to labels.
    fn read_employee_fields(&mut self, prefix: &str) -> io::Result<Option<NewEmployee>> {
        let (name_label, email_label, country_label) = if prefix.is_empty() {
            ("Name: ".to_string(), "Email: ".to_string(), "Country: ".to_string())
        } else {
            (
                format!("{prefix}name: "),
                format!("{prefix}email: "),
                format!("{prefix}country: "),
            )
        };

        let Some(name) = self.read_non_empty(&name_label)? else {
            return Ok(None);
        };
        let Some(email) = self.read_non_empty(&email_label)? else {
            return Ok(None);
        };
        let Some(country) = self.read_non_empty(&country_label)? else {
            return Ok(None);
        };
        Ok(Some(NewEmployee::new(name, email, country)))
    }

    fn read_id(&mut self, prompt: &str) -> io::Result<Option<EmployeeId>> {
        Ok(self.read_int(prompt)?.map(EmployeeId::from))
    }

    fn read_int(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.prompt_line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    fn read_non_empty(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            let Some(line) = self.prompt_line(prompt)? else {
                return Ok(None);
            };
            if !line.is_empty() {
                return Ok(Some(line));
            }
            writeln!(self.output, "Input cannot be empty. Please try again.")?;
        }
    }

    /// Returns the next trimmed line, or `None` at end of input.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, MenuChoice};
    use employee_core::{
        EmployeeRepository, SqliteConnectionProvider, SqliteEmployeeRepository,
    };
    use std::io::Cursor;
    use tempfile::TempDir;

    fn seeded_repo() -> (TempDir, SqliteEmployeeRepository<SqliteConnectionProvider>) {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteEmployeeRepository::new(SqliteConnectionProvider::new(
            dir.path().join("console.sqlite3"),
        ));
        repo.initialize_schema().unwrap();
        (dir, repo)
    }

    fn run_session(
        repo: &SqliteEmployeeRepository<SqliteConnectionProvider>,
        script: &str,
    ) -> String {
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new(), repo);
        console.run().unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn list_prints_seeded_table() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(&repo, "1\n0\n");

        assert!(output.contains("| ID | Name         | Email                     | Country       |"));
        assert!(output.contains("|  1 | John Doe     |      john.doe@example.com | USA           |"));
        assert!(output.ends_with("Exiting application. Goodbye!\n"));
    }

    #[test]
    fn add_reprompts_on_blank_input_and_reports_duplicates() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(
            &repo,
            "2\nAda\n\nada@example.com\nUK\n2\nAda Copy\nada@example.com\nUK\n0\n",
        );

        assert!(output.contains("Input cannot be empty. Please try again."));
        assert!(output.contains("Employee inserted successfully."));
        assert!(output.contains("Failed to insert employee: email 'ada@example.com' already exists."));
        assert_eq!(repo.list_all().unwrap().len(), 3);
    }

    #[test]
    fn invalid_numbers_and_choices_are_reported() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(&repo, "abc\n42\n0\n");

        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Invalid choice, please try again."));
    }

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(MenuChoice::from_number(0), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_number(6), Some(MenuChoice::FindById));
        assert_eq!(MenuChoice::from_number(9), None);
        assert_eq!(MenuChoice::from_number(i64::MAX), None);
    }

    #[test]
    fn non_numeric_id_reprompts_before_lookup() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(&repo, "6
first
1
0
");

        assert_eq!(output.matches("Please enter a valid number.").count(), 1);
        assert_eq!(output.matches("Enter employee ID: ").count(), 2);
        assert!(output.contains("Found: Employee{id=1, name='John Doe'"));
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(&repo, "3\n99\nA\na@example.com\nUS\n4\n99\n6\n99\n0\n");

        assert_eq!(output.matches("No employee found with ID: 99").count(), 3);
    }

    #[test]
    fn update_by_name_and_email_reach_the_repository() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(
            &repo,
            "7\nJane Smith\nJane S.\njane.s@example.com\nFrance\n8\njohn.doe@example.com\nJohn D.\njohn.d@example.com\nUSA\n0\n",
        );

        assert!(output.contains("Employee(s) with name 'Jane Smith' updated successfully."));
        assert!(output.contains("Employee with email 'john.doe@example.com' updated successfully."));
        assert_eq!(repo.get_by_id(2).unwrap().unwrap().country, "France");
        assert_eq!(repo.get_by_id(1).unwrap().unwrap().email, "john.d@example.com");
    }

    #[test]
    fn batch_insert_twice_rolls_back_the_second_run() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(&repo, "5\n5\n6\n3\n0\n");

        assert!(output.contains("Batch executed successfully. Inserted 4 records."));
        assert!(output.contains("Batch insert failed, transaction rolled back"));
        assert!(output.contains(
            "Found: Employee{id=3, name='Emily Davis', email='emily@example.com', country='Australia'}"
        ));
        assert_eq!(repo.list_all().unwrap().len(), 6);
    }

    #[test]
    fn end_of_input_mid_prompt_ends_session() {
        let (_dir, repo) = seeded_repo();

        let output = run_session(&repo, "2\nOnly Name\n");

        assert!(output.ends_with("Exiting application. Goodbye!\n"));
        assert_eq!(repo.list_all().unwrap().len(), 2);
    }

    #[test]
    fn store_failures_are_printed_not_propagated() {
        let dir = tempfile::tempdir().unwrap();
        // Schema never initialized: every query fails.
        let repo = SqliteEmployeeRepository::new(SqliteConnectionProvider::new(
            dir.path().join("empty.sqlite3"),
        ));

        let output = run_session(&repo, "1\n6\n1\n0\n");

        assert!(output.contains("Failed to list employees:"));
        assert!(output.contains("Failed to look up employee:"));
    }
}
