//! Console entry point for the employee directory.
//!
//! # Responsibility
//! - Parse flags, start logging, reset the demo table, run the menu loop.
//! - Keep startup failures non-fatal where the session can still proceed.

mod console;

use clap::Parser;
use console::Console;
use employee_core::{
    core_version, default_log_level, init_logging, EmployeeRepository,
    SqliteConnectionProvider, SqliteEmployeeRepository,
};
use log::info;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "employee_cli", version, about = "Manage the employees table from the console")]
struct Cli {
    /// SQLite database file, created when missing.
    #[arg(long, default_value = "employees.sqlite3")]
    db: PathBuf,

    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    /// Keep existing rows instead of dropping and reseeding the table.
    #[arg(long)]
    skip_init: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
    let provider = SqliteConnectionProvider::new(&cli.db);
    info!(
        "event=cli_start module=cli status=ok version={} db={} skip_init={}",
        core_version(),
        provider.path().display(),
        cli.skip_init
    );

    let repo = SqliteEmployeeRepository::new(provider);
    if !cli.skip_init {
        if let Err(err) = repo.initialize_schema() {
            eprintln!("Error initializing database: {err}");
        }
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), repo);
    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("console I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}
