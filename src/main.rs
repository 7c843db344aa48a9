use std::io;
use std::process::ExitCode;

use anyhow::Result;

use expense::cli::{handle_expense_command, print_help, Cli, ExpenseCommands};
use expense::config::{ExpensePaths, Settings};
use expense::error::ExpenseError;
use expense::logging;

fn main() -> ExitCode {
    let command = Cli::parse_command(std::env::args_os());

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(err) = err.downcast_ref::<ExpenseError>() {
                tracing::debug!(
                    validation = err.is_validation(),
                    constraint = err.is_constraint_violation(),
                    "command failed"
                );
            }
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<ExpenseCommands>) -> Result<()> {
    let Some(command) = command else {
        print_help(&mut io::stdout().lock())?;
        return Ok(());
    };

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_level);

    let db_path = settings.database_path(&paths);
    tracing::debug!(command = ?command, db = %db_path.display(), "dispatching");

    handle_expense_command(
        &db_path,
        &settings,
        command,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
    )?;

    Ok(())
}
