//! CLI command handlers
//!
//! This module contains the argument model and the command implementations,
//! bridging clap argument parsing with the expense store.

pub mod expense;

use std::ffi::OsString;

use clap::Parser;

pub use expense::{handle_expense_command, print_help, ExpenseCommands};

/// Top-level argument parser
///
/// Clap's own help and version handling is disabled: anything it cannot
/// parse is shown the expense help text instead.
#[derive(Parser, Debug)]
#[command(
    name = "expense",
    about = "An expense recording system",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<ExpenseCommands>,
}

impl Cli {
    /// Parse process arguments into a command, or `None` when help is due
    pub fn parse_command<I, T>(args: I) -> Option<ExpenseCommands>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => cli.command,
            Err(err) => {
                tracing::debug!(error = %err, "unrecognized arguments");
                None
            }
        }
    }
}
