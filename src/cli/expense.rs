//! Expense CLI commands
//!
//! Implements the five expense commands on top of [`ExpenseStore`]. Each
//! command opens its own store and releases it before returning. Output and
//! the `clear` confirmation go through the supplied writer and reader.

use std::io::{BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{format_expense_report, format_expense_row};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Money, NewExpense};
use crate::storage::ExpenseStore;

/// Text shown for a missing or unrecognized command
const HELP_TEXT: &str = "\
An expense recording system

Commands:

add AMOUNT MEMO [DATE] - record a new expense
clear - delete all expenses
list - list all expenses
delete NUMBER - remove expense with id NUMBER
search QUERY - list expenses with a matching memo field
";

const CLEAR_PROMPT: &str = "This will remove all expenses. Are you sure? (enter y to confirm) ";

/// Expense subcommands
///
/// Values may start with `-`, and arguments past the ones a command uses
/// are collected into `ignored`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (e.g. "5.00")
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
        /// What the money was spent on
        #[arg(allow_hyphen_values = true)]
        memo: Option<String>,
        /// Date (YYYY-MM-DD), used only when `use_supplied_date` is enabled
        #[arg(allow_hyphen_values = true)]
        date: Option<String>,
        #[arg(hide = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        ignored: Vec<String>,
    },
    /// List all expenses
    List {
        #[arg(hide = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        ignored: Vec<String>,
    },
    /// List expenses with a matching memo
    Search {
        #[arg(allow_hyphen_values = true)]
        query: String,
        #[arg(hide = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        ignored: Vec<String>,
    },
    /// Remove the expense with the given id
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: String,
        #[arg(hide = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        ignored: Vec<String>,
    },
    /// Delete all expenses after confirmation
    Clear {
        #[arg(hide = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        ignored: Vec<String>,
    },
}

/// Write the help text
pub fn print_help(out: &mut impl Write) -> ExpenseResult<()> {
    write!(out, "{}", HELP_TEXT)?;
    Ok(())
}

/// Handle an expense command
pub fn handle_expense_command(
    db_path: &Path,
    settings: &Settings,
    cmd: ExpenseCommands,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> ExpenseResult<()> {
    match cmd {
        ExpenseCommands::Add { amount, memo, date, .. } => {
            let (Some(amount), Some(memo)) = (non_empty(amount), non_empty(memo)) else {
                writeln!(out, "You must provide an amount and memo.")?;
                return Ok(());
            };

            let amount = Money::parse(&amount)?;
            let created_on = resolve_date(date.as_deref(), settings)?;

            let store = ExpenseStore::open(db_path)?;
            store.add(&NewExpense::on(amount, memo, created_on))?;
            store.close()?;
        }

        ExpenseCommands::List { .. } => {
            let store = ExpenseStore::open(db_path)?;
            let expenses = store.list()?;
            store.close()?;

            write!(out, "{}", format_expense_report(&expenses))?;
        }

        ExpenseCommands::Search { query, .. } => {
            let store = ExpenseStore::open(db_path)?;
            let expenses = store.search(&query)?;
            store.close()?;

            write!(out, "{}", format_expense_report(&expenses))?;
        }

        ExpenseCommands::Delete { id, .. } => {
            let store = ExpenseStore::open(db_path)?;
            let deleted = store.delete(&id)?;
            store.close()?;

            match deleted {
                Some(expense) => {
                    writeln!(out, "The following expense has been deleted:")?;
                    writeln!(out, "{}", format_expense_row(&expense))?;
                }
                None => writeln!(out, "There is no expense with the id '{}'.", id)?,
            }
        }

        ExpenseCommands::Clear { .. } => {
            let answer = prompt(CLEAR_PROMPT, input, out)?;
            if answer != "y" {
                return Ok(());
            }

            let store = ExpenseStore::open(db_path)?;
            store.delete_all()?;
            store.close()?;

            writeln!(out, "All expenses have been deleted.")?;
        }
    }

    Ok(())
}

/// Ask a question and return the answer without its line terminator
fn prompt(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> ExpenseResult<String> {
    write!(out, "{}", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Pick the date to record for a new expense
fn resolve_date(supplied: Option<&str>, settings: &Settings) -> ExpenseResult<NaiveDate> {
    let today = chrono::Local::now().date_naive();

    match supplied {
        Some(raw) if settings.use_supplied_date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| {
                ExpenseError::Validation(format!("invalid input syntax for type date: \"{}\"", raw))
            }),
        Some(raw) => {
            tracing::warn!(
                date = raw,
                "ignoring supplied date; set use_supplied_date to record it"
            );
            Ok(today)
        }
        None => Ok(today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Harness {
        _dir: TempDir,
        db_path: std::path::PathBuf,
        settings: Settings,
    }

    impl Harness {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let db_path = dir.path().join("expenses.db");
            Self {
                _dir: dir,
                db_path,
                settings: Settings::default(),
            }
        }

        fn run_with_input(&self, cmd: ExpenseCommands, input: &str) -> ExpenseResult<String> {
            let mut out = Vec::new();
            handle_expense_command(
                &self.db_path,
                &self.settings,
                cmd,
                &mut input.as_bytes(),
                &mut out,
            )?;
            Ok(String::from_utf8(out).unwrap())
        }

        fn run(&self, cmd: ExpenseCommands) -> String {
            self.run_with_input(cmd, "").unwrap()
        }

        fn add(&self, amount: &str, memo: &str) {
            self.run(add_cmd(Some(amount), Some(memo), None));
        }

        fn rows(&self) -> usize {
            let store = ExpenseStore::open(&self.db_path).unwrap();
            store.list().unwrap().len()
        }
    }

    fn list() -> ExpenseCommands {
        ExpenseCommands::List { ignored: Vec::new() }
    }

    fn clear() -> ExpenseCommands {
        ExpenseCommands::Clear { ignored: Vec::new() }
    }

    fn search(query: &str) -> ExpenseCommands {
        ExpenseCommands::Search {
            query: query.into(),
            ignored: Vec::new(),
        }
    }

    fn delete(id: &str) -> ExpenseCommands {
        ExpenseCommands::Delete {
            id: id.into(),
            ignored: Vec::new(),
        }
    }

    fn add_cmd(amount: Option<&str>, memo: Option<&str>, date: Option<&str>) -> ExpenseCommands {
        ExpenseCommands::Add {
            amount: amount.map(String::from),
            memo: memo.map(String::from),
            date: date.map(String::from),
            ignored: Vec::new(),
        }
    }

    #[test]
    fn test_add_then_list_single_expense() {
        let h = Harness::new();
        h.add("5.00", "train ticket");

        let output = h.run(list());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "There is 1 expense.");
        assert!(lines[1].contains("5.00"));
        assert!(lines[1].ends_with("| train ticket"));

        let today = chrono::Local::now().date_naive();
        assert!(lines[1].contains(&today.format("%a %b %d %Y").to_string()));
    }

    #[test]
    fn test_list_empty() {
        let h = Harness::new();
        assert_eq!(h.run(list()), "There are no expenses.\n");
    }

    #[test]
    fn test_list_totals_multiple_expenses() {
        let h = Harness::new();
        h.add("10.00", "a");
        h.add("20.00", "b");

        let output = h.run(list());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "There are 2 expenses.");
        assert_eq!(lines[3], "-".repeat(50));
        assert_eq!(lines[4], format!("Total {:>30}", "30"));
    }

    #[test]
    fn test_add_requires_amount_and_memo() {
        let h = Harness::new();

        for cmd in [
            add_cmd(None, None, None),
            add_cmd(Some("5"), None, None),
            add_cmd(Some("5"), Some(""), None),
        ] {
            assert_eq!(h.run(cmd), "You must provide an amount and memo.\n");
        }

        assert!(!h.db_path.exists());
    }

    #[test]
    fn test_add_rejects_non_numeric_amount() {
        let h = Harness::new();
        let err = h
            .run_with_input(add_cmd(Some("abc"), Some("lunch"), None), "")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_add_below_minimum_is_constraint_violation() {
        let h = Harness::new();
        let err = h
            .run_with_input(add_cmd(Some("0.00"), Some("free"), None), "")
            .unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(h.rows(), 0);
    }

    #[test]
    fn test_supplied_date_ignored_by_default() {
        let h = Harness::new();
        h.run(add_cmd(Some("3"), Some("tea"), Some("2020-02-02")));

        let store = ExpenseStore::open(&h.db_path).unwrap();
        let rows = store.list().unwrap();
        assert_eq!(rows[0].created_on, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_supplied_date_used_when_enabled() {
        let mut h = Harness::new();
        h.settings.use_supplied_date = true;
        h.run(add_cmd(Some("3"), Some("tea"), Some("2020-02-02")));

        let store = ExpenseStore::open(&h.db_path).unwrap();
        let rows = store.list().unwrap();
        assert_eq!(rows[0].created_on, NaiveDate::from_ymd_opt(2020, 2, 2).unwrap());

        let err = h
            .run_with_input(add_cmd(Some("3"), Some("tea"), Some("yesterday")), "")
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_search_reports_matching_count() {
        let h = Harness::new();
        h.add("1", "Foo fighters");
        h.add("2", "bar");
        h.add("3", "seafood");

        let output = h.run(search("FOO"));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "There are 2 expenses.");
        assert!(lines[1].ends_with("| Foo fighters"));
        assert!(lines[2].ends_with("| seafood"));
        assert_eq!(lines[4], format!("Total {:>30}", "4"));

        let none = h.run(search("zzz"));
        assert_eq!(none, "There are no expenses.\n");
    }

    #[test]
    fn test_search_folds_non_ascii_case() {
        let h = Harness::new();
        h.add("4.20", "CAFÉ LATTE");
        h.add("1.00", "Ärger");
        h.add("2.00", "cafe au lait");

        let output = h.run(search("café"));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "There is 1 expense.");
        assert!(lines[1].ends_with("| CAFÉ LATTE"));

        let output = h.run(search("ärger"));
        assert!(output.starts_with("There is 1 expense.\n"));
        assert!(output.contains("| Ärger"));
    }

    #[test]
    fn test_add_keeps_hyphen_leading_memo() {
        let h = Harness::new();
        h.add("5", "-refund");

        let output = h.run(list());
        assert!(output.lines().nth(1).unwrap().ends_with("| -refund"));
    }

    #[test]
    fn test_extra_arguments_do_not_change_behavior() {
        let h = Harness::new();
        h.run(ExpenseCommands::Add {
            amount: Some("2.50".into()),
            memo: Some("bagel".into()),
            date: Some("2024-01-01".into()),
            ignored: vec!["x".into(), "-y".into()],
        });

        let output = h.run(ExpenseCommands::List {
            ignored: vec!["extra".into()],
        });
        assert!(output.starts_with("There is 1 expense.\n"));
        assert!(output.contains("| bagel"));
    }

    #[test]
    fn test_delete_existing_expense() {
        let h = Harness::new();
        h.add("4.50", "snack");
        h.add("7.25", "lunch");

        let output = h.run(delete("1"));
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "The following expense has been deleted:");
        assert!(lines[1].starts_with("  1 | "));
        assert!(lines[1].ends_with("|         4.50 | snack"));
        assert_eq!(h.rows(), 1);
    }

    #[test]
    fn test_delete_missing_expense() {
        let h = Harness::new();
        h.add("4.50", "snack");

        let output = h.run(delete("99"));
        assert_eq!(output, "There is no expense with the id '99'.\n");
        assert_eq!(h.rows(), 1);
    }

    #[test]
    fn test_clear_confirmed() {
        let h = Harness::new();
        h.add("1", "a");
        h.add("2", "b");

        let output = h.run_with_input(clear(), "y\n").unwrap();
        assert_eq!(
            output,
            format!("{}All expenses have been deleted.\n", CLEAR_PROMPT)
        );
        assert_eq!(h.rows(), 0);
    }

    #[test]
    fn test_clear_declined() {
        let h = Harness::new();
        h.add("1", "a");

        for answer in ["n\n", "yes\n", "Y\n", " y\n", ""] {
            let output = h.run_with_input(clear(), answer).unwrap();
            assert_eq!(output, CLEAR_PROMPT);
        }
        assert_eq!(h.rows(), 1);
    }

    #[test]
    fn test_prompt_strips_line_terminators() {
        let mut out = Vec::new();
        let answer = prompt("? ", &mut "y\r\n".as_bytes(), &mut out).unwrap();
        assert_eq!(answer, "y");
        assert_eq!(out, b"? ");
    }

    #[test]
    fn test_print_help() {
        let mut out = Vec::new();
        print_help(&mut out).unwrap();
        let help = String::from_utf8(out).unwrap();
        assert!(help.starts_with("An expense recording system"));
        assert!(help.contains("add AMOUNT MEMO [DATE] - record a new expense"));
        assert!(help.contains("search QUERY - list expenses with a matching memo field"));
    }
}
