//! Expense display formatting
//!
//! Formats expenses for terminal output: the count line, one line per
//! expense, and a total block when more than one expense is shown.

use crate::models::{Expense, Money};

/// Width of the separator above the total line
const SEPARATOR_WIDTH: usize = 50;

/// Format the line announcing how many expenses matched
pub fn format_expense_count(count: usize) -> String {
    match count {
        0 => "There are no expenses.".to_string(),
        1 => "There is 1 expense.".to_string(),
        n => format!("There are {} expenses.", n),
    }
}

/// Format a single expense as `ID | DATE | AMOUNT | MEMO`
pub fn format_expense_row(expense: &Expense) -> String {
    format!(
        "{:>3} | {:>10} | {:>12} | {}",
        expense.id,
        expense.created_on.format("%a %b %d %Y").to_string(),
        expense.amount.to_string(),
        expense.memo
    )
}

/// Format the separator and total lines
pub fn format_expense_total(total: Money) -> String {
    format!(
        "{}\nTotal {:>30}",
        "-".repeat(SEPARATOR_WIDTH),
        total.to_plain_string()
    )
}

/// Format a full report: count, rows, and a total when there are several rows
pub fn format_expense_report(expenses: &[Expense]) -> String {
    let mut output = String::new();
    output.push_str(&format_expense_count(expenses.len()));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense));
        output.push('\n');
    }

    if expenses.len() > 1 {
        let total: Money = expenses.iter().map(|e| e.amount).sum();
        output.push_str(&format_expense_total(total));
        output.push('\n');
    }

    output
}
