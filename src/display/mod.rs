//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.

pub mod expense;

pub use expense::{
    format_expense_count, format_expense_report, format_expense_row, format_expense_total,
};
