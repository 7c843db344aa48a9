//! Core data models for expense-cli
//!
//! This module contains the data structures for the expense domain: the
//! persisted expense row, the insert input, and the money type.

pub mod expense;
pub mod money;

pub use expense::{Expense, NewExpense};
pub use money::{Money, MoneyParseError};
