//! expense-cli - command-line expense tracker
//!
//! Records, lists, searches and deletes expenses stored in a single SQLite
//! table. The table is created lazily the first time a command touches the
//! database.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Base directory and user settings
//! - `error`: Custom error types
//! - `models`: Expense and money types
//! - `storage`: SQLite expense store and schema creation
//! - `display`: Report formatting
//! - `cli`: Argument parsing and command handlers
//! - `logging`: Tracing subscriber set-up
//!
//! # Example
//!
//! ```rust,no_run
//! use expense::models::{Money, NewExpense};
//! use expense::storage::ExpenseStore;
//!
//! # fn main() -> expense::ExpenseResult<()> {
//! let store = ExpenseStore::open("expenses.db")?;
//! store.add(&NewExpense::today(Money::from_cents(500), "train ticket"))?;
//! println!("{} expenses", store.list()?.len());
//! store.close()?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
