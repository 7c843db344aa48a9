//! Storage layer for expense-cli
//!
//! Provides the SQLite-backed expense store and lazy schema creation.

pub mod expenses;
pub mod init;

pub use expenses::ExpenseStore;
pub use init::{ensure_schema, EXPENSES_TABLE};
