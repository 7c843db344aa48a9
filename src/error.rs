//! Custom error types for expense-cli
//!
//! Every fallible operation in the library returns [`ExpenseResult`]. The
//! binary converts the error into a single printed message and exit status 1.

use thiserror::Error;

use crate::models::MoneyParseError;

/// The main error type for expense-cli operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input that cannot be turned into a column value
    #[error("{0}")]
    Validation(String),

    /// Database errors, printed as reported by SQLite
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl ExpenseError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the database rejected a row because of a CHECK constraint
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<MoneyParseError> for ExpenseError {
    fn from(err: MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for expense-cli operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
