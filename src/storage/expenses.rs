//! Expense store backed by SQLite
//!
//! An [`ExpenseStore`] owns one connection for the duration of a single
//! command. Opening the store ensures the schema; dropping it (or calling
//! [`ExpenseStore::close`]) releases the connection.

use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::ExpenseResult;
use crate::models::{Expense, NewExpense};

use super::init::ensure_schema;

const EXPENSE_COLUMNS: &str = "id, amount, memo, created_on";

/// Data-access object for the expenses table
pub struct ExpenseStore {
    conn: Connection,
}

impl ExpenseStore {
    /// Open the database file at `path`, creating the table if needed
    pub fn open(path: impl AsRef<Path>) -> ExpenseResult<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening expense database");
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database (useful for testing)
    pub fn open_in_memory() -> ExpenseResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> ExpenseResult<Self> {
        register_casefold(&conn)?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Insert a new expense and return the stored row
    pub fn add(&self, expense: &NewExpense) -> ExpenseResult<Expense> {
        let sql = format!(
            "INSERT INTO expenses (amount, memo, created_on) VALUES (?1, ?2, ?3) \
             RETURNING {EXPENSE_COLUMNS}"
        );
        let stored = self.conn.query_row(
            &sql,
            params![expense.amount, expense.memo, expense.created_on],
            expense_from_row,
        )?;

        tracing::info!(id = stored.id, amount = %stored.amount, "expense added");
        Ok(stored)
    }

    /// All expenses, oldest first
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY created_on ASC, id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = rows.len(), "listed expenses");
        Ok(rows)
    }

    /// Expenses whose memo contains `term`, ignoring case
    pub fn search(&self, term: &str) -> ExpenseResult<Vec<Expense>> {
        let sql = format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses \
             WHERE instr(casefold(memo), casefold(?1)) > 0 \
             ORDER BY created_on ASC, id ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([term], expense_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(term, count = rows.len(), "searched expenses");
        Ok(rows)
    }

    /// Look up an expense by id, exactly as the user typed it
    pub fn find(&self, id: &str) -> ExpenseResult<Option<Expense>> {
        let sql = format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?1");
        Ok(self
            .conn
            .query_row(&sql, [id], expense_from_row)
            .optional()?)
    }

    /// Delete one expense, returning it if it existed
    pub fn delete(&self, id: &str) -> ExpenseResult<Option<Expense>> {
        let Some(expense) = self.find(id)? else {
            tracing::debug!(id, "no expense to delete");
            return Ok(None);
        };

        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", [expense.id])?;
        tracing::info!(id = expense.id, "expense deleted");
        Ok(Some(expense))
    }

    /// Delete every expense, returning how many rows were removed
    pub fn delete_all(&self) -> ExpenseResult<usize> {
        let removed = self.conn.execute("DELETE FROM expenses", [])?;
        tracing::info!(removed, "all expenses deleted");
        Ok(removed)
    }

    /// Close the connection, reporting any error from SQLite
    pub fn close(self) -> ExpenseResult<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get("id")?,
        amount: row.get("amount")?,
        memo: row.get("memo")?,
        created_on: row.get("created_on")?,
    })
}

/// Register `casefold(text)`, a Unicode-aware lowercase for memo matching
fn register_casefold(conn: &Connection) -> ExpenseResult<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
    )?;
    Ok(())
}
