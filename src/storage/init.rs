//! Schema initialization
//!
//! The expenses table is created lazily: every store open checks the schema
//! catalog and creates the table only if it is missing.

use rusqlite::Connection;

use crate::error::ExpenseResult;

/// Name of the table holding expense rows
pub const EXPENSES_TABLE: &str = "expenses";

const CREATE_EXPENSES: &str = "CREATE TABLE expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount NUMERIC(6,2) NOT NULL CHECK (amount >= 0.01 AND amount < 10000),
    memo TEXT NOT NULL,
    created_on DATE NOT NULL
)";

/// Check whether a table exists in the schema catalog
pub fn table_exists(conn: &Connection, table_name: &str) -> ExpenseResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    let exists = stmt.exists([table_name])?;
    Ok(exists)
}

/// Create the expenses table if it does not exist yet
pub fn ensure_schema(conn: &Connection) -> ExpenseResult<()> {
    if table_exists(conn, EXPENSES_TABLE)? {
        return Ok(());
    }

    tracing::info!(table = EXPENSES_TABLE, "creating missing table");
    conn.execute(CREATE_EXPENSES, [])?;
    Ok(())
}
