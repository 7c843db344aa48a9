//! Expense model
//!
//! An expense is a single recorded outlay: an amount, a memo describing it,
//! and the calendar date it was recorded on.

use chrono::NaiveDate;

use super::money::Money;

/// A persisted expense row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    /// Auto-incrementing identifier assigned by the database
    pub id: i64,

    /// Amount spent, always at least 0.01 once persisted
    pub amount: Money,

    /// What the money was spent on
    pub memo: String,

    /// Date the expense was recorded for
    pub created_on: NaiveDate,
}

/// Input for recording a new expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Money,
    pub memo: String,
    pub created_on: NaiveDate,
}

impl NewExpense {
    /// Create an expense dated today in local time
    pub fn today(amount: Money, memo: impl Into<String>) -> Self {
        Self::on(amount, memo, chrono::Local::now().date_naive())
    }

    /// Create an expense for a specific date
    pub fn on(amount: Money, memo: impl Into<String>, created_on: NaiveDate) -> Self {
        Self {
            amount,
            memo: memo.into(),
            created_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense_today_uses_local_date() {
        let expense = NewExpense::today(Money::from_cents(500), "train ticket");
        assert_eq!(expense.created_on, chrono::Local::now().date_naive());
        assert_eq!(expense.memo, "train ticket");
    }

    #[test]
    fn test_new_expense_on_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let expense = NewExpense::on(Money::from_cents(1999), "groceries", date);
        assert_eq!(expense.created_on, date);
        assert_eq!(expense.amount, Money::from_cents(1999));
    }
}
