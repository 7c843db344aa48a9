//! Money type for representing expense amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues, mirroring a `numeric(6,2)` column: two fractional digits, rounded
//! half away from zero on parse.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use thiserror::Error;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Whole units, ignoring sign
    const fn whole_part(&self) -> u64 {
        self.0.unsigned_abs() / 100
    }

    /// Fractional cents, ignoring sign (0-99)
    const fn cents_part(&self) -> u64 {
        self.0.unsigned_abs() % 100
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts an optional sign, digits, an optional fractional part and an
    /// optional exponent: "5", "5.5", "-5.00", ".75", "1e3", "2.5E-1".
    /// Extra fractional digits are rounded to cents.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let trimmed = s.trim();

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => {
                (mantissa, exponent.parse::<i32>().map_err(|_| invalid())?)
            }
            None => (unsigned, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let (whole, fraction) = shift_point(whole, fraction, exponent).ok_or_else(invalid)?;

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format as a plain number without trailing fractional zeros
    ///
    /// `30.00` becomes `30`, `12.50` becomes `12.5`.
    pub fn to_plain_string(&self) -> String {
        let full = self.to_string();
        full.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Longest whole part an `i64` cent count could ever hold
const MAX_WHOLE_DIGITS: i64 = 20;

/// Move the decimal point of `whole.fraction` right by `exponent` places
///
/// Digits more than three places past the point never affect the rounded
/// cents, so at most three leading zeros are kept in the fraction. Returns
/// `None` when the whole part would overflow.
fn shift_point(whole: &str, fraction: &str, exponent: i32) -> Option<(String, String)> {
    if exponent == 0 {
        return Some((whole.to_string(), fraction.to_string()));
    }

    let digits = format!("{whole}{fraction}");
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some((String::new(), String::new()));
    }

    let leading_zeros = (digits.len() - significant.len()) as i64;
    let point = whole.len() as i64 - leading_zeros + i64::from(exponent);
    if point > MAX_WHOLE_DIGITS {
        return None;
    }

    if point <= 0 {
        let zeros = "0".repeat((-point).min(3) as usize);
        return Some((String::new(), format!("{zeros}{significant}")));
    }

    let point = point as usize;
    if point >= significant.len() {
        let padding = "0".repeat(point - significant.len());
        Some((format!("{significant}{padding}"), String::new()))
    } else {
        let (whole, fraction) = significant.split_at(point);
        Some((whole.to_string(), fraction.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.whole_part(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// SQLite stores NUMERIC values as INTEGER or REAL depending on the value.

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0 as f64 / 100.0))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(units) => units
                .checked_mul(100)
                .map(Self)
                .ok_or(FromSqlError::OutOfRange(units)),
            ValueRef::Real(amount) => Ok(Self((amount * 100.0).round() as i64)),
            ValueRef::Text(text) => {
                let text = std::str::from_utf8(text).map_err(|e| FromSqlError::Other(Box::new(e)))?;
                Self::parse(text).map_err(|e| FromSqlError::Other(Box::new(e)))
            }
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("invalid input syntax for type numeric: \"{0}\"")]
    InvalidFormat(String),
}
