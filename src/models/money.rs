//! Money type for representing currency amounts
//!
//! Amounts are stored as signed integer cents so that sums over thousands of
//! transactions stay exact. Negative amounts are expenses, positive amounts
//! are income.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::sync::OnceLock;

/// Largest magnitude accepted when parsing: one trillion currency units
pub const MAX_PARSED_CENTS: i64 = 100_000_000_000_000;

/// Sign, digits with optional well-formed thousands groups, up to two decimals
const STATEMENT_AMOUNT_PATTERN: &str = r"^[+-]?(?:\d{1,3}(?:,\d{3})+|\d*)(?:\.\d{1,2})?$";

fn statement_amount_regex() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(STATEMENT_AMOUNT_PATTERN).ok())
        .as_ref()
}

/// A monetary amount in cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use finance_tracker::models::Money;
    /// let amount = Money::from_cents(-1050); // -$10.50
    /// assert!(amount.is_negative());
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// The amount as a floating point number of currency units
    pub fn as_units_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// This amount as a percentage of `whole`
    ///
    /// Returns 0.0 when `whole` is zero rather than NaN or infinity.
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            return 0.0;
        }
        self.0 as f64 / whole.0 as f64 * 100.0
    }

    /// Divide into `parts` equal shares, rounded to the nearest cent
    ///
    /// Returns zero when `parts` is zero.
    pub fn split_evenly(&self, parts: u32) -> Money {
        if parts == 0 {
            return Money::zero();
        }
        let parts = i64::from(parts);
        let half = parts / 2;
        let rounded = if self.0 >= 0 {
            self.0.saturating_add(half) / parts
        } else {
            self.0.saturating_sub(half) / parts
        };
        Money(rounded)
    }

    /// Parse a plain decimal amount
    ///
    /// Accepts an optional leading sign, an optional `$`, and at most two
    /// fractional digits: "10", "-10.5", "+$10.50", ".75". Magnitudes above
    /// [`MAX_PARSED_CENTS`] are rejected with `OutOfRange`.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(raw.to_string());

        let (negative, rest) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        let (whole, fraction) = match rest.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (rest, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(raw.to_string()));
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or_else(|| MoneyParseError::OutOfRange(raw.to_string()))?;
        if total > MAX_PARSED_CENTS {
            return Err(MoneyParseError::OutOfRange(raw.to_string()));
        }

        Ok(Self(if negative { -total } else { total }))
    }

    /// Parse an amount as it appears in a bank statement
    ///
    /// Strips currency symbols, whitespace and thousands separators, and
    /// treats accounting parentheses as a negative sign: "(1,234.50)" is
    /// -1234.50, "€ 12.00" is 12.00. Anything else left in the field, such as
    /// letters, `#`, an exponent or a comma outside a thousands group, makes
    /// the amount invalid.
    pub fn parse_statement(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (wrapped, inner) = match trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => (true, inner),
            None => (false, trimmed),
        };

        let cleaned: String = inner
            .chars()
            .filter(|c| !c.is_whitespace() && !is_currency_symbol(*c))
            .collect();

        let pattern = statement_amount_regex().ok_or_else(invalid)?;
        if cleaned.is_empty() || !pattern.is_match(&cleaned) {
            return Err(invalid());
        }

        let amount = Self::parse(&cleaned.replace(',', "")).map_err(|e| match e {
            MoneyParseError::OutOfRange(_) => MoneyParseError::OutOfRange(trimmed.to_string()),
            _ => invalid(),
        })?;
        Ok(if wrapped { -amount.abs() } else { amount })
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    OutOfRange(String),
}

fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '€' | '£' | '¥' | '₹' | '¢' | '₩' | '₽')
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
            Self::TooPrecise(s) => {
                write!(f, "Amount '{}' has more than two decimal places", s)
            }
            Self::OutOfRange(s) => write!(f, "Amount '{}' is out of range", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
