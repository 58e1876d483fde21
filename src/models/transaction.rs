//! Transaction model
//!
//! A transaction is a dated, categorised, signed amount. Transactions carry
//! no surrogate ID: a record is identified by its position in the owning
//! store together with its field values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Money, MoneyParseError};

/// Timestamp formats accepted for hand-entered transactions
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the transaction happened
    pub timestamp: NaiveDateTime,

    /// Free-text description (payee, memo)
    #[serde(default)]
    pub description: String,

    /// Category name, case-sensitive
    pub category: String,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,

    /// Whether the transaction has been reconciled against a statement
    #[serde(default)]
    pub cleared: bool,
}

impl Transaction {
    /// Create a new, uncleared transaction
    pub fn new(
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            timestamp,
            description: description.into(),
            category: category.into(),
            amount,
            cleared: false,
        }
    }

    /// Create a transaction dated at midnight of `date`
    pub fn on_date(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN), description, category, amount)
    }

    /// Mark the transaction as cleared
    pub fn cleared(mut self) -> Self {
        self.cleared = true;
        self
    }

    /// Calendar date of the transaction (time of day discarded)
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Key used to recognise the same transaction arriving twice
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self.date(), &self.description, self.amount)
    }

    /// Validate structural constraints
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date().format("%Y-%m-%d"),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// Identity of a transaction for duplicate detection: (date, description, amount)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
}

impl DedupKey {
    pub fn new(date: NaiveDate, description: &str, amount: Money) -> Self {
        Self {
            date,
            description: description.to_string(),
            amount,
        }
    }
}

/// An unvalidated transaction as entered by a user
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub timestamp: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub cleared: bool,
}

impl TransactionDraft {
    /// Parse and validate the draft into a transaction
    ///
    /// The timestamp may carry a time of day or be a bare `%Y-%m-%d` date.
    pub fn parse(&self) -> Result<Transaction, TransactionValidationError> {
        let timestamp = parse_timestamp(&self.timestamp)
            .ok_or_else(|| TransactionValidationError::InvalidTimestamp(self.timestamp.clone()))?;

        let amount = Money::parse(&self.amount)
            .map_err(TransactionValidationError::InvalidAmount)?;

        let txn = Transaction {
            timestamp,
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            amount,
            cleared: self.cleared,
        };
        txn.validate()?;
        Ok(txn)
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    InvalidTimestamp(String),
    EmptyCategory,
    InvalidAmount(MoneyParseError),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp(s) => write!(f, "Could not parse timestamp: '{}'", s),
            Self::EmptyCategory => write!(f, "Transaction category cannot be empty"),
            Self::InvalidAmount(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
