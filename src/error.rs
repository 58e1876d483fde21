//! Error types for the finance tracker
//!
//! A single `thiserror` enum covers every failure a core operation can
//! report. Row-level import problems are not errors in this sense: they are
//! collected into the import result instead (see `services::import`).

use thiserror::Error;

/// The main error type for finance tracker operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A transaction or budget field failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A date or amount could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A column mapping is unusable for the data it is applied to
    #[error("Column mapping error: {0}")]
    Mapping(String),

    /// Import errors that abort the whole import
    #[error("Import error: {0}")]
    Import(String),

    /// Persistence layer errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl FinanceError {
    /// Create a "not found" error for a transaction position
    pub fn transaction_not_found(index: usize) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: format!("#{}", index),
        }
    }

    /// Create a "not found" error for a category budget
    pub fn budget_not_found(category: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category budget",
            identifier: category.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for FinanceError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for finance tracker operations
pub type FinanceResult<T> = Result<T, FinanceError>;
