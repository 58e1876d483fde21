//! Core data models for the finance tracker
//!
//! Plain data: money amounts, transactions, the persisted per-user snapshot
//! and the change-notification kinds published by the stores.

pub mod money;
pub mod refresh;
pub mod snapshot;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use refresh::RefreshType;
pub use snapshot::FinanceSnapshot;
pub use transaction::{DedupKey, Transaction, TransactionDraft, TransactionValidationError};
