//! Persisted form of one user's finance data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::Transaction;

fn default_schema_version() -> u32 {
    1
}

/// Everything stored for a single user
///
/// Derived reports are never persisted; they are recomputed from
/// `transactions` on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Transactions in insertion order
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Monthly limit per category
    #[serde(default)]
    pub category_budgets: BTreeMap<String, Money>,

    /// Overall monthly budget
    #[serde(default)]
    pub monthly_budget: Money,
}

impl Default for FinanceSnapshot {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            transactions: Vec::new(),
            category_budgets: BTreeMap::new(),
            monthly_budget: Money::zero(),
        }
    }
}
