//! Display formatting for terminal output
//!
//! Plain-text tables for transactions and reports. Everything here returns
//! a `String`; the command handlers decide where it goes.

pub mod report;
pub mod transaction;

use std::fmt::Write;

use crate::config::Settings;
use crate::models::Money;

pub use report::{
    format_category_report, format_daily_report, format_monthly_report, format_summary,
};
pub use transaction::{format_transaction_details, format_transaction_register};

/// User display preferences applied to every formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl From<&Settings> for DisplayOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.display_date_format.clone(),
        }
    }
}

impl DisplayOptions {
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Falls back to ISO dates if the configured format is invalid
    pub fn date(&self, date: chrono::NaiveDate) -> String {
        let mut out = String::new();
        match write!(out, "{}", date.format(&self.date_format)) {
            Ok(()) => out,
            Err(_) => date.format("%Y-%m-%d").to_string(),
        }
    }
}
