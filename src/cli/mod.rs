//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod config;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use import::{handle_import_command, ImportArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::RefreshListener;
use crate::models::RefreshType;

/// Remembers whether user data changed, so the session is only saved when needed
#[derive(Debug, Default)]
pub struct ChangeTracker {
    dirty: AtomicBool,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }
}

impl RefreshListener for ChangeTracker {
    fn on_data_refresh(&self, kind: RefreshType) {
        if kind.affects(RefreshType::Transactions) || kind.affects(RefreshType::Budgets) {
            self.dirty.store(true, Ordering::SeqCst);
        }
    }
}
