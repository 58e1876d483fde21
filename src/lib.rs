//! Finance tracker - personal income, expense and budget tracking
//!
//! This library holds one user's transactions and category budgets, derives
//! report data from them, imports bank statements from CSV, and notifies
//! subscribed views whenever the data changes.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Money, transactions and persisted snapshots
//! - `events`: The refresh bus views subscribe to
//! - `storage`: Per-user JSON persistence
//! - `services`: Stores, report aggregation and CSV import
//! - `display`: Plain-text formatting for the command line
//! - `cli`: Command handlers
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use finance_tracker::config::FinancePaths;
//! use finance_tracker::events::RefreshBus;
//! use finance_tracker::services::FinanceData;
//! use finance_tracker::storage::JsonUserStore;
//!
//! let paths = FinancePaths::new()?;
//! let store = JsonUserStore::new(&paths);
//! let data = FinanceData::load(&store, "alice", Arc::new(RefreshBus::new()))?;
//! println!("{:?}", data.category_expenses());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
