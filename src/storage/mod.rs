//! Storage layer for the finance tracker
//!
//! Provides atomic JSON file I/O and the per-user store that sessions load
//! from and save to.

pub mod file_io;
pub mod user_store;

pub use file_io::{read_json, write_json_atomic};
pub use user_store::{FinanceStore, JsonUserStore};
