//! Configuration module for the finance tracker
//!
//! - Data-directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
