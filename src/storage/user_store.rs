//! Per-user JSON store
//!
//! Each user's finance data lives in `users/<username>.json` under the data
//! directory.

use std::path::PathBuf;

use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::FinanceSnapshot;

use super::file_io::{read_json, write_json_atomic};

/// Load/save boundary for one user's finance data
pub trait FinanceStore {
    /// Load a user's data; a user with nothing saved yet gets empty data
    fn load(&self, username: &str) -> FinanceResult<FinanceSnapshot>;

    fn save(&self, username: &str, snapshot: &FinanceSnapshot) -> FinanceResult<()>;
}

/// Stores each user's snapshot as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonUserStore {
    users_dir: PathBuf,
}

impl JsonUserStore {
    pub fn new(paths: &FinancePaths) -> Self {
        Self {
            users_dir: paths.users_dir(),
        }
    }

    /// Path of the file backing `username`
    pub fn user_file(&self, username: &str) -> FinanceResult<PathBuf> {
        validate_username(username)?;
        Ok(self.users_dir.join(format!("{}.json", username)))
    }
}

impl FinanceStore for JsonUserStore {
    fn load(&self, username: &str) -> FinanceResult<FinanceSnapshot> {
        let path = self.user_file(username)?;
        let snapshot: FinanceSnapshot = read_json(&path)?;
        tracing::debug!(
            user = username,
            transactions = snapshot.transactions.len(),
            "loaded finance data"
        );
        Ok(snapshot)
    }

    fn save(&self, username: &str, snapshot: &FinanceSnapshot) -> FinanceResult<()> {
        let path = self.user_file(username)?;
        write_json_atomic(&path, snapshot)?;
        tracing::debug!(user = username, path = %path.display(), "saved finance data");
        Ok(())
    }
}

/// Usernames double as file names, so keep them to a safe character set
fn validate_username(username: &str) -> FinanceResult<()> {
    if username.is_empty() {
        return Err(FinanceError::Validation("Username cannot be empty".into()));
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.');
    if !username.chars().all(allowed) || username.starts_with('.') {
        return Err(FinanceError::Validation(format!(
            "Invalid username '{}': use letters, digits, '_', '-' or '.'",
            username
        )));
    }
    Ok(())
}
