//! User settings for the finance tracker
//!
//! Display preferences, the default session user and the default CSV column
//! mapping. Every field has a default so older or partial config files keep
//! loading.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::services::import::ColumnMapping;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// User whose data is opened when none is given on the command line
    #[serde(default = "default_user")]
    pub default_user: String,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format used when printing transactions (strftime format)
    #[serde(default = "default_date_format")]
    pub display_date_format: String,

    /// Column mapping used by `import` when no flags override it
    #[serde(default)]
    pub import: ColumnMapping,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user() -> String {
    "default".to_string()
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_user: default_user(),
            currency_symbol: default_currency(),
            display_date_format: default_date_format(),
            import: ColumnMapping::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    ///
    /// Defaults are not written back; the caller decides when to persist.
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();
        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;
        crate::storage::write_json_atomic(paths.settings_file(), self)
    }
}
