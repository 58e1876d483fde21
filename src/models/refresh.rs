//! Change notification kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of data changed
///
/// `All` is a superset signal: a listener receiving it should behave as if
/// every other kind had fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RefreshType {
    Transactions,
    Budgets,
    Settings,
    All,
}

impl RefreshType {
    /// Whether a listener interested in `interest` should react to `self`
    pub fn affects(self, interest: RefreshType) -> bool {
        self == RefreshType::All || interest == RefreshType::All || self == interest
    }
}

impl fmt::Display for RefreshType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transactions => write!(f, "TRANSACTIONS"),
            Self::Budgets => write!(f, "BUDGETS"),
            Self::Settings => write!(f, "SETTINGS"),
            Self::All => write!(f, "ALL"),
        }
    }
}
