//! Config CLI commands

use chrono::format::{Item, StrftimeItems};
use clap::Subcommand;

use crate::config::{FinancePaths, Settings};
use crate::error::{FinanceError, FinanceResult};
use crate::services::FinanceData;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Change display settings
    Set {
        /// Currency symbol used when printing amounts
        #[arg(long)]
        currency: Option<String>,
        /// Date format used when printing dates (strftime syntax)
        #[arg(long)]
        date_format: Option<String>,
        /// User opened when --user is not given
        #[arg(long)]
        default_user: Option<String>,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &FinancePaths,
    settings: &mut Settings,
    data: &FinanceData,
    cmd: ConfigCommands,
) -> FinanceResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Finance Tracker Configuration");
            println!("=============================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Users directory:  {}", paths.users_dir().display());
            println!();
            println!("Settings:");
            println!("  Current user:    {}", data.username());
            println!("  Default user:    {}", settings.default_user);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.display_date_format);
            println!(
                "  Import columns:  date={} description={} category={} amount={} type={}",
                settings.import.date_column,
                settings.import.description_column,
                settings.import.category_column,
                settings.import.amount_column,
                settings
                    .import
                    .type_column
                    .map_or("-".to_string(), |c| c.to_string())
            );
        }

        ConfigCommands::Set {
            currency,
            date_format,
            default_user,
        } => {
            if currency.is_none() && date_format.is_none() && default_user.is_none() {
                return Err(FinanceError::Config("Nothing to change".into()));
            }
            if let Some(currency) = currency {
                settings.currency_symbol = currency;
            }
            if let Some(format) = date_format {
                let invalid = StrftimeItems::new(&format).any(|item| matches!(item, Item::Error));
                if format.trim().is_empty() || invalid {
                    return Err(FinanceError::Config(format!("Invalid date format '{}'", format)));
                }
                settings.display_date_format = format;
            }
            if let Some(user) = default_user {
                settings.default_user = user;
            }

            settings.save(paths)?;
            data.notify_settings_changed();
            println!("Settings saved.");
        }
    }

    Ok(())
}
