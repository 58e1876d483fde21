//! Budget CLI commands

use clap::Subcommand;

use crate::display::DisplayOptions;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;
use crate::services::FinanceData;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly limit for a category
    Set {
        /// Category name (case-sensitive)
        category: String,
        /// Amount (e.g., "100" or "100.00")
        amount: String,
    },
    /// Remove the limit for a category
    Remove {
        /// Category name
        category: String,
    },
    /// List category limits
    List,
    /// Show or set the overall monthly budget
    Monthly {
        /// New amount; omit to show the current one
        amount: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    data: &mut FinanceData,
    opts: &DisplayOptions,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    match cmd {
        BudgetCommands::Set { category, amount } => {
            let amount = parse_amount(&amount)?;
            data.budgets_mut().set_category_budget(&category, amount)?;
            println!("Budget for '{}' set to {}.", category, opts.money(amount));
        }

        BudgetCommands::Remove { category } => {
            if !data.budgets_mut().delete_category_budget(&category) {
                return Err(FinanceError::budget_not_found(category));
            }
            println!("Removed budget for '{}'.", category);
        }

        BudgetCommands::List => {
            let budgets = data.budgets().category_budgets();
            if budgets.is_empty() {
                println!("No category budgets set.");
                return Ok(());
            }

            println!("{:24} {:>12}", "Category", "Limit");
            println!("{}", "-".repeat(37));
            for (category, limit) in budgets {
                println!("{:24} {:>12}", category, opts.money(*limit));
            }
            println!("{}", "-".repeat(37));
            println!(
                "{:24} {:>12}",
                "Total",
                opts.money(data.budgets().total_category_budgets())
            );
        }

        BudgetCommands::Monthly { amount: Some(amount) } => {
            let amount = parse_amount(&amount)?;
            data.budgets_mut().set_monthly_budget(amount)?;
            println!(
                "Monthly budget set to {} ({} per day this month).",
                opts.money(amount),
                opts.money(data.daily_budget())
            );
        }

        BudgetCommands::Monthly { amount: None } => {
            println!("Monthly budget:  {}", opts.money(data.monthly_budget()));
            println!("Daily allowance: {}", opts.money(data.daily_budget()));
        }
    }

    Ok(())
}

fn parse_amount(raw: &str) -> FinanceResult<Money> {
    Money::parse(raw).map_err(|e| FinanceError::Validation(format!("Invalid amount: {}", e)))
}
