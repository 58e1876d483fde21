//! Transaction CLI commands

use std::collections::BTreeSet;

use chrono::Local;
use clap::Subcommand;

use crate::display::{format_transaction_details, format_transaction_register, DisplayOptions};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Transaction, TransactionDraft};
use crate::services::FinanceData;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount (e.g., "-50.00" for an expense, "100.00" for income)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Date or date-time (YYYY-MM-DD [HH:MM[:SS]]), defaults to now
        #[arg(long)]
        date: Option<String>,
        /// Mark as cleared
        #[arg(long)]
        cleared: bool,
    },
    /// List transactions
    List {
        /// Only descriptions containing this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only this category ("*" for any)
        #[arg(short = 'C', long)]
        category: Option<String>,
        /// Show only the most recent N matches
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Position shown in the list
        index: usize,
    },
    /// Delete transactions by position
    Delete {
        /// Positions shown in the list
        #[arg(required = true)]
        indices: Vec<usize>,
    },
    /// List categories used by transactions
    Categories,
}

/// Handle a transaction command
pub fn handle_transaction_command(
    data: &mut FinanceData,
    opts: &DisplayOptions,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    match cmd {
        TransactionCommands::Add {
            amount,
            category,
            description,
            date,
            cleared,
        } => {
            let timestamp =
                date.unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
            let draft = TransactionDraft {
                timestamp,
                description,
                category,
                amount,
                cleared,
            };
            let txn = data.transactions_mut().add_draft(&draft)?;
            println!(
                "Added #{}: {}",
                data.transactions().len() - 1,
                format_added(&txn, opts)
            );
        }

        TransactionCommands::List {
            search,
            category,
            limit,
        } => {
            let rows = data
                .transactions()
                .filter_indexed(&search, category.as_deref());
            let skip = limit.map_or(0, |limit| rows.len().saturating_sub(limit));
            print!("{}", format_transaction_register(&rows[skip..], opts));
        }

        TransactionCommands::Show { index } => {
            let txn = data
                .transactions()
                .get(index)
                .ok_or_else(|| FinanceError::transaction_not_found(index))?;
            print!("{}", format_transaction_details(index, txn, opts));
        }

        TransactionCommands::Delete { indices } => {
            let count = data.transactions().len();
            if let Some(&missing) = indices.iter().find(|&&i| i >= count) {
                return Err(FinanceError::transaction_not_found(missing));
            }

            let indices: BTreeSet<usize> = indices.into_iter().collect();
            data.transactions_mut().delete(&indices);
            println!("Deleted {} transaction(s).", indices.len());
        }

        TransactionCommands::Categories => {
            let categories = data.transactions().categories();
            if categories.is_empty() {
                println!("No categories yet.");
            }
            for category in categories {
                println!("{}", category);
            }
        }
    }

    Ok(())
}

fn format_added(txn: &Transaction, opts: &DisplayOptions) -> String {
    format!(
        "{} {} [{}] {}",
        opts.date(txn.date()),
        txn.description,
        txn.category,
        opts.money(txn.amount)
    )
}
