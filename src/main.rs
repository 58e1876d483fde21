use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finance_tracker::cli::{
    handle_budget_command, handle_config_command, handle_import_command, handle_report_command,
    handle_transaction_command, BudgetCommands, ChangeTracker, ConfigCommands, ImportArgs,
    ReportCommands, TransactionCommands,
};
use finance_tracker::config::{FinancePaths, Settings};
use finance_tracker::display::DisplayOptions;
use finance_tracker::events::RefreshBus;
use finance_tracker::services::FinanceData;
use finance_tracker::storage::JsonUserStore;

#[derive(Parser)]
#[command(
    name = "finance",
    version,
    about = "Track income, expenses and category budgets",
    long_about = "A personal finance tracker. Record income and expenses, set monthly \
                  limits per category, import bank statements from CSV and see where \
                  the money went."
)]
struct Cli {
    /// User whose data to open (defaults to the configured default user)
    #[arg(short, long, global = true, env = "FINANCE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Tx(TransactionCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Import transactions from CSV
    Import(ImportArgs),

    /// Reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> Result<()> {
    finance_tracker::logging::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Finance Tracker - income, expenses and budgets");
        println!();
        println!("Run 'finance --help' for usage information.");
        return Ok(());
    };

    let paths = FinancePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let username = cli
        .user
        .unwrap_or_else(|| settings.default_user.clone());

    let store = JsonUserStore::new(&paths);
    let bus = Arc::new(RefreshBus::new());
    let mut data = FinanceData::load(&store, &username, bus.clone())?;

    let tracker = Arc::new(ChangeTracker::new());
    bus.subscribe(tracker.clone());

    let opts = DisplayOptions::from(&settings);

    match command {
        Commands::Tx(cmd) => handle_transaction_command(&mut data, &opts, cmd)?,
        Commands::Budget(cmd) => handle_budget_command(&mut data, &opts, cmd)?,
        Commands::Import(args) => handle_import_command(&mut data, &settings, &opts, args)?,
        Commands::Report(cmd) => handle_report_command(&data, &opts, cmd)?,
        Commands::Config(cmd) => handle_config_command(&paths, &mut settings, &data, cmd)?,
    }

    if tracker.is_dirty() {
        data.save(&store)?;
    }

    Ok(())
}
