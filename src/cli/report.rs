//! Report CLI commands

use clap::Subcommand;

use crate::display::{
    format_category_report, format_daily_report, format_monthly_report, format_summary,
    DisplayOptions,
};
use crate::error::FinanceResult;
use crate::services::{aggregation, FinanceData};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Spending per category against its budget
    Categories,
    /// Income and expenses per day
    Daily,
    /// Income and expenses per month
    Monthly,
    /// Totals, budget use and daily allowance
    Summary,
}

/// Handle a report command
pub fn handle_report_command(
    data: &FinanceData,
    opts: &DisplayOptions,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let output = match cmd {
        ReportCommands::Categories => format_category_report(&data.category_utilization(), opts),
        ReportCommands::Daily => format_daily_report(
            &data.dates(),
            &data.daily_incomes(),
            &data.daily_expenses(),
            data.daily_budget(),
            opts,
        ),
        ReportCommands::Monthly => format_monthly_report(&data.monthly_totals(), opts),
        ReportCommands::Summary => {
            let transactions = data.transactions().as_slice();
            format_summary(
                aggregation::total_income(transactions),
                aggregation::total_expenses(transactions),
                data.overall_budget_percentage(),
                data.monthly_budget(),
                data.daily_budget(),
                opts,
            )
        }
    };

    print!("{}", output);
    Ok(())
}
