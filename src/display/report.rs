//! Report formatting utilities for terminal output

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::DisplayOptions;
use crate::models::Money;
use crate::services::{CategoryUtilization, PeriodTotals, YearMonth};

const BAR_WIDTH: usize = 20;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to at most `max_len` characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Spending against each category's limit
pub fn format_category_report(rows: &[CategoryUtilization], opts: &DisplayOptions) -> String {
    if rows.is_empty() {
        return "No expenses or budgets yet.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Spending by Category\n");
    output.push_str(&separator(78));
    output.push('\n');
    output.push_str(&format!(
        "{:20} {:>12} {:>12} {:>7}  {}\n",
        "Category", "Spent", "Budget", "Used", ""
    ));

    for row in rows {
        let budget = if row.limit.is_zero() {
            "-".to_string()
        } else {
            opts.money(row.limit)
        };
        let used = if row.limit.is_zero() {
            "-".to_string()
        } else {
            format_percentage(row.percentage)
        };
        let flag = if row.is_over_budget() { " over" } else { "" };

        output.push_str(&format!(
            "{:20} {:>12} {:>12} {:>7}  {}{}\n",
            truncate(&row.category, 20),
            opts.money(row.spent),
            budget,
            used,
            format_bar(row.percentage.min(100.0), 100.0, BAR_WIDTH),
            flag
        ));
    }

    let spent: Money = rows.iter().map(|r| r.spent).sum();
    let limit: Money = rows.iter().map(|r| r.limit).sum();
    output.push_str(&separator(78));
    output.push('\n');
    output.push_str(&format!(
        "{:20} {:>12} {:>12} {:>7}\n",
        "Total",
        opts.money(spent),
        opts.money(limit),
        format_percentage(spent.percent_of(limit))
    ));

    output
}

/// Income and expenses per day, against the daily allowance
pub fn format_daily_report(
    dates: &[NaiveDate],
    incomes: &BTreeMap<NaiveDate, Money>,
    expenses: &BTreeMap<NaiveDate, Money>,
    daily_budget: Money,
    opts: &DisplayOptions,
) -> String {
    if dates.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Daily Activity (allowance {}/day)\n", opts.money(daily_budget)));
    output.push_str(&separator(54));
    output.push('\n');
    output.push_str(&format!(
        "{:12} {:>12} {:>12} {:>12}\n",
        "Date", "Income", "Expenses", "Net"
    ));

    for date in dates {
        let income = incomes.get(date).copied().unwrap_or_default();
        let spent = expenses.get(date).copied().unwrap_or_default();
        let flag = if !daily_budget.is_zero() && spent > daily_budget {
            " !"
        } else {
            ""
        };
        output.push_str(&format!(
            "{:12} {:>12} {:>12} {:>12}{}\n",
            opts.date(*date),
            opts.money(income),
            opts.money(spent),
            opts.money(income - spent),
            flag
        ));
    }

    output
}

pub fn format_monthly_report(
    months: &BTreeMap<YearMonth, PeriodTotals>,
    opts: &DisplayOptions,
) -> String {
    if months.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8} {:>12} {:>12} {:>12}\n",
        "Month", "Income", "Expenses", "Net"
    ));
    output.push_str(&separator(47));
    output.push('\n');
    for (month, totals) in months {
        output.push_str(&format!(
            "{:8} {:>12} {:>12} {:>12}\n",
            month.to_string(),
            opts.money(totals.income),
            opts.money(totals.expenses),
            opts.money(totals.net())
        ));
    }
    output
}

/// One-screen overview of budgets and overall spending
pub fn format_summary(
    total_income: Money,
    total_expenses: Money,
    overall_percentage: f64,
    monthly_budget: Money,
    daily_budget: Money,
    opts: &DisplayOptions,
) -> String {
    let mut output = String::new();
    output.push_str("Summary\n");
    output.push_str(&separator(40));
    output.push('\n');
    output.push_str(&format!("{:24} {:>15}\n", "Total income:", opts.money(total_income)));
    output.push_str(&format!("{:24} {:>15}\n", "Total expenses:", opts.money(total_expenses)));
    output.push_str(&format!(
        "{:24} {:>15}\n",
        "Net:",
        opts.money(total_income - total_expenses)
    ));
    output.push_str(&format!(
        "{:24} {:>15}\n",
        "Category budgets used:",
        format_percentage(overall_percentage)
    ));
    output.push_str(&format!("{:24} {:>15}\n", "Monthly budget:", opts.money(monthly_budget)));
    output.push_str(&format!("{:24} {:>15}\n", "Daily allowance:", opts.money(daily_budget)));
    output
}
