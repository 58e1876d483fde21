//! Transaction display formatting
//!
//! Register rows carry the store position so they can be passed back to
//! `tx delete`.

use super::report::truncate;
use super::DisplayOptions;
use crate::models::{Money, Transaction};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(index: usize, txn: &Transaction, opts: &DisplayOptions) -> String {
    let status_icon = if txn.cleared { "✓" } else { " " };

    let description = if txn.description.is_empty() {
        "(no description)"
    } else {
        &txn.description
    };

    format!(
        "{:>4} {} {:10} {:24} {:16} {:>12}",
        index,
        status_icon,
        opts.date(txn.date()),
        truncate(description, 24),
        truncate(&txn.category, 16),
        opts.money(txn.amount)
    )
}

/// Format positioned transactions as a register with a net total
pub fn format_transaction_register(rows: &[(usize, &Transaction)], opts: &DisplayOptions) -> String {
    if rows.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4} {:1} {:10} {:24} {:16} {:>12}\n",
        "#", "C", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for (index, txn) in rows {
        output.push_str(&format_transaction_row(*index, txn, opts));
        output.push('\n');
    }

    let net: Money = rows.iter().map(|(_, t)| t.amount).sum();
    output.push_str(&"-".repeat(72));
    output.push('\n');
    output.push_str(&format!(
        "{:>58} {:>12}\n",
        format!("{} transaction(s), net:", rows.len()),
        opts.money(net)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(index: usize, txn: &Transaction, opts: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: #{}\n", index));
    output.push_str(&format!(
        "Date:        {} {}\n",
        opts.date(txn.date()),
        txn.timestamp.format("%H:%M:%S")
    ));
    output.push_str(&format!("Amount:      {}\n", opts.money(txn.amount)));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Type:        {}\n",
        if txn.is_income() { "Income" } else { "Expense" }
    ));
    output.push_str(&format!(
        "Status:      {}\n",
        if txn.cleared { "Cleared" } else { "Pending" }
    ));

    output
}
