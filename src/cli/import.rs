//! CLI command handler for CSV import
//!
//! Starts from the column mapping saved in settings, applies any flags,
//! optionally guesses columns from the header row, then previews or runs
//! the import.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::DisplayOptions;
use crate::error::FinanceResult;
use crate::services::import::{detect_mapping, read_source, ColumnMapping};
use crate::services::{FinanceData, ImportPipeline, ImportStatus};

/// Arguments for `import`
#[derive(Args)]
pub struct ImportArgs {
    /// Path to CSV file
    pub file: PathBuf,
    /// Guess columns from the header row
    #[arg(long)]
    pub detect: bool,
    /// Field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,
    /// Date format (chrono strftime syntax, e.g. "%d/%m/%Y")
    #[arg(long)]
    pub date_format: Option<String>,
    /// The file has no header row
    #[arg(long)]
    pub no_header: bool,
    #[arg(long)]
    pub date_column: Option<usize>,
    #[arg(long)]
    pub description_column: Option<usize>,
    #[arg(long)]
    pub category_column: Option<usize>,
    #[arg(long)]
    pub amount_column: Option<usize>,
    /// Column with debit/credit markers; amounts are then read as unsigned
    #[arg(long)]
    pub type_column: Option<usize>,
    /// Mark imported transactions as cleared
    #[arg(long)]
    pub cleared: bool,
    /// Show what would be imported without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    fn mapping(&self, base: &ColumnMapping, content: &str) -> FinanceResult<ColumnMapping> {
        let mut mapping = base.clone();
        if let Some(delimiter) = self.delimiter {
            mapping = mapping.with_delimiter(delimiter);
        }
        if let Some(format) = &self.date_format {
            mapping = mapping.with_date_format(format);
        }
        if self.detect {
            mapping = detect_mapping(content, &mapping)?;
        }
        if self.no_header {
            mapping = mapping.with_header(false);
        }
        mapping.date_column = self.date_column.unwrap_or(mapping.date_column);
        mapping.description_column = self.description_column.unwrap_or(mapping.description_column);
        mapping.category_column = self.category_column.unwrap_or(mapping.category_column);
        mapping.amount_column = self.amount_column.unwrap_or(mapping.amount_column);
        if let Some(column) = self.type_column {
            mapping = mapping.with_type_column(column);
        }
        Ok(mapping)
    }
}

/// Handle the import command
pub fn handle_import_command(
    data: &mut FinanceData,
    settings: &Settings,
    opts: &DisplayOptions,
    args: ImportArgs,
) -> FinanceResult<()> {
    let content = read_source(&args.file)?;

    let mapping = args.mapping(&settings.import, &content)?;
    let pipeline = ImportPipeline::new(mapping)?.mark_cleared(args.cleared);

    if args.dry_run {
        let preview = pipeline.preview(&content, data.transactions());
        let mut new_count = 0;
        let mut dup_count = 0;
        let mut err_count = 0;

        println!("Import Preview for '{}'", args.file.display());
        println!("{}", "=".repeat(40));
        for entry in &preview {
            match &entry.status {
                ImportStatus::New(txn) => {
                    new_count += 1;
                    println!(
                        "  line {:>4}  new        {} {} [{}] {}",
                        entry.line_number,
                        opts.date(txn.date()),
                        txn.description,
                        txn.category,
                        opts.money(txn.amount)
                    );
                }
                ImportStatus::Duplicate(txn) => {
                    dup_count += 1;
                    println!(
                        "  line {:>4}  duplicate  {} {} {}",
                        entry.line_number,
                        opts.date(txn.date()),
                        txn.description,
                        opts.money(txn.amount)
                    );
                }
                ImportStatus::Error(error) => {
                    err_count += 1;
                    println!("  line {:>4}  error      {}", entry.line_number, error);
                }
            }
        }
        println!();
        println!("  New transactions:   {}", new_count);
        println!("  Duplicates (skip):  {}", dup_count);
        println!("  Errors:             {}", err_count);
        return Ok(());
    }

    let result = pipeline.run(&content, data.transactions_mut())?;

    println!("Import Complete!");
    println!("  Imported:    {}", result.committed_count);
    println!("  Skipped:     {}", result.skipped_count);
    if !result.error_rows.is_empty() {
        println!("  Errors:      {}", result.error_rows.len());
        for row in &result.error_rows {
            println!("    Line {}: {}", row.line_number, row.error);
        }
    }
    println!("  Source:      {}", result.source_digest);

    Ok(())
}
