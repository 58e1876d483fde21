//! CSV import pipeline
//!
//! Turns delimited text into transactions using a declared column mapping.
//! Each row is either accepted whole or rejected whole; rejected rows are
//! reported with their line number and never abort the import. Accepted
//! rows are committed to the transaction store as one batch, so a large
//! file produces a single refresh notification.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, Transaction};
use crate::services::TransactionStore;

/// Category given to rows whose category cell is blank
pub const UNCATEGORIZED: &str = "Uncategorized";

const DEBIT_WORDS: &[&str] = &[
    "debit", "dr", "expense", "withdrawal", "out", "outflow", "payment", "purchase",
];
const CREDIT_WORDS: &[&str] = &["credit", "cr", "income", "deposit", "in", "inflow", "refund"];

/// Where each field lives in a row, and how to read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub description_column: usize,
    pub category_column: usize,
    pub amount_column: usize,
    /// Column holding "debit"/"credit" style direction markers
    pub type_column: Option<usize>,
    /// Whether the first row is a header
    pub has_header: bool,
    /// Amounts are unsigned magnitudes; the sign comes from `type_column`
    pub all_amounts_positive: bool,
    pub delimiter: char,
    /// chrono format string for the date column, with or without a time part
    pub date_format: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            description_column: 1,
            category_column: 2,
            amount_column: 3,
            type_column: None,
            has_header: true,
            all_amounts_positive: false,
            delimiter: ',',
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unsigned amounts whose direction is read from `type_column`
    pub fn with_type_column(mut self, type_column: usize) -> Self {
        self.type_column = Some(type_column);
        self.all_amounts_positive = true;
        self
    }

    pub fn with_all_amounts_positive(mut self, all_positive: bool) -> Self {
        self.all_amounts_positive = all_positive;
        self
    }

    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Fewest fields a row needs for every mapped column to exist
    pub fn required_fields(&self) -> usize {
        [
            self.date_column,
            self.description_column,
            self.category_column,
            self.amount_column,
        ]
        .into_iter()
        .chain(self.type_column)
        .max()
        .map_or(0, |max| max + 1)
    }

    /// Check the mapping is usable at all, independent of any data
    pub fn validate(&self) -> FinanceResult<()> {
        if !self.delimiter.is_ascii() {
            return Err(FinanceError::Mapping(format!(
                "Delimiter '{}' must be a single ASCII character",
                self.delimiter
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(FinanceError::Mapping("Date format cannot be empty".into()));
        }
        if self.all_amounts_positive && self.type_column.is_none() {
            return Err(FinanceError::Mapping(
                "Unsigned amounts need a type column to infer income or expense".into(),
            ));
        }
        Ok(())
    }
}

/// Why a single row was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRowError {
    /// A date, amount or type value could not be understood
    Parse(String),
    /// The row doesn't have the columns the mapping refers to
    Mapping(String),
}

impl fmt::Display for ImportRowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Mapping(msg) => write!(f, "mapping error: {}", msg),
        }
    }
}

/// What will happen to a row
#[derive(Debug, Clone, PartialEq)]
pub enum ImportStatus {
    /// Will be imported
    New(Transaction),
    /// Matches a stored transaction or an earlier row in the same file
    Duplicate(Transaction),
    /// Cannot be imported
    Error(ImportRowError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreviewEntry {
    /// 1-based line number in the source text
    pub line_number: u64,
    pub status: ImportStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line_number: u64,
    pub error: ImportRowError,
}

/// Outcome of a completed import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportResult {
    /// Rows added to the store
    pub committed_count: usize,
    /// Duplicates plus rows too short for the mapping
    pub skipped_count: usize,
    /// The duplicate part of `skipped_count`
    pub duplicate_count: usize,
    /// Every rejected row, in file order
    pub error_rows: Vec<RowError>,
    /// Digest of the imported text, identifying the source file
    pub source_digest: String,
}

/// Parses CSV text with a fixed, validated mapping
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    mapping: ColumnMapping,
    mark_cleared: bool,
}

impl ImportPipeline {
    /// Create a pipeline, rejecting mappings that could never work
    pub fn new(mapping: ColumnMapping) -> FinanceResult<Self> {
        mapping.validate()?;
        Ok(Self {
            mapping,
            mark_cleared: false,
        })
    }

    /// Mark every imported transaction as cleared
    pub fn mark_cleared(mut self, cleared: bool) -> Self {
        self.mark_cleared = cleared;
        self
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// Classify every row without changing anything
    pub fn preview(&self, content: &str, existing: &TransactionStore) -> Vec<ImportPreviewEntry> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.mapping.delimiter as u8)
            .from_reader(content.as_bytes());

        let mut seen = existing.dedup_keys();
        let mut entries = Vec::new();

        for (position, result) in reader.records().enumerate() {
            if position == 0 && self.mapping.has_header {
                continue;
            }

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line_number = e.position().map_or(0, |p| p.line());
                    entries.push(ImportPreviewEntry {
                        line_number,
                        status: ImportStatus::Error(ImportRowError::Parse(format!(
                            "unreadable row: {}",
                            e
                        ))),
                    });
                    continue;
                }
            };

            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let line_number = record.position().map_or(0, |p| p.line());
            let status = match self.parse_record(&record) {
                Ok(txn) if seen.insert(txn.dedup_key()) => ImportStatus::New(txn),
                Ok(txn) => ImportStatus::Duplicate(txn),
                Err(e) => ImportStatus::Error(e),
            };
            entries.push(ImportPreviewEntry {
                line_number,
                status,
            });
        }

        entries
    }

    /// Import `content` into `store`
    ///
    /// New rows are committed in one batch; duplicates and bad rows are
    /// counted and reported. Nothing is published when no row is new.
    pub fn run(&self, content: &str, store: &mut TransactionStore) -> FinanceResult<ImportResult> {
        let preview = self.preview(content, store);

        let mut result = ImportResult {
            source_digest: source_digest(content),
            ..ImportResult::default()
        };
        let mut accepted = Vec::new();

        for entry in preview {
            match entry.status {
                ImportStatus::New(txn) => accepted.push(txn),
                ImportStatus::Duplicate(txn) => {
                    tracing::debug!(line = entry.line_number, transaction = %txn, "skipping duplicate row");
                    result.duplicate_count += 1;
                    result.skipped_count += 1;
                }
                ImportStatus::Error(error) => {
                    tracing::warn!(line = entry.line_number, %error, "rejected import row");
                    if matches!(error, ImportRowError::Mapping(_)) {
                        result.skipped_count += 1;
                    }
                    result.error_rows.push(RowError {
                        line_number: entry.line_number,
                        error,
                    });
                }
            }
        }

        result.committed_count = store.add_batch(accepted)?;

        tracing::info!(
            source = %result.source_digest,
            committed = result.committed_count,
            skipped = result.skipped_count,
            errors = result.error_rows.len(),
            "import finished"
        );
        Ok(result)
    }

    /// Read `path` and import it
    ///
    /// An unreadable file fails the whole import before anything is parsed.
    pub fn import_file(
        &self,
        path: &Path,
        store: &mut TransactionStore,
    ) -> FinanceResult<ImportResult> {
        let content = read_source(path)?;
        self.run(&content, store)
    }

    fn parse_record(&self, record: &StringRecord) -> Result<Transaction, ImportRowError> {
        let required = self.mapping.required_fields();
        if record.len() < required {
            return Err(ImportRowError::Mapping(format!(
                "row has {} fields, mapping needs {}",
                record.len(),
                required
            )));
        }

        let field = |index: usize| record.get(index).unwrap_or("").trim();

        let timestamp = parse_timestamp(field(self.mapping.date_column), &self.mapping.date_format)?;

        let raw_amount = field(self.mapping.amount_column);
        let amount = Money::parse_statement(raw_amount)
            .map_err(|e| ImportRowError::Parse(e.to_string()))?;

        let amount = match self.mapping.type_column {
            Some(type_column) if self.mapping.all_amounts_positive => {
                match classify_direction(field(type_column)) {
                    Some(Direction::Debit) => -amount.abs(),
                    Some(Direction::Credit) => amount.abs(),
                    None => {
                        return Err(ImportRowError::Parse(format!(
                            "unrecognized transaction type '{}'",
                            field(type_column)
                        )))
                    }
                }
            }
            _ => amount,
        };

        let category = match field(self.mapping.category_column) {
            "" => UNCATEGORIZED,
            category => category,
        };

        let mut txn = Transaction::new(
            timestamp,
            field(self.mapping.description_column),
            category,
            amount,
        );
        txn.cleared = self.mark_cleared;
        Ok(txn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Debit,
    Credit,
}

fn classify_direction(value: &str) -> Option<Direction> {
    let value = value.trim().to_lowercase();
    if DEBIT_WORDS.contains(&value.as_str()) {
        Some(Direction::Debit)
    } else if CREDIT_WORDS.contains(&value.as_str()) {
        Some(Direction::Credit)
    } else {
        None
    }
}

fn parse_timestamp(value: &str, format: &str) -> Result<NaiveDateTime, ImportRowError> {
    NaiveDateTime::parse_from_str(value, format)
        .or_else(|_| {
            NaiveDate::parse_from_str(value, format).map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| {
            ImportRowError::Parse(format!(
                "could not parse date '{}' with format '{}'",
                value, format
            ))
        })
}

/// Short hex digest identifying a piece of imported text
pub fn source_digest(content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("src-{:016x}", hasher.finish())
}

/// Read a statement file into memory
pub fn read_source(path: &Path) -> FinanceResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| FinanceError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Guess a mapping from a header row by keyword
///
/// Columns that can't be recognised keep their position from `base`. A
/// recognised debit/credit column switches the mapping to unsigned amounts.
pub fn detect_mapping_from_headers(headers: &StringRecord, base: &ColumnMapping) -> ColumnMapping {
    let mut mapping = base.clone().with_header(true);
    let (mut date, mut kind, mut category, mut amount, mut description) =
        (None, None, None, None, None);

    for (idx, header) in headers.iter().enumerate() {
        let h = header.trim().to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| h.contains(w));

        if date.is_none() && has(&["date", "posted", "time"]) {
            date = Some(idx);
        } else if kind.is_none() && has(&["type", "direction", "debit/credit", "dr/cr"]) {
            kind = Some(idx);
        } else if category.is_none() && has(&["category"]) {
            category = Some(idx);
        } else if amount.is_none() && has(&["amount", "value", "sum"]) {
            amount = Some(idx);
        } else if description.is_none()
            && has(&["description", "payee", "merchant", "memo", "name", "details"])
        {
            description = Some(idx);
        }
    }

    mapping.date_column = date.unwrap_or(mapping.date_column);
    mapping.category_column = category.unwrap_or(mapping.category_column);
    mapping.amount_column = amount.unwrap_or(mapping.amount_column);
    mapping.description_column = description.unwrap_or(mapping.description_column);
    match kind {
        Some(idx) => mapping.with_type_column(idx),
        None => {
            if mapping.type_column.is_none() {
                mapping.all_amounts_positive = false;
            }
            mapping
        }
    }
}

/// Read the first row of `content` and guess a mapping from it
pub fn detect_mapping(content: &str, base: &ColumnMapping) -> FinanceResult<ColumnMapping> {
    base.validate()?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(base.delimiter as u8)
        .from_reader(content.as_bytes());

    let headers = reader
        .records()
        .next()
        .ok_or_else(|| FinanceError::Import("File is empty".into()))??;
    Ok(detect_mapping_from_headers(&headers, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{RefreshBus, RefreshListener};
    use crate::models::RefreshType;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Default)]
    struct Counter(Mutex<usize>);

    impl RefreshListener for Counter {
        fn on_data_refresh(&self, _kind: RefreshType) {
            *self.0.lock().unwrap() += 1;
        }
    }

    fn create_test_store() -> (TransactionStore, Arc<Counter>) {
        let bus = Arc::new(RefreshBus::new());
        let counter = Arc::new(Counter::default());
        bus.subscribe(counter.clone());
        (TransactionStore::new(bus), counter)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const BASIC_CSV: &str = "Date,Description,Category,Amount\n\
                             2025-05-23,Salary,Income,1000.00\n\
                             2025-05-23,Groceries,Food,-100.00\n\
                             2025-05-24,Bus pass,Transport,-45.50\n";

    #[test]
    fn test_import_basic_csv() {
        let (mut store, counter) = create_test_store();
        let pipeline = ImportPipeline::new(ColumnMapping::new()).unwrap();

        let result = pipeline.run(BASIC_CSV, &mut store).unwrap();

        assert_eq!(result.committed_count, 3);
        assert_eq!(result.skipped_count, 0);
        assert!(result.error_rows.is_empty());
        assert!(result.source_digest.starts_with("src-"));
        assert_eq!(*counter.0.lock().unwrap(), 1);

        let groceries = store.get(1).unwrap();
        assert_eq!(groceries.date(), date(2025, 5, 23));
        assert_eq!(groceries.description, "Groceries");
        assert_eq!(groceries.category, "Food");
        assert_eq!(groceries.amount.cents(), -10000);
        assert!(!groceries.cleared);
    }

    #[test]
    fn test_importing_twice_commits_once() {
        let (mut store, counter) = create_test_store();
        let pipeline = ImportPipeline::new(ColumnMapping::new()).unwrap();

        pipeline.run(BASIC_CSV, &mut store).unwrap();
        let second = pipeline.run(BASIC_CSV, &mut store).unwrap();

        assert_eq!(second.committed_count, 0);
        assert_eq!(second.skipped_count, 3);
        assert_eq!(second.duplicate_count, 3);
        assert_eq!(store.len(), 3);
        // Nothing new, so no second notification.
        assert_eq!(*counter.0.lock().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_rows_within_file() {
        let (mut store, _counter) = create_test_store();
        let csv = "Date,Description,Category,Amount\n\
                   2025-05-01,Coffee,Food,-3.50\n\
                   2025-05-01,Coffee,Snacks,-3.50\n";
        let result = ImportPipeline::new(ColumnMapping::new())
            .unwrap()
            .run(csv, &mut store)
            .unwrap();

        assert_eq!(result.committed_count, 1);
        assert_eq!(result.duplicate_count, 1);
    }

    #[test]
    fn test_unparsable_date_is_reported_by_line() {
        let (mut store, _counter) = create_test_store();
        let csv = "Date,Description,Category,Amount\n\
                   2025-05-01,Coffee,Food,-3.50\n\
                   not-a-date,Mystery,Food,-1.00\n\
                   2025-05-02,Tea,Food,-2.00\n";
        let result = ImportPipeline::new(ColumnMapping::new())
            .unwrap()
            .run(csv, &mut store)
            .unwrap();

        assert_eq!(result.committed_count, 2);
        assert_eq!(result.skipped_count, 0);
        assert_eq!(result.error_rows.len(), 1);
        assert_eq!(result.error_rows[0].line_number, 3);
        assert!(matches!(result.error_rows[0].error, ImportRowError::Parse(_)));
    }

    #[test]
    fn test_short_row_is_skipped_with_mapping_error() {
        let (mut store, _counter) = create_test_store();
        let csv = "Date,Description,Category,Amount\n\
                   2025-05-01,Coffee\n\
                   2025-05-02,Tea,Food,-2.00\n";
        let result = ImportPipeline::new(ColumnMapping::new())
            .unwrap()
            .run(csv, &mut store)
            .unwrap();

        assert_eq!(result.committed_count, 1);
        assert_eq!(result.skipped_count, 1);
        assert_eq!(
            result.error_rows,
            vec![RowError {
                line_number: 2,
                error: ImportRowError::Mapping("row has 2 fields, mapping needs 4".into()),
            }]
        );
    }

    #[test]
    fn test_bad_amount_rejects_row() {
        let (mut store, _counter) = create_test_store();
        let csv = "2025-05-01,Coffee,Food,cheap\n";
        let mapping = ColumnMapping::new().with_header(false);
        let result = ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();

        assert_eq!(result.committed_count, 0);
        assert_eq!(result.error_rows[0].line_number, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_amounts_are_rejected() {
        let (mut store, counter) = create_test_store();
        let csv = "2025-05-01;Coffee;Food;-12,50\n\
                   2025-05-02;Cheque;Misc;ref#77\n\
                   2025-05-03;Transfer;Misc;1e3\n\
                   2025-05-04;Rent;Housing;-1,250.00\n";
        let mapping = ColumnMapping::new().with_header(false).with_delimiter(';');
        let result = ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();

        assert_eq!(result.committed_count, 1);
        assert_eq!(store.get(0).unwrap().amount.cents(), -125000);
        let lines: Vec<u64> = result.error_rows.iter().map(|e| e.line_number).collect();
        assert_eq!(lines, vec![1, 2, 3]);
        assert!(result
            .error_rows
            .iter()
            .all(|e| matches!(e.error, ImportRowError::Parse(_))));
        assert_eq!(*counter.0.lock().unwrap(), 1);
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let (mut store, _counter) = create_test_store();
        let csv = "2025-05-01,Glitch,Misc,-90000000000000000\n\
                   2025-05-02,Glitch,Misc,-90000000000000000\n";
        let mapping = ColumnMapping::new().with_header(false);
        let result = ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();

        assert_eq!(result.committed_count, 0);
        assert_eq!(result.error_rows.len(), 2);
        assert!(matches!(result.error_rows[0].error, ImportRowError::Parse(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_normalizes_text_and_defaults_category() {
        let (mut store, _counter) = create_test_store();
        let csv = "2025-05-01,  Corner Shop  ,   ,-3.00\n";
        let mapping = ColumnMapping::new().with_header(false);
        ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();

        let txn = store.get(0).unwrap();
        assert_eq!(txn.description, "Corner Shop");
        assert_eq!(txn.category, UNCATEGORIZED);
    }

    #[test]
    fn test_type_column_sets_sign() {
        let (mut store, _counter) = create_test_store();
        let csv = "Date;Type;Amount;Description;Category\n\
                   23/05/2025;CREDIT;1000.00;Salary;Income\n\
                   24/05/2025;debit;100.00;Groceries;Food\n\
                   25/05/2025;sideways;5.00;Odd;Misc\n";
        let mapping = ColumnMapping {
            date_column: 0,
            description_column: 3,
            category_column: 4,
            amount_column: 2,
            ..ColumnMapping::default()
        }
        .with_type_column(1)
        .with_delimiter(';')
        .with_date_format("%d/%m/%Y");

        let result = ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();

        assert_eq!(result.committed_count, 2);
        assert_eq!(store.get(1).unwrap().amount.cents(), -10000);
        assert_eq!(store.get(1).unwrap().date(), date(2025, 5, 24));
        assert_eq!(result.error_rows.len(), 1);
        assert_eq!(result.error_rows[0].line_number, 4);
    }

    #[test]
    fn test_signed_amounts_ignore_type_column() {
        let (mut store, _counter) = create_test_store();
        let csv = "2025-05-01,Refund,Shopping,20.00,debit\n";
        let mapping = ColumnMapping {
            type_column: Some(4),
            ..ColumnMapping::default()
        }
        .with_header(false);

        ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();
        assert_eq!(store.get(0).unwrap().amount.cents(), 2000);
    }

    #[test]
    fn test_date_time_format() {
        let (mut store, _counter) = create_test_store();
        let csv = "2025-05-01 18:45,Dinner,Food,-30\n";
        let mapping = ColumnMapping::new()
            .with_header(false)
            .with_date_format("%Y-%m-%d %H:%M");

        ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();
        let txn = store.get(0).unwrap();
        assert_eq!(txn.timestamp.format("%H:%M").to_string(), "18:45");
    }

    #[test]
    fn test_skips_existing_store_transactions() {
        let (mut store, _counter) = create_test_store();
        store
            .add(Transaction::on_date(
                date(2025, 5, 23),
                "Groceries",
                "Food",
                Money::from_units(-100),
            ))
            .unwrap();

        let result = ImportPipeline::new(ColumnMapping::new())
            .unwrap()
            .run(BASIC_CSV, &mut store)
            .unwrap();
        assert_eq!(result.committed_count, 2);
        assert_eq!(result.duplicate_count, 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let (store, counter) = create_test_store();
        let pipeline = ImportPipeline::new(ColumnMapping::new()).unwrap();

        let preview = pipeline.preview(BASIC_CSV, &store);

        assert_eq!(preview.len(), 3);
        assert!(preview
            .iter()
            .all(|e| matches!(e.status, ImportStatus::New(_))));
        assert_eq!(preview[0].line_number, 2);
        assert!(store.is_empty());
        assert_eq!(*counter.0.lock().unwrap(), 0);
    }

    #[test]
    fn test_mark_cleared() {
        let (mut store, _counter) = create_test_store();
        ImportPipeline::new(ColumnMapping::new())
            .unwrap()
            .mark_cleared(true)
            .run(BASIC_CSV, &mut store)
            .unwrap();
        assert!(store.iter().all(|t| t.cleared));
    }

    #[test]
    fn test_invalid_mappings_fail_up_front() {
        let err = ImportPipeline::new(ColumnMapping::new().with_all_amounts_positive(true))
            .unwrap_err();
        assert!(matches!(err, FinanceError::Mapping(_)));

        let err = ImportPipeline::new(ColumnMapping::new().with_delimiter('¦')).unwrap_err();
        assert!(matches!(err, FinanceError::Mapping(_)));
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(ColumnMapping::new().required_fields(), 4);
        assert_eq!(ColumnMapping::new().with_type_column(6).required_fields(), 7);
    }

    #[test]
    fn test_detect_mapping() {
        let content = "Posted Date,Merchant Name,Transaction Type,Amount,Category\n";
        let mapping = detect_mapping(content, &ColumnMapping::new()).unwrap();

        assert_eq!(mapping.date_column, 0);
        assert_eq!(mapping.description_column, 1);
        assert_eq!(mapping.type_column, Some(2));
        assert!(mapping.all_amounts_positive);
        assert_eq!(mapping.amount_column, 3);
        assert_eq!(mapping.category_column, 4);
        assert!(mapping.has_header);

        assert!(detect_mapping("", &ColumnMapping::new()).is_err());
    }

    #[test]
    fn test_detected_type_column_sets_sign() {
        let (mut store, _counter) = create_test_store();
        let csv = "Date,Description,Category,Type,Amount\n2025-05-01,Coffee,Food,debit,3.50";
        let mapping = detect_mapping(csv, &ColumnMapping::new()).unwrap();
        assert_eq!(mapping.type_column, Some(3));
        assert!(mapping.all_amounts_positive);

        let result = ImportPipeline::new(mapping).unwrap().run(csv, &mut store).unwrap();
        assert_eq!(result.committed_count, 1);
        assert_eq!(store.get(0).unwrap().amount.cents(), -350);
    }

    #[test]
    fn test_detection_without_type_column_keeps_signed_amounts() {
        let content = "Date,Description,Category,Amount\n";
        let mapping = detect_mapping(content, &ColumnMapping::new()).unwrap();
        assert_eq!(mapping.type_column, None);
        assert!(!mapping.all_amounts_positive);
    }

    #[test]
    fn test_import_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("statement.csv");
        std::fs::write(&path, BASIC_CSV).unwrap();
        let (mut store, _counter) = create_test_store();
        let pipeline = ImportPipeline::new(ColumnMapping::new()).unwrap();

        let result = pipeline.import_file(&path, &mut store).unwrap();
        assert_eq!(result.committed_count, 3);

        let missing = temp_dir.path().join("missing.csv");
        let err = pipeline.import_file(&missing, &mut store).unwrap_err();
        assert!(matches!(err, FinanceError::Io(_)));
        assert!(matches!(read_source(&missing), Err(FinanceError::Io(_))));
    }

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(source_digest(BASIC_CSV), source_digest(BASIC_CSV));
        assert_ne!(source_digest(BASIC_CSV), source_digest("other"));
    }
}
