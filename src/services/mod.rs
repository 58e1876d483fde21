//! Service layer for the finance tracker
//!
//! The stores own the in-memory data and publish refresh notifications when
//! it changes; aggregation and import are built on top of them.

pub mod aggregation;
pub mod budgets;
pub mod finance;
pub mod import;
pub mod transactions;

pub use aggregation::{CategoryUtilization, PeriodTotals, YearMonth};
pub use budgets::BudgetStore;
pub use finance::FinanceData;
pub use import::{
    ColumnMapping, ImportPipeline, ImportPreviewEntry, ImportResult, ImportRowError,
    ImportStatus, RowError,
};
pub use transactions::{TransactionStore, ANY_CATEGORY};
