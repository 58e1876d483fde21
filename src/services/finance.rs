//! Per-user finance session
//!
//! [`FinanceData`] is the aggregate root for one user: it owns the
//! transaction and budget stores, shares the application's refresh bus with
//! them, and answers report queries by running the aggregation functions
//! over the live stores.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::error::FinanceResult;
use crate::events::RefreshBus;
use crate::models::{FinanceSnapshot, Money, RefreshType};
use crate::storage::FinanceStore;

use super::aggregation::{self, CategoryUtilization, PeriodTotals, YearMonth};
use super::budgets::BudgetStore;
use super::transactions::TransactionStore;

pub struct FinanceData {
    username: String,
    transactions: TransactionStore,
    budgets: BudgetStore,
    bus: Arc<RefreshBus>,
}

impl FinanceData {
    /// Start an empty session for `username`
    pub fn new(username: impl Into<String>, bus: Arc<RefreshBus>) -> Self {
        Self::from_snapshot(username, FinanceSnapshot::default(), bus)
    }

    pub fn from_snapshot(
        username: impl Into<String>,
        snapshot: FinanceSnapshot,
        bus: Arc<RefreshBus>,
    ) -> Self {
        Self {
            username: username.into(),
            transactions: TransactionStore::with_transactions(snapshot.transactions, bus.clone()),
            budgets: BudgetStore::with_budgets(
                snapshot.category_budgets,
                snapshot.monthly_budget,
                bus.clone(),
            ),
            bus,
        }
    }

    /// Load `username`'s data and tell subscribers everything changed
    pub fn load(
        store: &dyn FinanceStore,
        username: &str,
        bus: Arc<RefreshBus>,
    ) -> FinanceResult<Self> {
        let snapshot = store.load(username)?;
        let data = Self::from_snapshot(username, snapshot, bus);
        tracing::info!(
            user = username,
            transactions = data.transactions.len(),
            budgets = data.budgets.category_budgets().len(),
            "finance session loaded"
        );
        data.refresh_all();
        Ok(data)
    }

    pub fn save(&self, store: &dyn FinanceStore) -> FinanceResult<()> {
        store.save(&self.username, &self.snapshot())?;
        tracing::info!(user = %self.username, "finance session saved");
        Ok(())
    }

    pub fn snapshot(&self) -> FinanceSnapshot {
        FinanceSnapshot {
            transactions: self.transactions.as_slice().to_vec(),
            category_budgets: self.budgets.category_budgets().clone(),
            monthly_budget: self.budgets.monthly_budget(),
            ..FinanceSnapshot::default()
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn bus(&self) -> &Arc<RefreshBus> {
        &self.bus
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut TransactionStore {
        &mut self.transactions
    }

    pub fn budgets(&self) -> &BudgetStore {
        &self.budgets
    }

    pub fn budgets_mut(&mut self) -> &mut BudgetStore {
        &mut self.budgets
    }

    /// Announce that display settings changed
    pub fn notify_settings_changed(&self) {
        self.bus.publish(RefreshType::Settings);
    }

    /// Ask every subscriber to rebuild from scratch
    pub fn refresh_all(&self) {
        self.bus.publish(RefreshType::All);
    }

    pub fn category_expenses(&self) -> BTreeMap<String, Money> {
        aggregation::category_expenses(self.transactions.as_slice())
    }

    pub fn category_budgets(&self) -> BTreeMap<String, Money> {
        self.budgets.category_budgets().clone()
    }

    pub fn daily_incomes(&self) -> BTreeMap<NaiveDate, Money> {
        aggregation::daily_incomes(self.transactions.as_slice())
    }

    pub fn daily_expenses(&self) -> BTreeMap<NaiveDate, Money> {
        aggregation::daily_expenses(self.transactions.as_slice())
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        aggregation::distinct_dates(self.transactions.as_slice())
    }

    pub fn monthly_totals(&self) -> BTreeMap<YearMonth, PeriodTotals> {
        aggregation::monthly_totals(self.transactions.as_slice())
    }

    pub fn category_utilization(&self) -> Vec<CategoryUtilization> {
        aggregation::category_utilization(
            self.transactions.as_slice(),
            self.budgets.category_budgets(),
        )
    }

    pub fn overall_budget_percentage(&self) -> f64 {
        aggregation::overall_budget_percentage(
            self.transactions.as_slice(),
            self.budgets.category_budgets(),
        )
    }

    pub fn monthly_budget(&self) -> Money {
        self.budgets.monthly_budget()
    }

    /// Today's allowance, derived from the current month's length
    pub fn daily_budget(&self) -> Money {
        self.daily_budget_on(Local::now().date_naive())
    }

    pub fn daily_budget_on(&self, today: NaiveDate) -> Money {
        aggregation::daily_budget(self.budgets.monthly_budget(), today)
    }
}
