//! Budget store
//!
//! Monthly limits per category plus an overall monthly budget. A category
//! without a limit reads as zero; limits are never negative.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{FinanceError, FinanceResult};
use crate::events::RefreshBus;
use crate::models::{Money, RefreshType};

pub struct BudgetStore {
    category_budgets: BTreeMap<String, Money>,
    monthly_budget: Money,
    bus: Arc<RefreshBus>,
}

impl BudgetStore {
    pub fn new(bus: Arc<RefreshBus>) -> Self {
        Self::with_budgets(BTreeMap::new(), Money::zero(), bus)
    }

    /// Wrap already-stored budgets; nothing is published
    pub fn with_budgets(
        category_budgets: BTreeMap<String, Money>,
        monthly_budget: Money,
        bus: Arc<RefreshBus>,
    ) -> Self {
        Self {
            category_budgets,
            monthly_budget,
            bus,
        }
    }

    /// Insert or replace the limit for `category`
    pub fn set_category_budget(&mut self, category: &str, amount: Money) -> FinanceResult<()> {
        if category.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Budget category cannot be empty".into(),
            ));
        }
        ensure_non_negative(amount, category)?;

        let previous = self.category_budgets.insert(category.to_string(), amount);
        tracing::debug!(category, %amount, ?previous, "set category budget");
        self.bus.publish(RefreshType::Budgets);
        Ok(())
    }

    /// Limit for `category`, zero when none is set
    pub fn category_budget(&self, category: &str) -> Money {
        self.category_budgets
            .get(category)
            .copied()
            .unwrap_or_default()
    }

    /// Remove the limit for `category`; true if one existed
    pub fn delete_category_budget(&mut self, category: &str) -> bool {
        if self.category_budgets.remove(category).is_none() {
            return false;
        }
        tracing::debug!(category, "deleted category budget");
        self.bus.publish(RefreshType::Budgets);
        true
    }

    pub fn category_budgets(&self) -> &BTreeMap<String, Money> {
        &self.category_budgets
    }

    pub fn total_category_budgets(&self) -> Money {
        self.category_budgets.values().sum()
    }

    pub fn set_monthly_budget(&mut self, amount: Money) -> FinanceResult<()> {
        ensure_non_negative(amount, "monthly budget")?;
        self.monthly_budget = amount;
        tracing::debug!(%amount, "set monthly budget");
        self.bus.publish(RefreshType::Budgets);
        Ok(())
    }

    pub fn monthly_budget(&self) -> Money {
        self.monthly_budget
    }
}

fn ensure_non_negative(amount: Money, what: &str) -> FinanceResult<()> {
    if amount.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Budget for '{}' cannot be negative: {}",
            what, amount
        )));
    }
    Ok(())
}
