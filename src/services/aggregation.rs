//! Report aggregation
//!
//! Stateless functions deriving report data from a slice of transactions
//! and a budget mapping. Nothing here is cached: callers pass the current
//! store contents on every read, so reports cannot drift from the data.
//!
//! Expenses are always reported as positive magnitudes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::models::{Money, Transaction};

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income and expense totals over some period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub income: Money,
    pub expenses: Money,
}

impl PeriodTotals {
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Spending against the limit for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUtilization {
    pub category: String,
    pub spent: Money,
    pub limit: Money,
    /// `spent` as a percentage of `limit`; 0 when there is no limit
    pub percentage: f64,
}

impl CategoryUtilization {
    pub fn is_over_budget(&self) -> bool {
        !self.limit.is_zero() && self.spent > self.limit
    }
}

/// Total expense magnitude per category
pub fn category_expenses(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(txn.category.clone()).or_insert_with(Money::zero) += txn.amount.abs();
    }
    totals
}

/// Income per calendar date; dates without income are absent
pub fn daily_incomes(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Money> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_income()) {
        *totals.entry(txn.date()).or_insert_with(Money::zero) += txn.amount;
    }
    totals
}

/// Expense magnitude per calendar date; dates without expenses are absent
pub fn daily_expenses(transactions: &[Transaction]) -> BTreeMap<NaiveDate, Money> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *totals.entry(txn.date()).or_insert_with(Money::zero) += txn.amount.abs();
    }
    totals
}

/// Every date that has at least one transaction, ascending
pub fn distinct_dates(transactions: &[Transaction]) -> Vec<NaiveDate> {
    transactions
        .iter()
        .map(Transaction::date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Income and expense totals per calendar month
pub fn monthly_totals(transactions: &[Transaction]) -> BTreeMap<YearMonth, PeriodTotals> {
    let mut months: BTreeMap<YearMonth, PeriodTotals> = BTreeMap::new();
    for txn in transactions {
        let entry = months.entry(YearMonth::of(txn.date())).or_default();
        if txn.is_income() {
            entry.income += txn.amount;
        } else if txn.is_expense() {
            entry.expenses += txn.amount.abs();
        }
    }
    months
}

pub fn total_income(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

pub fn total_expenses(transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum()
}

/// Total expenses as a percentage of the sum of all category budgets
///
/// 0.0 when no budget is set, however much has been spent.
pub fn overall_budget_percentage(
    transactions: &[Transaction],
    budgets: &BTreeMap<String, Money>,
) -> f64 {
    let budget_total: Money = budgets.values().sum();
    total_expenses(transactions).percent_of(budget_total)
}

/// Spending against limits for every category that has either
pub fn category_utilization(
    transactions: &[Transaction],
    budgets: &BTreeMap<String, Money>,
) -> Vec<CategoryUtilization> {
    let spent = category_expenses(transactions);
    let names: BTreeSet<&String> = spent.keys().chain(budgets.keys()).collect();

    names
        .into_iter()
        .map(|category| {
            let spent = spent.get(category).copied().unwrap_or_default();
            let limit = budgets.get(category).copied().unwrap_or_default();
            CategoryUtilization {
                category: category.clone(),
                spent,
                limit,
                percentage: spent.percent_of(limit),
            }
        })
        .collect()
}

/// Number of days in the month containing `date`
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Daily allowance: the monthly budget spread over the days of `today`'s month
///
/// Always based on the month containing `today`, not on the dates being
/// displayed, so the allowance doesn't change while browsing history.
pub fn daily_budget(monthly_budget: Money, today: NaiveDate) -> Money {
    monthly_budget.split_evenly(days_in_month(today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn txn(month: u32, day: u32, category: &str, units: i64) -> Transaction {
        Transaction::on_date(date(month, day), category, category, Money::from_units(units))
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::on_date(date(5, 23), "Salary", "Income", Money::from_units(1000)),
            Transaction::on_date(date(5, 23), "Groceries", "Food", Money::from_units(-100)),
        ]
    }

    #[test]
    fn test_salary_and_groceries_example() {
        let transactions = sample();

        let expenses = category_expenses(&transactions);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses["Food"], Money::from_units(100));

        let incomes = daily_incomes(&transactions);
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[&date(5, 23)], Money::from_units(1000));
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let huge = Money::from_cents(-90_000_000_000_000_000);
        let transactions = vec![
            Transaction::on_date(date(5, 1), "Glitch", "Misc", huge),
            Transaction::on_date(date(5, 1), "Glitch", "Misc", huge),
        ];

        assert_eq!(category_expenses(&transactions)["Misc"], Money::from_cents(i64::MAX));
        assert_eq!(daily_expenses(&transactions)[&date(5, 1)], Money::from_cents(i64::MAX));
        assert_eq!(monthly_totals(&transactions).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<Transaction> = Vec::new();
        assert!(category_expenses(&none).is_empty());
        assert!(daily_incomes(&none).is_empty());
        assert!(daily_expenses(&none).is_empty());
        assert!(distinct_dates(&none).is_empty());
        assert!(monthly_totals(&none).is_empty());
        assert_eq!(overall_budget_percentage(&none, &BTreeMap::new()), 0.0);
    }

    #[test]
    fn test_daily_groups_by_calendar_date() {
        let morning = Transaction::new(
            date(5, 1).and_hms_opt(8, 0, 0).unwrap(),
            "Bakery",
            "Food",
            Money::from_units(-5),
        );
        let evening = Transaction::new(
            date(5, 1).and_hms_opt(20, 30, 0).unwrap(),
            "Dinner",
            "Food",
            Money::from_units(-20),
        );
        let transactions = vec![morning, evening, txn(5, 3, "Refund", 7)];

        let expenses = daily_expenses(&transactions);
        assert_eq!(expenses[&date(5, 1)], Money::from_units(25));
        assert!(!expenses.contains_key(&date(5, 3)));

        let incomes = daily_incomes(&transactions);
        assert!(!incomes.contains_key(&date(5, 1)));
        assert_eq!(incomes[&date(5, 3)], Money::from_units(7));
    }

    #[test]
    fn test_distinct_dates_sorted() {
        let transactions = vec![txn(6, 2, "a", -1), txn(5, 30, "b", 1), txn(6, 2, "c", -3)];
        assert_eq!(distinct_dates(&transactions), vec![date(5, 30), date(6, 2)]);
    }

    #[test]
    fn test_overall_budget_percentage() {
        let transactions = vec![txn(5, 1, "Food", -150), txn(5, 2, "Rent", -450), txn(5, 3, "Pay", 2000)];

        assert_eq!(overall_budget_percentage(&transactions, &BTreeMap::new()), 0.0);

        let budgets = BTreeMap::from([
            ("Food".to_string(), Money::from_units(200)),
            ("Rent".to_string(), Money::from_units(1000)),
        ]);
        assert_eq!(overall_budget_percentage(&transactions, &budgets), 50.0);
    }

    #[test]
    fn test_monthly_totals() {
        let transactions = vec![
            txn(4, 30, "Pay", 1000),
            txn(5, 1, "Food", -40),
            txn(5, 15, "Food", -60),
            txn(5, 31, "Pay", 1000),
        ];
        let months = monthly_totals(&transactions);

        let april = months[&YearMonth { year: 2025, month: 4 }];
        assert_eq!(april.income, Money::from_units(1000));
        assert_eq!(april.expenses, Money::zero());

        let may = months[&YearMonth::of(date(5, 1))];
        assert_eq!(may.expenses, Money::from_units(100));
        assert_eq!(may.net(), Money::from_units(900));
        assert_eq!(YearMonth::of(date(5, 1)).to_string(), "2025-05");
    }

    #[test]
    fn test_category_utilization() {
        let transactions = vec![txn(5, 1, "Food", -250), txn(5, 2, "Fun", -30)];
        let budgets = BTreeMap::from([
            ("Food".to_string(), Money::from_units(200)),
            ("Travel".to_string(), Money::from_units(500)),
        ]);

        let rows = category_utilization(&transactions, &budgets);
        let names: Vec<_> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Fun", "Travel"]);

        assert_eq!(rows[0].percentage, 125.0);
        assert!(rows[0].is_over_budget());
        assert_eq!(rows[1].limit, Money::zero());
        assert_eq!(rows[1].percentage, 0.0);
        assert!(!rows[1].is_over_budget());
        assert_eq!(rows[2].spent, Money::zero());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2, 10)), 28);
        assert_eq!(days_in_month(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()), 29);
        assert_eq!(days_in_month(date(4, 30)), 30);
        assert_eq!(days_in_month(date(12, 31)), 31);
    }

    #[test]
    fn test_daily_budget_uses_given_month() {
        let monthly = Money::from_units(3100);
        assert_eq!(daily_budget(monthly, date(5, 5)), Money::from_units(100));
        assert_eq!(daily_budget(monthly, date(6, 5)).cents(), 10333);
        assert_eq!(daily_budget(Money::zero(), date(6, 5)), Money::zero());
    }
}
