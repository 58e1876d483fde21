//! Transaction store
//!
//! Owns one user's transactions in insertion order. Every successful
//! mutation publishes [`RefreshType::Transactions`] on the session's bus.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::error::{FinanceError, FinanceResult};
use crate::events::RefreshBus;
use crate::models::{DedupKey, RefreshType, Transaction, TransactionDraft};

/// Filter value matching every category
pub const ANY_CATEGORY: &str = "*";

/// Ordered, in-memory collection of transactions
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    bus: Arc<RefreshBus>,
}

impl TransactionStore {
    pub fn new(bus: Arc<RefreshBus>) -> Self {
        Self::with_transactions(Vec::new(), bus)
    }

    /// Wrap already-stored transactions; nothing is published
    pub fn with_transactions(transactions: Vec<Transaction>, bus: Arc<RefreshBus>) -> Self {
        Self { transactions, bus }
    }

    /// Append a transaction to the end of the sequence
    pub fn add(&mut self, txn: Transaction) -> FinanceResult<()> {
        txn.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        tracing::debug!(transaction = %txn, index = self.transactions.len(), "adding transaction");
        self.transactions.push(txn);
        self.bus.publish(RefreshType::Transactions);
        Ok(())
    }

    /// Parse a user-entered draft and append it
    pub fn add_draft(&mut self, draft: &TransactionDraft) -> FinanceResult<Transaction> {
        let txn = draft
            .parse()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;
        self.add(txn.clone())?;
        Ok(txn)
    }

    /// Append many transactions with a single notification
    ///
    /// All records are validated first; if any is invalid nothing is added.
    /// Returns the number of records appended.
    pub fn add_batch(&mut self, batch: Vec<Transaction>) -> FinanceResult<usize> {
        if let Some((position, err)) = batch
            .iter()
            .enumerate()
            .find_map(|(i, txn)| txn.validate().err().map(|e| (i, e)))
        {
            return Err(FinanceError::Validation(format!(
                "Batch record {}: {}",
                position + 1,
                err
            )));
        }

        let count = batch.len();
        if count == 0 {
            return Ok(0);
        }

        self.transactions.extend(batch);
        tracing::debug!(count, total = self.transactions.len(), "added transaction batch");
        self.bus.publish(RefreshType::Transactions);
        Ok(count)
    }

    /// Remove the transactions at the given positions
    ///
    /// Out-of-range positions are ignored. Returns true if anything was
    /// removed.
    pub fn delete(&mut self, indices: &BTreeSet<usize>) -> bool {
        let mut removed = 0;
        // Highest first so earlier removals don't shift later positions.
        for &index in indices.iter().rev() {
            if index < self.transactions.len() {
                self.transactions.remove(index);
                removed += 1;
            }
        }

        if removed == 0 {
            return false;
        }

        tracing::debug!(removed, remaining = self.transactions.len(), "deleted transactions");
        self.bus.publish(RefreshType::Transactions);
        true
    }

    /// Transactions whose description contains `description` (ignoring case)
    /// and whose category equals `category`
    ///
    /// A category of `None`, `""` or [`ANY_CATEGORY`] matches everything.
    /// The result keeps store order.
    pub fn filter(&self, description: &str, category: Option<&str>) -> Vec<Transaction> {
        self.filter_indexed(description, category)
            .into_iter()
            .map(|(_, txn)| txn.clone())
            .collect()
    }

    /// Like [`filter`](Self::filter), keeping each match's store position
    pub fn filter_indexed(
        &self,
        description: &str,
        category: Option<&str>,
    ) -> Vec<(usize, &Transaction)> {
        let needle = description.to_lowercase();
        let category = category.filter(|c| !c.is_empty() && *c != ANY_CATEGORY);

        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, t)| needle.is_empty() || t.description.to_lowercase().contains(&needle))
            .filter(|(_, t)| category.map_or(true, |c| t.category == c))
            .collect()
    }

    /// Distinct categories across all transactions
    pub fn categories(&self) -> BTreeSet<String> {
        self.transactions
            .iter()
            .map(|t| t.category.clone())
            .collect()
    }

    /// Dedup keys of every stored transaction
    pub fn dedup_keys(&self) -> HashSet<DedupKey> {
        self.transactions.iter().map(Transaction::dedup_key).collect()
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.transactions.iter().any(|t| &t.dedup_key() == key)
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RefreshListener;
    use crate::models::Money;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Counter {
        kinds: Mutex<Vec<RefreshType>>,
    }

    impl RefreshListener for Counter {
        fn on_data_refresh(&self, kind: RefreshType) {
            self.kinds.lock().unwrap().push(kind);
        }
    }

    fn create_test_store() -> (TransactionStore, Arc<Counter>) {
        let bus = Arc::new(RefreshBus::new());
        let counter = Arc::new(Counter::default());
        bus.subscribe(counter.clone());
        (TransactionStore::new(bus), counter)
    }

    fn txn(day: u32, description: &str, category: &str, cents: i64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 5, day).unwrap();
        Transaction::on_date(date, description, category, Money::from_cents(cents))
    }

    #[test]
    fn test_add_appends_at_tail() {
        let (mut store, counter) = create_test_store();
        store.add(txn(1, "Coffee", "Food", -350)).unwrap();
        let last = txn(2, "Salary", "Income", 100000);
        store.add(last.clone()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice().last(), Some(&last));
        assert_eq!(store.iter().filter(|t| **t == last).count(), 1);
        assert_eq!(
            *counter.kinds.lock().unwrap(),
            vec![RefreshType::Transactions, RefreshType::Transactions]
        );
    }

    #[test]
    fn test_add_rejects_empty_category() {
        let (mut store, counter) = create_test_store();
        let err = store.add(txn(1, "Mystery", " ", -100)).unwrap_err();

        assert!(err.is_validation());
        assert!(store.is_empty());
        assert!(counter.kinds.lock().unwrap().is_empty());
    }

    #[test]
    fn test_add_draft() {
        let (mut store, _counter) = create_test_store();
        let draft = TransactionDraft {
            timestamp: "2025-05-23".into(),
            description: "Groceries".into(),
            category: "Food".into(),
            amount: "-100".into(),
            cleared: true,
        };
        let added = store.add_draft(&draft).unwrap();
        assert!(added.cleared);
        assert_eq!(store.get(0), Some(&added));

        let bad = TransactionDraft {
            amount: "lots".into(),
            ..draft
        };
        assert!(store.add_draft(&bad).unwrap_err().is_validation());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_batch_publishes_once() {
        let (mut store, counter) = create_test_store();
        let batch = vec![txn(1, "a", "Food", -1), txn(2, "b", "Food", -2), txn(3, "c", "Fun", -3)];

        assert_eq!(store.add_batch(batch).unwrap(), 3);
        assert_eq!(counter.kinds.lock().unwrap().len(), 1);
        assert_eq!(store.add_batch(Vec::new()).unwrap(), 0);
        assert_eq!(counter.kinds.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_add_batch_is_all_or_nothing() {
        let (mut store, _counter) = create_test_store();
        let batch = vec![txn(1, "a", "Food", -1), txn(2, "b", "", -2)];

        let err = store.add_batch(batch).unwrap_err();
        assert!(err.to_string().contains("Batch record 2"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_removes_exactly_given_indices() {
        let (mut store, _counter) = create_test_store();
        for (i, name) in ["zero", "one", "two", "three", "four"].iter().enumerate() {
            store.add(txn(i as u32 + 1, name, "Food", -100)).unwrap();
        }

        assert!(store.delete(&BTreeSet::from([1, 3])));

        let remaining: Vec<_> = store.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(remaining, vec!["zero", "two", "four"]);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let (mut store, counter) = create_test_store();
        store.add(txn(1, "only", "Food", -100)).unwrap();
        counter.kinds.lock().unwrap().clear();

        assert!(!store.delete(&BTreeSet::from([5, 9])));
        assert!(!store.delete(&BTreeSet::new()));
        assert_eq!(store.len(), 1);
        assert!(counter.kinds.lock().unwrap().is_empty());

        assert!(store.delete(&BTreeSet::from([0, 7])));
        assert!(store.is_empty());
    }

    #[test]
    fn test_filter() {
        let (mut store, _counter) = create_test_store();
        store.add(txn(1, "Whole Foods Market", "Food", -5000)).unwrap();
        store.add(txn(2, "Cinema", "Fun", -1200)).unwrap();
        store.add(txn(3, "FOOD truck", "Food", -800)).unwrap();
        store.add(txn(4, "Foodie magazine", "Fun", -400)).unwrap();

        let food = store.filter("food", Some("Food"));
        assert_eq!(food.len(), 2);
        assert_eq!(food[0].description, "Whole Foods Market");
        assert_eq!(food[1].description, "FOOD truck");

        assert_eq!(store.filter("food", None).len(), 3);
        assert_eq!(store.filter("food", Some(ANY_CATEGORY)).len(), 3);
        assert_eq!(store.filter("", Some("")).len(), 4);
        assert_eq!(store.filter("", Some("food")).len(), 0);
        assert_eq!(store.len(), 4);

        let positions: Vec<_> = store
            .filter_indexed("food", Some("Food"))
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn test_categories() {
        let (mut store, _counter) = create_test_store();
        assert!(store.categories().is_empty());

        store.add(txn(1, "a", "Food", -1)).unwrap();
        store.add(txn(2, "b", "Rent", -1)).unwrap();
        store.add(txn(3, "c", "Food", -1)).unwrap();

        let categories: Vec<_> = store.categories().into_iter().collect();
        assert_eq!(categories, vec!["Food", "Rent"]);
    }

    #[test]
    fn test_contains_dedup_key() {
        let (mut store, _counter) = create_test_store();
        let t = txn(1, "Coffee", "Food", -350);
        store.add(t.clone()).unwrap();

        assert!(store.contains(&t.dedup_key()));
        assert!(!store.contains(&txn(1, "Coffee", "Food", -351).dedup_key()));
        assert_eq!(store.dedup_keys().len(), 1);
    }
}
