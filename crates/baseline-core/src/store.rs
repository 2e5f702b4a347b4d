//! Transaction store seam
//!
//! The engine never fetches data itself. Callers hand it a
//! [`TransactionStore`] that returns a user's transactions for a window.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::Transaction;
use crate::windows::DateRange;

/// Source of transactions for a user and an inclusive date range
///
/// Implementations return pending and posted rows, in any order.
pub trait TransactionStore: Send + Sync {
    fn transactions_in_range(&self, user_id: i64, range: DateRange) -> Result<Vec<Transaction>>;
}

/// Store backed by an in-memory map of user id to transactions
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    transactions: HashMap<i64, Vec<Transaction>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: i64, tx: Transaction) {
        self.transactions.entry(user_id).or_default().push(tx);
    }

    pub fn extend(&mut self, user_id: i64, txs: impl IntoIterator<Item = Transaction>) {
        self.transactions.entry(user_id).or_default().extend(txs);
    }

    pub fn with_transactions(user_id: i64, txs: Vec<Transaction>) -> Self {
        let mut store = Self::new();
        store.extend(user_id, txs);
        store
    }

    /// Total transactions held for a user
    pub fn count(&self, user_id: i64) -> usize {
        self.transactions.get(&user_id).map(Vec::len).unwrap_or(0)
    }
}

impl TransactionStore for InMemoryStore {
    fn transactions_in_range(&self, user_id: i64, range: DateRange) -> Result<Vec<Transaction>> {
        Ok(self
            .transactions
            .get(&user_id)
            .map(|txs| {
                txs.iter()
                    .filter(|tx| range.contains(tx.date))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
