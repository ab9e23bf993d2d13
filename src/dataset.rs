//! Transaction and dataset types.
//!
//! A [`Transaction`] is a duplicate-free set of item ids; a [`Dataset`] is an
//! ordered sequence of transactions whose index identity is preserved through
//! generation, so pattern-injection bookkeeping stays valid for validation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of an item, in `[0, num_items)`.
pub type ItemId = u32;

/// A single transaction: an order-irrelevant, duplicate-free set of items.
///
/// Backed by an ordered set so ascending iteration (the canonical serialized
/// form) and duplicate-freedom are structural rather than checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transaction {
    items: BTreeSet<ItemId>,
}

impl Transaction {
    /// Create an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transaction from any collection of item ids.
    /// Duplicates collapse silently.
    pub fn from_items(items: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Insert an item. Returns `false` if it was already present.
    pub fn insert(&mut self, item: ItemId) -> bool {
        self.items.insert(item)
    }

    /// Whether the transaction contains `item`.
    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    /// Whether the transaction contains every id in `items`.
    pub fn contains_all(&self, items: &[ItemId]) -> bool {
        items.iter().all(|item| self.items.contains(item))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the transaction is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    /// Largest item id, if any.
    pub fn max_item(&self) -> Option<ItemId> {
        self.items.iter().next_back().copied()
    }
}

impl FromIterator<ItemId> for Transaction {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

/// An assembled dataset: exactly the configured number of transactions, all
/// item ids in range, no empty transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    num_items: usize,
    transactions: Vec<Transaction>,
}

impl Dataset {
    /// Assemble a dataset from generated transactions, checking every
    /// invariant. Transactions are not reordered; index identity is the
    /// contract that keeps injection bookkeeping meaningful.
    ///
    /// # Errors
    ///
    /// [`Error::DatasetIntegrity`] on count mismatch, an empty transaction,
    /// or an out-of-range item id. A failed assembly discards all work.
    pub fn assemble(
        num_transactions: usize,
        num_items: usize,
        transactions: Vec<Transaction>,
    ) -> Result<Self> {
        if transactions.len() != num_transactions {
            return Err(Error::dataset_integrity(format!(
                "expected {} transactions, assembled {}",
                num_transactions,
                transactions.len()
            )));
        }
        for (idx, txn) in transactions.iter().enumerate() {
            if txn.is_empty() {
                return Err(Error::dataset_integrity(format!(
                    "transaction {} is empty",
                    idx
                )));
            }
            if let Some(max) = txn.max_item() {
                if max as usize >= num_items {
                    return Err(Error::dataset_integrity(format!(
                        "transaction {} contains item {} outside [0, {})",
                        idx, max, num_items
                    )));
                }
            }
        }
        Ok(Self {
            num_items,
            transactions,
        })
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the dataset has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Size of the item universe.
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// All transactions, in generation order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transaction at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Number of transactions containing every id in `items`.
    pub fn support_count(&self, items: &[ItemId]) -> usize {
        self.transactions
            .iter()
            .filter(|txn| txn.contains_all(items))
            .count()
    }

    /// Fraction of transactions containing every id in `items`.
    pub fn support(&self, items: &[ItemId]) -> f64 {
        if self.transactions.is_empty() {
            return 0.0;
        }
        self.support_count(items) as f64 / self.transactions.len() as f64
    }

    /// Summary statistics over the assembled dataset.
    pub fn stats(&self) -> DatasetStats {
        let lengths: Vec<usize> = self.transactions.iter().map(Transaction::len).collect();
        let total_entries: usize = lengths.iter().sum();
        let n = self.transactions.len();

        let mean_length = if n > 0 {
            total_entries as f64 / n as f64
        } else {
            0.0
        };
        let variance = if n > 1 {
            lengths
                .iter()
                .map(|&l| (l as f64 - mean_length).powi(2))
                .sum::<f64>()
                / (n - 1) as f64
        } else {
            0.0
        };

        let mut item_frequencies = vec![0usize; self.num_items];
        for txn in &self.transactions {
            for item in txn.iter() {
                item_frequencies[item as usize] += 1;
            }
        }
        // First max wins on ties.
        let mut most_frequent_item = None;
        let mut best = 0usize;
        for (item, &count) in item_frequencies.iter().enumerate() {
            if count > best {
                best = count;
                most_frequent_item = Some(item as ItemId);
            }
        }

        DatasetStats {
            num_transactions: n,
            num_items: self.num_items,
            total_entries,
            density: if n > 0 && self.num_items > 0 {
                total_entries as f64 / (n * self.num_items) as f64
            } else {
                0.0
            },
            mean_transaction_length: mean_length,
            std_transaction_length: variance.sqrt(),
            min_transaction_length: lengths.iter().copied().min().unwrap_or(0),
            max_transaction_length: lengths.iter().copied().max().unwrap_or(0),
            most_frequent_item,
            max_item_frequency: item_frequencies.iter().copied().max().unwrap_or(0),
            min_item_frequency: item_frequencies.iter().copied().min().unwrap_or(0),
        }
    }
}

/// Summary statistics for an assembled dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Number of transactions.
    pub num_transactions: usize,
    /// Size of the item universe.
    pub num_items: usize,
    /// Total item occurrences across all transactions.
    pub total_entries: usize,
    /// Realized density: `total_entries / (num_transactions * num_items)`.
    pub density: f64,
    /// Mean transaction length.
    pub mean_transaction_length: f64,
    /// Sample standard deviation of transaction lengths.
    pub std_transaction_length: f64,
    /// Shortest transaction.
    pub min_transaction_length: usize,
    /// Longest transaction.
    pub max_transaction_length: usize,
    /// Item appearing in the most transactions, if any items occur at all.
    pub most_frequent_item: Option<ItemId>,
    /// Occurrence count of the most frequent item.
    pub max_item_frequency: usize,
    /// Occurrence count of the least frequent item.
    pub min_item_frequency: usize,
}
