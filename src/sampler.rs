//! Baseline transaction sampling.
//!
//! Draws unpatterned transactions from the distribution model: a length from
//! the length sampler, then that many distinct items by weighted sampling
//! without replacement. The without-replacement step uses an explicit
//! remove-and-renormalize index pool; "no duplicates, weights respected" is a
//! tested invariant, not a property delegated to a library convenience.

use crate::dataset::{ItemId, Transaction};
use crate::distribution::LengthSampler;
use rand::Rng;

/// Index pool for weighted sampling without replacement. Each draw removes
/// the chosen item and subtracts its weight from the running total.
#[derive(Debug, Clone)]
pub struct WeightedIndexPool {
    items: Vec<ItemId>,
    weights: Vec<f64>,
    total: f64,
}

impl WeightedIndexPool {
    /// Build a pool over `[0, weights.len())` with the given weights.
    pub fn new(weights: &[f64]) -> Self {
        Self {
            items: (0..weights.len() as ItemId).collect(),
            weights: weights.to_vec(),
            total: weights.iter().sum(),
        }
    }

    /// Remaining pool size.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool is exhausted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Draw one item proportionally to its remaining weight, removing it
    /// from the pool. Returns `None` once the pool is exhausted.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ItemId> {
        if self.items.is_empty() {
            return None;
        }
        let target = rng.gen::<f64>() * self.total;
        let mut cumulative = 0.0;
        // Float residue can leave target just past the last boundary; the
        // last entry absorbs it.
        let mut chosen = self.items.len() - 1;
        for (idx, &weight) in self.weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                chosen = idx;
                break;
            }
        }
        let item = self.items.swap_remove(chosen);
        let weight = self.weights.swap_remove(chosen);
        self.total -= weight;
        Some(item)
    }
}

/// Draw one transaction: a sampled length, then that many distinct items.
/// Never returns an empty transaction or a duplicate item.
pub fn sample_transaction<R: Rng + ?Sized>(
    weights: &[f64],
    lengths: &LengthSampler,
    rng: &mut R,
) -> Transaction {
    let len = lengths.draw(rng);
    let mut pool = WeightedIndexPool::new(weights);
    let mut txn = Transaction::new();
    for _ in 0..len {
        match pool.draw(rng) {
            Some(item) => {
                txn.insert(item);
            }
            None => break,
        }
    }
    txn
}

/// Draw the full baseline dataset. Each transaction is an independent draw;
/// inter-transaction correlation is out of scope.
pub fn sample_baseline<R: Rng + ?Sized>(
    weights: &[f64],
    lengths: &LengthSampler,
    num_transactions: usize,
    rng: &mut R,
) -> Vec<Transaction> {
    (0..num_transactions)
        .map(|_| sample_transaction(weights, lengths, rng))
        .collect()
}
