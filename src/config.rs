//! Generation run configuration.
//!
//! A [`GeneratorConfig`] is the immutable input for one generation run,
//! usually produced by an upstream translation layer and handed over as JSON.
//! Validation is eager: every out-of-range field is rejected with
//! [`Error::Config`] before any sampling begins, because retrying a
//! deterministic run with the same inputs can only reproduce the failure.

use crate::dataset::ItemId;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fallback dataset density used to derive a fixed transaction length when
/// `avg_transaction_len` is not configured.
pub const DEFAULT_DENSITY: f64 = 0.1;

/// Item-popularity distribution, rendered in JSON as `{method, params}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "lowercase")]
pub enum DistributionSpec {
    /// All items equally likely.
    Uniform,
    /// Power law over item index: weight(i) ∝ (i+1)^-alpha. Models the
    /// long-tail popularity seen in real transaction logs.
    Zipf {
        /// Skew exponent; must be > 0.
        alpha: f64,
    },
    /// Gaussian density evaluated at the item index.
    Normal {
        /// Center, in item-index units.
        mean: f64,
        /// Spread; must be > 0.
        std: f64,
    },
    /// Exponential decay over item index: weight(i) ∝ exp(-lambda·i).
    Exponential {
        /// Decay rate; must be > 0.
        lambda: f64,
    },
}

impl DistributionSpec {
    pub(crate) fn validate(&self) -> Result<()> {
        match *self {
            DistributionSpec::Uniform => Ok(()),
            DistributionSpec::Zipf { alpha } => {
                if alpha > 0.0 && alpha.is_finite() {
                    Ok(())
                } else {
                    Err(Error::config(format!(
                        "zipf alpha must be > 0, got {alpha}"
                    )))
                }
            }
            DistributionSpec::Normal { mean, std } => {
                if !mean.is_finite() {
                    return Err(Error::config(format!(
                        "normal mean must be finite, got {mean}"
                    )));
                }
                if std > 0.0 && std.is_finite() {
                    Ok(())
                } else {
                    Err(Error::config(format!("normal std must be > 0, got {std}")))
                }
            }
            DistributionSpec::Exponential { lambda } => {
                if lambda > 0.0 && lambda.is_finite() {
                    Ok(())
                } else {
                    Err(Error::config(format!(
                        "exponential lambda must be > 0, got {lambda}"
                    )))
                }
            }
        }
    }
}

/// One ground-truth itemset to embed in the generated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Identifier used to correlate injection bookkeeping with validation.
    pub id: String,
    /// Item ids forming the pattern; at least two, all distinct, all below
    /// `num_items`.
    pub items: Vec<ItemId>,
    /// Fraction of transactions that must host the pattern, in (0, 1].
    pub target_support: f64,
    /// Per-item omission probability when instantiating the pattern in a
    /// host, in [0, 1).
    #[serde(default)]
    pub noise_ratio: f64,
}

impl PatternSpec {
    /// Number of host transactions needed to realize the target support.
    pub fn host_count(&self, num_transactions: usize) -> usize {
        (self.target_support * num_transactions as f64).round() as usize
    }

    /// First-order expected support of the full itemset after noise:
    /// `target_support * (1 - noise_ratio)^|items|`. The realized value is
    /// counted exactly during generation and reported alongside.
    pub fn expected_support_after_noise(&self) -> f64 {
        self.target_support * (1.0 - self.noise_ratio).powi(self.items.len() as i32)
    }

    pub(crate) fn validate(&self, num_transactions: usize, num_items: usize) -> Result<()> {
        if self.items.len() < 2 {
            return Err(Error::config(format!(
                "pattern '{}' has {} item(s); need at least 2",
                self.id,
                self.items.len()
            )));
        }
        let distinct: BTreeSet<ItemId> = self.items.iter().copied().collect();
        if distinct.len() != self.items.len() {
            return Err(Error::config(format!(
                "pattern '{}' contains duplicate items",
                self.id
            )));
        }
        if let Some(&item) = self.items.iter().find(|&&i| i as usize >= num_items) {
            return Err(Error::config(format!(
                "pattern '{}' references item {} outside [0, {})",
                self.id, item, num_items
            )));
        }
        if !(self.target_support > 0.0 && self.target_support <= 1.0) {
            return Err(Error::config(format!(
                "pattern '{}' target_support must be in (0, 1], got {}",
                self.id, self.target_support
            )));
        }
        if !(0.0..1.0).contains(&self.noise_ratio) {
            return Err(Error::config(format!(
                "pattern '{}' noise_ratio must be in [0, 1), got {}",
                self.id, self.noise_ratio
            )));
        }
        let k = self.host_count(num_transactions);
        if k == 0 {
            return Err(Error::config(format!(
                "pattern '{}' target_support {} rounds to zero hosts over {} transactions",
                self.id, self.target_support, num_transactions
            )));
        }
        if k > num_transactions {
            return Err(Error::config(format!(
                "pattern '{}' needs {} hosts but the dataset has {} transactions",
                self.id, k, num_transactions
            )));
        }
        Ok(())
    }
}

/// Immutable configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of transactions to generate.
    pub num_transactions: usize,
    /// Size of the item universe.
    pub num_items: usize,
    /// Item-popularity distribution.
    pub distribution: DistributionSpec,
    /// Mean transaction length for the Poisson length sampler. When absent,
    /// lengths fall back to a fixed `num_items * density`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_transaction_len: Option<usize>,
    /// Target density for the fixed-length fallback, in (0, 1].
    /// Defaults to [`DEFAULT_DENSITY`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    /// Ground-truth patterns to inject, applied in order (earlier patterns
    /// claim hosts first).
    #[serde(default)]
    pub patterns: Vec<PatternSpec>,
}

impl GeneratorConfig {
    /// Validate every field eagerly.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.num_transactions == 0 {
            return Err(Error::config("num_transactions must be > 0"));
        }
        if self.num_items == 0 {
            return Err(Error::config("num_items must be > 0"));
        }
        self.distribution.validate()?;
        if let Some(avg) = self.avg_transaction_len {
            if avg < 1 || avg > self.num_items {
                return Err(Error::config(format!(
                    "avg_transaction_len must be in [1, {}], got {}",
                    self.num_items, avg
                )));
            }
        }
        if let Some(density) = self.density {
            if !(density > 0.0 && density <= 1.0) {
                return Err(Error::config(format!(
                    "density must be in (0, 1], got {density}"
                )));
            }
        }
        let mut seen_ids = BTreeSet::new();
        for pattern in &self.patterns {
            if !seen_ids.insert(pattern.id.as_str()) {
                return Err(Error::config(format!(
                    "duplicate pattern id '{}'",
                    pattern.id
                )));
            }
            pattern.validate(self.num_transactions, self.num_items)?;
        }
        Ok(())
    }
}
