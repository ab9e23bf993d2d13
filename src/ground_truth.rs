//! Ground-truth sidecar produced alongside a generated dataset.
//!
//! The sidecar carries everything exact validation needs: the originating
//! configuration, the seed, and per pattern the realized host indices plus
//! the counts observed right after assembly. Without it, validation degrades
//! to support-proximity matching.

use crate::config::{GeneratorConfig, PatternSpec};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Injection bookkeeping for one pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternGroundTruth {
    /// The pattern as configured.
    pub spec: PatternSpec,
    /// Transaction indices selected to host the pattern, ascending.
    pub host_indices: Vec<usize>,
    /// Hosts that retained the complete item set after noise.
    pub intact_hosts: usize,
    /// Support of the full item set over the whole generated dataset,
    /// measured after assembly (baseline co-occurrence included).
    pub observed_support: f64,
}

impl PatternGroundTruth {
    /// Exact realized support contributed by hosts: `intact_hosts / n`.
    pub fn realized_support(&self, dataset_size: usize) -> f64 {
        if dataset_size == 0 {
            return 0.0;
        }
        self.intact_hosts as f64 / dataset_size as f64
    }
}

/// Persistable ground truth for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    /// The configuration the run was generated from.
    pub config: GeneratorConfig,
    /// Seed of the run; with the config it reproduces the dataset exactly.
    pub seed: u64,
    /// Per-pattern injection bookkeeping, in configuration order.
    pub patterns: Vec<PatternGroundTruth>,
}

impl GroundTruth {
    /// Serialize to pretty JSON for the sidecar file.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::parse(format!("ground truth serialization failed: {e}")))
    }

    /// Parse a sidecar back.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::parse(format!("ground truth parsing failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DistributionSpec;

    fn sample_ground_truth() -> GroundTruth {
        GroundTruth {
            config: GeneratorConfig {
                num_transactions: 100,
                num_items: 20,
                distribution: DistributionSpec::Zipf { alpha: 1.1 },
                avg_transaction_len: Some(5),
                density: None,
                patterns: vec![],
            },
            seed: 42,
            patterns: vec![PatternGroundTruth {
                spec: PatternSpec {
                    id: "p0".into(),
                    items: vec![1, 2],
                    target_support: 0.2,
                    noise_ratio: 0.0,
                },
                host_indices: vec![3, 17, 50],
                intact_hosts: 3,
                observed_support: 0.2,
            }],
        }
    }

    #[test]
    fn test_json_round_trip() {
        let gt = sample_ground_truth();
        let json = gt.to_json().unwrap();
        let parsed = GroundTruth::from_json(&json).unwrap();
        assert_eq!(parsed, gt);
    }

    #[test]
    fn test_realized_support() {
        let gt = sample_ground_truth();
        assert!((gt.patterns[0].realized_support(100) - 0.03).abs() < 1e-12);
        assert_eq!(gt.patterns[0].realized_support(0), 0.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GroundTruth::from_json("{not json"),
            Err(Error::Parse(_))
        ));
    }
}
