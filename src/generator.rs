//! Generation pipeline orchestration.
//!
//! Runs the write path end to end: distribution model, baseline sampler,
//! pattern injector, assembler. All randomness flows from one
//! [`ChaCha8Rng`] seeded by the caller, threaded by reference through every
//! sampling step; a run with the same configuration and seed is byte-for-byte
//! reproducible. A run either completes or fails atomically; assembly
//! failure discards all work.

use crate::config::GeneratorConfig;
use crate::dataset::Dataset;
use crate::distribution::{build_weights, LengthSampler};
use crate::ground_truth::{GroundTruth, PatternGroundTruth};
use crate::injector::{inject, HostClaims};
use crate::sampler::sample_baseline;
use crate::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A generated dataset together with its injection bookkeeping.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    /// The assembled dataset.
    pub dataset: Dataset,
    /// Sidecar needed for exact validation.
    pub ground_truth: GroundTruth,
}

/// Synthesizes datasets from a validated configuration.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
}

impl DatasetGenerator {
    /// Create a generator, validating the configuration eagerly.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Config`] on any out-of-range field, before any
    /// sampling happens.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the full pipeline with the given seed.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InjectionConflict`] when a pattern cannot claim
    /// enough unclaimed hosts; [`crate::Error::DatasetIntegrity`] if the
    /// assembled result violates an invariant (an internal defect).
    pub fn generate(&self, seed: u64) -> Result<GeneratedDataset> {
        let n = self.config.num_transactions;
        let weights = build_weights(&self.config.distribution, self.config.num_items)?;
        let lengths = LengthSampler::for_config(&self.config)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        log::info!(
            "generating {} transactions over {} items (seed {})",
            n,
            self.config.num_items,
            seed
        );
        let mut transactions = sample_baseline(&weights, &lengths, n, &mut rng);

        let mut claims = HostClaims::new(n);
        let mut bookkeeping = Vec::with_capacity(self.config.patterns.len());
        for pattern in &self.config.patterns {
            let hosts = inject(&mut transactions, pattern, &mut claims, &mut rng)?;
            let intact = hosts
                .iter()
                .filter(|&&host| transactions[host].contains_all(&pattern.items))
                .count();
            bookkeeping.push((pattern.clone(), hosts, intact));
        }

        let dataset = Dataset::assemble(n, self.config.num_items, transactions)?;

        let patterns = bookkeeping
            .into_iter()
            .map(|(spec, host_indices, intact_hosts)| {
                let observed_support = dataset.support(&spec.items);
                PatternGroundTruth {
                    spec,
                    host_indices,
                    intact_hosts,
                    observed_support,
                }
            })
            .collect();

        log::info!("assembled dataset of {} transactions", dataset.len());
        Ok(GeneratedDataset {
            dataset,
            ground_truth: GroundTruth {
                config: self.config.clone(),
                seed,
                patterns,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DistributionSpec, PatternSpec};
    use crate::Error;

    fn config_with_patterns(patterns: Vec<PatternSpec>) -> GeneratorConfig {
        GeneratorConfig {
            num_transactions: 500,
            num_items: 40,
            distribution: DistributionSpec::Zipf { alpha: 1.1 },
            avg_transaction_len: Some(6),
            density: None,
            patterns,
        }
    }

    #[test]
    fn test_generate_respects_counts() {
        let generator = DatasetGenerator::new(config_with_patterns(vec![])).unwrap();
        let generated = generator.generate(42).unwrap();
        assert_eq!(generated.dataset.len(), 500);
        assert_eq!(generated.dataset.num_items(), 40);
        assert!(generated.ground_truth.patterns.is_empty());
    }

    #[test]
    fn test_generate_records_bookkeeping() {
        let pattern = PatternSpec {
            id: "p0".into(),
            items: vec![0, 1, 2],
            target_support: 0.4,
            noise_ratio: 0.0,
        };
        let generator = DatasetGenerator::new(config_with_patterns(vec![pattern])).unwrap();
        let generated = generator.generate(7).unwrap();

        let gt = &generated.ground_truth.patterns[0];
        assert_eq!(gt.host_indices.len(), 200);
        assert_eq!(gt.intact_hosts, 200);
        assert!((gt.realized_support(500) - 0.4).abs() < 1e-12);
        // Baseline co-occurrence can only push observed support above target.
        assert!(gt.observed_support >= 0.4);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let pattern = PatternSpec {
            id: "p0".into(),
            items: vec![3, 4],
            target_support: 0.2,
            noise_ratio: 0.1,
        };
        let generator = DatasetGenerator::new(config_with_patterns(vec![pattern])).unwrap();
        let a = generator.generate(123).unwrap();
        let b = generator.generate(123).unwrap();
        assert_eq!(a.dataset, b.dataset);
        assert_eq!(a.ground_truth, b.ground_truth);
    }

    #[test]
    fn test_invalid_config_rejected_before_sampling() {
        let mut config = config_with_patterns(vec![]);
        config.distribution = DistributionSpec::Zipf { alpha: -2.0 };
        assert!(matches!(
            DatasetGenerator::new(config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_conflicting_patterns_fail_the_run() {
        let patterns = vec![
            PatternSpec {
                id: "a".into(),
                items: vec![0, 1],
                target_support: 0.7,
                noise_ratio: 0.0,
            },
            PatternSpec {
                id: "b".into(),
                items: vec![2, 3],
                target_support: 0.5,
                noise_ratio: 0.0,
            },
        ];
        let generator = DatasetGenerator::new(config_with_patterns(patterns)).unwrap();
        assert!(matches!(
            generator.generate(1),
            Err(Error::InjectionConflict(_))
        ));
    }
}
