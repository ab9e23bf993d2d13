//! File helpers for the interchange format and the ground-truth sidecar.
//!
//! The core pipeline never touches the filesystem on its own; these are
//! explicit, caller-invoked helpers.

use crate::dataset::{Dataset, Transaction};
use crate::format;
use crate::ground_truth::GroundTruth;
use crate::Result;
use std::fs;
use std::path::Path;

/// Write a dataset in the interchange format.
pub fn write_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path.as_ref(), format::serialize(dataset))?;
    log::info!(
        "wrote {} transactions to {}",
        dataset.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Read transactions back from an interchange-format file.
pub fn read_transactions(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let text = fs::read_to_string(path)?;
    format::parse(&text)
}

/// Write the ground-truth sidecar as JSON.
pub fn write_ground_truth(ground_truth: &GroundTruth, path: impl AsRef<Path>) -> Result<()> {
    fs::write(path.as_ref(), ground_truth.to_json()?)?;
    Ok(())
}

/// Read a ground-truth sidecar.
pub fn read_ground_truth(path: impl AsRef<Path>) -> Result<GroundTruth> {
    GroundTruth::from_json(&fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DistributionSpec, GeneratorConfig};
    use crate::generator::DatasetGenerator;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            num_transactions: 50,
            num_items: 10,
            distribution: DistributionSpec::Uniform,
            avg_transaction_len: Some(3),
            density: None,
            patterns: vec![],
        }
    }

    #[test]
    fn test_dataset_file_round_trip() {
        let generated = DatasetGenerator::new(small_config())
            .unwrap()
            .generate(9)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        write_dataset(&generated.dataset, &path).unwrap();
        let parsed = read_transactions(&path).unwrap();
        assert_eq!(parsed, generated.dataset.transactions());
    }

    #[test]
    fn test_sidecar_file_round_trip() {
        let generated = DatasetGenerator::new(small_config())
            .unwrap()
            .generate(9)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ground_truth.json");

        write_ground_truth(&generated.ground_truth, &path).unwrap();
        let parsed = read_ground_truth(&path).unwrap();
        assert_eq!(parsed, generated.ground_truth);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_transactions("/nonexistent/minebench.txt").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
