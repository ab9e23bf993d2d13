//! Error types for minebench.

use thiserror::Error;

/// Result type for minebench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for minebench operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Malformed or out-of-range configuration. Always fatal to the run and
    /// raised before any sampling begins.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Not enough unclaimed host transactions to realize a pattern's target
    /// support. Never downgraded to a lower support.
    #[error("Injection conflict: {0}")]
    InjectionConflict(String),

    /// An assembled dataset violated an invariant. Indicates an internal
    /// defect; no partial dataset is surfaced.
    #[error("Dataset integrity violation: {0}")]
    DatasetIntegrity(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Interchange or sidecar parsing error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an injection conflict error.
    pub fn injection_conflict(msg: impl Into<String>) -> Self {
        Error::InjectionConflict(msg.into())
    }

    /// Create a dataset integrity error.
    pub fn dataset_integrity(msg: impl Into<String>) -> Self {
        Error::DatasetIntegrity(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
