use thiserror::Error;

/// Rejected clustering configuration. Nothing is computed when this is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid k value: {0} (must be at least 1)")]
    InvalidK(usize),

    #[error("Insufficient data: {points} points for {k} clusters")]
    InsufficientData { k: usize, points: usize },

    #[error("Manual initialization needs {expected} seed centroids, got {got}")]
    SeedCountMismatch { expected: usize, got: usize },

    #[error("Iteration cap must be at least 1")]
    ZeroIterationCap,

    #[error("Non-finite coordinate in {source_name} at index {index}")]
    NonFinite {
        source_name: &'static str,
        index: usize,
    },
}
