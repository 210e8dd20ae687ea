use thiserror::Error;

use crate::clusterer::ConfigError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No further snapshots exist. Expected, not a fault.
    #[error("Algorithm has converged: all {step} steps already shown")]
    AlreadyConverged { step: usize },
}
