mod centroid;
mod config;
mod distance;
mod error;
mod init;
mod kmeans;
mod types;


pub use centroid::compute_centroid;
pub use config::{ClusterConfig, InitMethod, DEFAULT_MAX_ITERS, DEFAULT_TOLERANCE};
pub use distance::{nearest_centroid, squared_distance};
pub use error::ConfigError;
pub use kmeans::ClusterEngine;
pub use types::{Snapshot, StepLog};
