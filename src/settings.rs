use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::clusterer::ClusterConfig;
use crate::source::DEFAULT_POINT_COUNT;

/// Session settings as read from a JSON file.
///
/// Cluster fields sit at the top level next to the dataset fields:
///
/// ```json
/// { "points": 200, "k": 4, "init": "kmeans++", "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of points to generate when no dataset file is given
    pub points: usize,

    /// Seed for dataset generation; random when absent
    pub data_seed: Option<u64>,

    #[serde(flatten)]
    pub cluster: ClusterConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINT_COUNT,
            data_seed: None,
            cluster: ClusterConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse settings")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }
}
