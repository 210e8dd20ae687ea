use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

pub const DEFAULT_MAX_ITERS: usize = 300;
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// How the first set of centroids is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InitMethod {
    /// k distinct dataset points, uniformly at random
    #[default]
    Random,
    /// Caller-supplied seed centroids, used verbatim
    Manual,
    /// Random first pick, then repeatedly the point farthest from all picks
    #[value(name = "farthest-first", alias = "farthest_first")]
    FarthestFirst,
    /// Random first pick, then D²-weighted sampling
    #[serde(rename = "kmeans++")]
    #[value(name = "kmeans++", alias = "kmeanspp")]
    KMeansPlusPlus,
}

impl InitMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMethod::Random => "random",
            InitMethod::Manual => "manual",
            InitMethod::FarthestFirst => "farthest_first",
            InitMethod::KMeansPlusPlus => "kmeans++",
        }
    }
}

/// Configuration for one clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of clusters
    pub k: usize,

    /// Centroid initialization strategy
    pub init: InitMethod,

    /// Seed centroids; must hold exactly `k` points when `init` is manual
    pub seed_centroids: Vec<Point>,

    /// Hard cap on assign/update iterations
    pub max_iters: usize,

    /// Largest per-coordinate centroid shift still counted as "unchanged"
    pub tolerance: f64,

    /// Seed for every random choice made during initialization
    pub seed: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: 3,
            init: InitMethod::Random,
            seed_centroids: Vec::new(),
            max_iters: DEFAULT_MAX_ITERS,
            tolerance: DEFAULT_TOLERANCE,
            seed: 0,
        }
    }
}

impl ClusterConfig {
    /// Random initialization with `k` clusters
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Default::default()
        }
    }

    /// Manual initialization; `k` is taken from the number of seeds
    pub fn manual(seeds: Vec<Point>) -> Self {
        Self {
            k: seeds.len(),
            init: InitMethod::Manual,
            seed_centroids: seeds,
            ..Default::default()
        }
    }

    pub fn with_init(mut self, init: InitMethod) -> Self {
        self.init = init;
        self
    }

    pub fn with_seed_centroids(mut self, seeds: Vec<Point>) -> Self {
        self.seed_centroids = seeds;
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
