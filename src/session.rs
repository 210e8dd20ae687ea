use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clusterer::{ClusterConfig, InitMethod, Snapshot};
use crate::geometry::{Dataset, Point};
use crate::player::{PlaybackError, PlayerState, StepPlayer};
use crate::source::DatasetSource;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("No dataset loaded; generate or load one first")]
    NoDataset,

    #[error("Seed centroids can only be picked with manual initialization (current: {0})")]
    NotManual(&'static str),

    #[error("All {k} seed centroids already picked")]
    SeedsComplete { k: usize },

    #[error("Seed centroid ({x}, {y}) is not finite")]
    NonFiniteSeed { x: f64, y: f64 },

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Outcome of the current run, available once a step log exists.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub session_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub iterations: usize,
    pub converged: bool,
    pub current_step: usize,
    pub state: PlayerState,
    pub fingerprint: String,
}

/// One user's clustering session: a dataset, a configuration, the manual
/// seeds collected so far, and a player over the current run.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    dataset: Option<Dataset>,
    config: ClusterConfig,
    seeds: Vec<Point>,
    player: StepPlayer,
    computed_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(config: ClusterConfig) -> Self {
        let seeds = config.seed_centroids.clone();
        Self {
            id: Uuid::new_v4(),
            dataset: None,
            config,
            seeds,
            player: StepPlayer::new(),
            computed_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    pub fn seeds(&self) -> &[Point] {
        &self.seeds
    }

    pub fn player(&self) -> &StepPlayer {
        &self.player
    }

    /// Replace the dataset with `n` freshly generated points.
    pub fn generate(&mut self, source: &mut impl DatasetSource, n: usize) -> &Dataset {
        let dataset = source.generate(n);
        debug!(session = %self.id, points = n, "dataset generated");
        self.load_dataset(dataset)
    }

    /// Replace the dataset wholesale. The current run and any picked seeds
    /// are discarded.
    pub fn load_dataset(&mut self, dataset: Dataset) -> &Dataset {
        self.discard_run();
        self.seeds.clear();
        self.config.seed_centroids.clear();
        self.dataset.insert(dataset)
    }

    /// Change cluster count and initialization. Iteration cap, tolerance and
    /// random seed carry over. Passing `None` for `seeds` means they will be
    /// picked one by one with [`Session::pick_seed`].
    pub fn configure(&mut self, k: usize, init: InitMethod, seeds: Option<Vec<Point>>) {
        self.discard_run();
        self.seeds = seeds.unwrap_or_default();
        self.config.k = k;
        self.config.init = init;
        self.config.seed_centroids = self.seeds.clone();
        info!(session = %self.id, k, init = init.as_str(), "session configured");
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.discard_run();
        self.config.seed = seed;
    }

    /// Add one manual seed centroid. Returns how many are still missing.
    pub fn pick_seed(&mut self, point: Point) -> Result<usize, SessionError> {
        if self.config.init != InitMethod::Manual {
            return Err(SessionError::NotManual(self.config.init.as_str()));
        }
        if self.seeds.len() >= self.config.k {
            return Err(SessionError::SeedsComplete { k: self.config.k });
        }
        if !point.is_finite() {
            return Err(SessionError::NonFiniteSeed {
                x: point.x,
                y: point.y,
            });
        }

        self.seeds.push(point);
        self.config.seed_centroids = self.seeds.clone();
        Ok(self.config.k - self.seeds.len())
    }

    /// Show the next snapshot, computing the run on first use.
    pub fn step(&mut self) -> Result<Snapshot, SessionError> {
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoDataset)?;
        let computing = self.player.log().is_none();
        let snapshot = self.player.advance(dataset, &self.config)?;
        if computing {
            self.computed_at = Some(Utc::now());
        }
        Ok(snapshot)
    }

    /// Jump to the final snapshot, computing the run if needed.
    pub fn run(&mut self) -> Result<Snapshot, SessionError> {
        let dataset = self.dataset.as_ref().ok_or(SessionError::NoDataset)?;
        let computing = self.player.log().is_none();
        let snapshot = self.player.run_to_end(dataset, &self.config)?;
        if computing {
            self.computed_at = Some(Utc::now());
        }
        Ok(snapshot)
    }

    /// Discard the run and any picked seeds. The dataset stays.
    pub fn reset(&mut self) {
        self.discard_run();
        self.seeds.clear();
        self.config.seed_centroids.clear();
    }

    pub fn summary(&self) -> Option<RunSummary> {
        let log = self.player.log()?;
        Some(RunSummary {
            session_id: self.id,
            computed_at: self.computed_at.unwrap_or_else(Utc::now),
            iterations: log.iterations(),
            converged: log.converged(),
            current_step: self.player.current_step(),
            state: self.player.state(),
            fingerprint: log.fingerprint(),
        })
    }

    fn discard_run(&mut self) {
        self.player.reset();
        self.computed_at = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ClusterConfig::default())
    }
}
