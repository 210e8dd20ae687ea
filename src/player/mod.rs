mod error;
mod state;


pub use error::PlaybackError;
pub use state::PlayerState;

use tracing::debug;

use crate::clusterer::{ClusterConfig, ClusterEngine, Snapshot, StepLog};
use crate::geometry::Dataset;

/// Cursor over a step log, computed lazily on first use.
///
/// The player never owns the dataset or configuration; callers pass the ones
/// the log should be computed from. Once a log exists it is reused until
/// [`StepPlayer::reset`], so stepping and running to the end always read the
/// same snapshots.
#[derive(Debug, Default)]
pub struct StepPlayer {
    engine: ClusterEngine,
    log: Option<StepLog>,
    current_step: usize,
}

impl StepPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the next snapshot and move the cursor past it.
    ///
    /// Computes the log on the first call. Fails with
    /// [`PlaybackError::AlreadyConverged`] once every snapshot has been
    /// delivered, leaving the cursor where it was.
    pub fn advance(
        &mut self,
        dataset: &Dataset,
        config: &ClusterConfig,
    ) -> Result<Snapshot, PlaybackError> {
        let step = self.current_step;
        let snapshot = self
            .ensure_log(dataset, config)?
            .get(step)
            .cloned()
            .ok_or(PlaybackError::AlreadyConverged { step })?;

        self.current_step += 1;
        debug!(step = self.current_step, state = ?self.state(), "advanced");
        Ok(snapshot)
    }

    /// Jump to the final snapshot. Calling it again returns the same snapshot
    /// without recomputing anything.
    pub fn run_to_end(
        &mut self,
        dataset: &Dataset,
        config: &ClusterConfig,
    ) -> Result<Snapshot, PlaybackError> {
        let log = self.ensure_log(dataset, config)?;
        let len = log.len();
        let last = log
            .last()
            .cloned()
            .ok_or(PlaybackError::AlreadyConverged { step: len })?;

        self.current_step = len;
        debug!(step = len, "ran to end");
        Ok(last)
    }

    /// Drop the log and rewind to the start.
    pub fn reset(&mut self) {
        if self.log.is_some() {
            debug!("player reset");
        }
        self.log = None;
        self.current_step = 0;
    }

    /// The snapshot most recently delivered, if any.
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        match (&self.log, self.current_step) {
            (Some(log), step) if step > 0 => log.get(step - 1),
            _ => None,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn log(&self) -> Option<&StepLog> {
        self.log.as_ref()
    }

    pub fn state(&self) -> PlayerState {
        match &self.log {
            None => PlayerState::Empty,
            Some(log) if self.current_step < log.len() => PlayerState::InProgress,
            Some(_) => PlayerState::Converged,
        }
    }

    fn ensure_log(
        &mut self,
        dataset: &Dataset,
        config: &ClusterConfig,
    ) -> Result<&StepLog, PlaybackError> {
        let log = match self.log.take() {
            Some(log) => log,
            None => {
                let log = self.engine.run(dataset, config)?;
                debug!(snapshots = log.len(), converged = log.converged(), "step log computed");
                log
            }
        };
        Ok(self.log.insert(log))
    }
}
