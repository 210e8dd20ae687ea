use serde::Serialize;

/// Where a player is in its step log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// No log computed yet
    Empty,
    /// Log exists and has undelivered snapshots
    InProgress,
    /// Every snapshot has been delivered
    Converged,
}
