use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::distance::squared_distance;
use crate::geometry::{Dataset, Point};

/// State after one assign/update pass.
///
/// `centroids[c]` is the position of cluster `c` after the update, and
/// `labels[i]` is the cluster point `i` was assigned to in the same pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub centroids: Vec<Point>,
    pub labels: Vec<usize>,
}

impl Snapshot {
    /// Total within-cluster squared distance for this snapshot.
    pub fn inertia(&self, dataset: &Dataset) -> f64 {
        dataset
            .iter()
            .zip(&self.labels)
            .map(|(p, &label)| squared_distance(p, &self.centroids[label]))
            .sum()
    }

    /// Number of points assigned to each cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Every snapshot of one run, in the order they were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLog {
    snapshots: Vec<Snapshot>,
    converged: bool,
}

impl StepLog {
    pub(crate) fn new(snapshots: Vec<Snapshot>, converged: bool) -> Self {
        Self {
            snapshots,
            converged,
        }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn get(&self, step: usize) -> Option<&Snapshot> {
        self.snapshots.get(step)
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// `false` when the iteration cap stopped the run first
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn iterations(&self) -> usize {
        self.snapshots.len()
    }

    /// Hex SHA-256 over the exact centroid bit patterns, labels, and
    /// convergence flag. Two logs share a fingerprint only if they are
    /// bit-for-bit identical.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update((self.snapshots.len() as u64).to_le_bytes());
        for snapshot in &self.snapshots {
            hasher.update((snapshot.centroids.len() as u64).to_le_bytes());
            for c in &snapshot.centroids {
                hasher.update(c.x.to_bits().to_le_bytes());
                hasher.update(c.y.to_bits().to_le_bytes());
            }
            hasher.update((snapshot.labels.len() as u64).to_le_bytes());
            for &label in &snapshot.labels {
                hasher.update((label as u64).to_le_bytes());
            }
        }
        hasher.update([self.converged as u8]);

        hex::encode(hasher.finalize())
    }
}
