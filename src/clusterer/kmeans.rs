use tracing::{debug, info, warn};

use crate::clusterer::{
    centroid::compute_centroid,
    config::{ClusterConfig, InitMethod},
    distance::nearest_centroid,
    error::ConfigError,
    init::initial_centroids,
    types::{Snapshot, StepLog},
};
use crate::geometry::{Dataset, Point};

/// Lloyd's K-Means, recording a snapshot after every assign/update pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterEngine;

impl ClusterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Check `config` against `dataset` without computing anything.
    pub fn validate(dataset: &Dataset, config: &ClusterConfig) -> Result<(), ConfigError> {
        if config.k == 0 {
            return Err(ConfigError::InvalidK(config.k));
        }
        if config.k > dataset.len() {
            return Err(ConfigError::InsufficientData {
                k: config.k,
                points: dataset.len(),
            });
        }
        if config.init == InitMethod::Manual && config.seed_centroids.len() != config.k {
            return Err(ConfigError::SeedCountMismatch {
                expected: config.k,
                got: config.seed_centroids.len(),
            });
        }
        if config.max_iters == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        if let Some(index) = dataset.iter().position(|p| !p.is_finite()) {
            return Err(ConfigError::NonFinite {
                source_name: "dataset",
                index,
            });
        }
        if config.init == InitMethod::Manual {
            if let Some(index) = config.seed_centroids.iter().position(|p| !p.is_finite()) {
                return Err(ConfigError::NonFinite {
                    source_name: "seed centroids",
                    index,
                });
            }
        }
        Ok(())
    }

    /// Run to convergence or to `config.max_iters`, whichever comes first.
    ///
    /// The same dataset and config always produce the same log.
    pub fn run(&self, dataset: &Dataset, config: &ClusterConfig) -> Result<StepLog, ConfigError> {
        Self::validate(dataset, config)?;

        let k = config.k;
        let points = dataset.points();
        let mut centroids = initial_centroids(dataset, config);
        let mut prev_labels: Option<Vec<usize>> = None;
        let mut snapshots = Vec::new();
        let mut converged = false;

        debug!(
            k,
            points = points.len(),
            init = config.init.as_str(),
            "starting k-means run"
        );

        for iteration in 1..=config.max_iters {
            // Assign each point to its nearest centroid
            let labels: Vec<usize> = points
                .iter()
                .map(|p| nearest_centroid(p, &centroids))
                .collect();

            // Recompute centroids; an empty cluster keeps its previous position
            let mut members: Vec<Vec<Point>> = vec![Vec::new(); k];
            for (p, &label) in points.iter().zip(&labels) {
                members[label].push(*p);
            }
            let updated: Vec<Point> = members
                .iter()
                .zip(&centroids)
                .map(|(m, old)| compute_centroid(m).unwrap_or(*old))
                .collect();

            let empty = members.iter().filter(|m| m.is_empty()).count();
            if empty > 0 {
                debug!(iteration, empty, "empty clusters kept their centroids");
            }

            // Unmoved centroids reproduce these labels on the next pass, so the
            // first iteration only needs its centroids checked.
            let labels_stable = prev_labels.as_ref().map_or(true, |p| p == &labels);
            let centroids_stable = within_tolerance(&centroids, &updated, config.tolerance);

            debug!(iteration, labels_stable, centroids_stable, "iteration done");

            snapshots.push(Snapshot {
                centroids: updated.clone(),
                labels: labels.clone(),
            });
            centroids = updated;
            prev_labels = Some(labels);

            if labels_stable && centroids_stable {
                converged = true;
                break;
            }
        }

        if converged {
            info!(iterations = snapshots.len(), "k-means converged");
        } else {
            warn!(
                max_iters = config.max_iters,
                "k-means stopped at the iteration cap without converging"
            );
        }

        Ok(StepLog::new(snapshots, converged))
    }
}

fn within_tolerance(old: &[Point], new: &[Point], tol: f64) -> bool {
    old.iter()
        .zip(new)
        .all(|(a, b)| (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol)
}
