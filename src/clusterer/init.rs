use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::{ClusterConfig, InitMethod};
use super::distance::min_squared_distance;
use crate::geometry::{Dataset, Point};

/// Pick the starting centroids for a run.
///
/// Expects a config that has already been validated against `dataset`.
pub fn initial_centroids(dataset: &Dataset, config: &ClusterConfig) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let points = dataset.points();
    let k = config.k;

    match config.init {
        InitMethod::Manual => config.seed_centroids.clone(),
        InitMethod::Random => points.choose_multiple(&mut rng, k).copied().collect(),
        InitMethod::FarthestFirst => farthest_first(points, k, &mut rng),
        InitMethod::KMeansPlusPlus => kmeans_plus_plus(points, k, &mut rng),
    }
}

fn farthest_first<R: Rng>(points: &[Point], k: usize, rng: &mut R) -> Vec<Point> {
    let mut chosen = vec![false; points.len()];
    let mut centroids = Vec::with_capacity(k);

    let first = rng.gen_range(0..points.len());
    chosen[first] = true;
    centroids.push(points[first]);

    while centroids.len() < k {
        let mut best = None;
        let mut best_dist = f64::NEG_INFINITY;
        for (i, p) in points.iter().enumerate() {
            if chosen[i] {
                continue;
            }
            let d = min_squared_distance(p, &centroids);
            if d > best_dist {
                best = Some(i);
                best_dist = d;
            }
        }
        // k <= points.len(), so an unchosen point always remains
        let next = best.unwrap_or(0);
        chosen[next] = true;
        centroids.push(points[next]);
    }

    centroids
}

fn kmeans_plus_plus<R: Rng>(points: &[Point], k: usize, rng: &mut R) -> Vec<Point> {
    let mut chosen = vec![false; points.len()];
    let mut centroids = Vec::with_capacity(k);

    let first = rng.gen_range(0..points.len());
    chosen[first] = true;
    centroids.push(points[first]);

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| min_squared_distance(p, &centroids))
            .collect();

        let next = match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            // every point sits on a centroid already
            Err(_) => chosen.iter().position(|&c| !c).unwrap_or(0),
        };

        chosen[next] = true;
        centroids.push(points[next]);
    }

    centroids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Dataset {
        (0..5)
            .flat_map(|x| (0..4).map(move |y| Point::new(x as f64, y as f64)))
            .collect()
    }

    #[test]
    fn test_manual_is_verbatim() {
        let seeds = vec![Point::new(9.0, 9.0), Point::new(-1.0, 0.5)];
        let config = ClusterConfig::manual(seeds.clone());
        assert_eq!(initial_centroids(&grid(), &config), seeds);
    }

    #[test]
    fn test_random_picks_distinct_points() {
        let dataset = grid();
        let config = ClusterConfig::new(6).with_seed(3);
        let centroids = initial_centroids(&dataset, &config);

        assert_eq!(centroids.len(), 6);
        for (i, a) in centroids.iter().enumerate() {
            assert!(dataset.points().contains(a));
            for b in &centroids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_random_is_seeded() {
        let dataset = grid();
        let a = initial_centroids(&dataset, &ClusterConfig::new(4).with_seed(11));
        let b = initial_centroids(&dataset, &ClusterConfig::new(4).with_seed(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_farthest_first_spreads_out() {
        let dataset = Dataset::from(vec![[0.0, 0.0], [0.1, 0.0], [10.0, 0.0]]);
        let config = ClusterConfig::new(2).with_init(InitMethod::FarthestFirst);
        let centroids = initial_centroids(&dataset, &config);

        // whichever point comes first, the far one or one of the near ones is paired
        assert_eq!(centroids.len(), 2);
        assert!(centroids.contains(&Point::new(10.0, 0.0)));
    }

    #[test]
    fn test_farthest_first_never_reuses_a_point() {
        let dataset = Dataset::from(vec![[5.0, 5.0], [2.0, 2.0], [2.0, 2.0], [2.0, 2.0]]);
        for seed in 0..8 {
            let config = ClusterConfig::new(4)
                .with_init(InitMethod::FarthestFirst)
                .with_seed(seed);
            let centroids = initial_centroids(&dataset, &config);

            // every input point is used exactly once
            assert_eq!(centroids.len(), 4);
            assert_eq!(centroids.iter().filter(|c| **c == Point::new(5.0, 5.0)).count(), 1);
            assert_eq!(centroids.iter().filter(|c| **c == Point::new(2.0, 2.0)).count(), 3);
        }
    }

    #[test]
    fn test_kmeans_plus_plus_handles_coincident_points() {
        let dataset = Dataset::from(vec![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]);
        let config = ClusterConfig::new(3).with_init(InitMethod::KMeansPlusPlus);
        let centroids = initial_centroids(&dataset, &config);
        assert_eq!(centroids, vec![Point::new(1.0, 1.0); 3]);
    }

    #[test]
    fn test_kmeans_plus_plus_never_repeats_a_point() {
        let dataset = grid();
        for seed in 0..10 {
            let config = ClusterConfig::new(5)
                .with_init(InitMethod::KMeansPlusPlus)
                .with_seed(seed);
            let centroids = initial_centroids(&dataset, &config);
            for (i, a) in centroids.iter().enumerate() {
                for b in &centroids[i + 1..] {
                    assert_ne!(a, b, "seed {}", seed);
                }
            }
        }
    }
}
