use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::{Dataset, Point};

pub const DEFAULT_POINT_COUNT: usize = 100;

/// Anything that can produce a fresh dataset of `n` points.
pub trait DatasetSource {
    fn generate(&mut self, n: usize) -> Dataset;
}

/// Points drawn uniformly from the unit square `[0, 1)²`.
pub struct UniformSource {
    rng: ChaCha8Rng,
}

impl UniformSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DatasetSource for UniformSource {
    fn generate(&mut self, n: usize) -> Dataset {
        (0..n)
            .map(|_| Point::new(self.rng.gen::<f64>(), self.rng.gen::<f64>()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_in_unit_square() {
        let dataset = UniformSource::new(1).generate(DEFAULT_POINT_COUNT);
        assert_eq!(dataset.len(), DEFAULT_POINT_COUNT);
        assert!(dataset
            .iter()
            .all(|p| (0.0..1.0).contains(&p.x) && (0.0..1.0).contains(&p.y)));
    }

    #[test]
    fn test_same_seed_same_points() {
        let a = UniformSource::new(42).generate(10);
        let b = UniformSource::new(42).generate(10);
        assert_eq!(a, b);
    }

    #[test]
    fn test_successive_draws_differ() {
        let mut source = UniformSource::new(42);
        let a = source.generate(10);
        let b = source.generate(10);
        assert_ne!(a, b);
    }
}
