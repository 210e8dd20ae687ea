use crate::geometry::Point;

pub fn squared_distance(a: &Point, b: &Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Index of the centroid closest to `point`.
///
/// Ties resolve to the lowest index: a later centroid only wins when it is
/// strictly closer.
pub fn nearest_centroid(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;

    for (c, center) in centroids.iter().enumerate() {
        let d = squared_distance(point, center);
        if d < best_dist {
            best = c;
            best_dist = d;
        }
    }

    best
}

/// Squared distance from `point` to its closest centroid.
pub fn min_squared_distance(point: &Point, centroids: &[Point]) -> f64 {
    centroids
        .iter()
        .map(|c| squared_distance(point, c))
        .fold(f64::INFINITY, f64::min)
}
