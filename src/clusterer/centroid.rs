use crate::geometry::Point;

/// Arithmetic mean of `members`, or `None` when there are no members.
pub fn compute_centroid(members: &[Point]) -> Option<Point> {
    if members.is_empty() {
        return None;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for p in members {
        sum_x += p.x;
        sum_y += p.y;
    }

    let n = members.len() as f64;
    Some(Point::new(sum_x / n, sum_y / n))
}
