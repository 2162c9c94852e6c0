/// Reduce a route polyline to at most `max_points` roughly evenly spaced
/// points, keeping their order.
///
/// Sequences already within the limit are returned unchanged. Otherwise the
/// point at `floor(i * len / max_points)` is taken for each `i` in
/// `0..max_points`; indices are not deduplicated.
pub fn sample_points<T: Copy>(points: &[T], max_points: usize) -> Vec<T> {
    if points.len() <= max_points {
        return points.to_vec();
    }

    let step = points.len() as f64 / max_points as f64;
    (0..max_points)
        .map(|i| points[(i as f64 * step).floor() as usize])
        .collect()
}
