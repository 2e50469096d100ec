//! Point generators for chart shapes

use std::f64::consts::PI;

/// Corners used for bar cross-sections
pub const DEFAULT_CORNERS: usize = 32;

/// Points of a closed ellipse around `center` with radii `(rx, ry)`
///
/// The first point lies at `(cx, cy + ry)`; the ring is closed by repeating
/// it at the end, so `corners + 1` points are returned.
pub fn circle(corners: usize, center: (f64, f64), radius: (f64, f64)) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = (0..corners)
        .map(|i| {
            let angle = 2.0 * i as f64 / corners as f64 * PI;
            (
                center.0 + radius.0 * angle.sin(),
                center.1 + radius.1 * angle.cos(),
            )
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Differences between consecutive values
pub fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Smallest strictly positive difference between consecutive values
pub fn smallest_positive_gap(values: &[f64]) -> Option<f64> {
    diff(values)
        .into_iter()
        .filter(|d| *d > 0.0)
        .min_by(|a, b| a.total_cmp(b))
}
