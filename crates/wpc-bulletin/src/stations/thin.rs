//! Greedy point thinning so station plots do not overlap.

/// Keep points in order, dropping any within `radius` of an already kept
/// point. Coordinates are projected meters.
pub fn reduce_point_density(points: &[(f64, f64)], radius: f64) -> Vec<bool> {
    let radius_sq = radius * radius;
    let mut kept: Vec<(f64, f64)> = Vec::new();
    points
        .iter()
        .map(|&(x, y)| {
            if !x.is_finite() || !y.is_finite() {
                return false;
            }
            let crowded = kept
                .iter()
                .any(|&(kx, ky)| (kx - x).powi(2) + (ky - y).powi(2) < radius_sq);
            if !crowded {
                kept.push((x, y));
            }
            !crowded
        })
        .collect()
}
