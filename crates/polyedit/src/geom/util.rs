use nalgebra::Vector2;

/// Squared Euclidean distance between two points.
#[inline]
pub fn dist_sq(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a - b).norm_squared()
}

/// Rotate `v` by `angle` radians (CCW).
#[inline]
pub fn rotate(v: Vector2<f64>, angle: f64) -> Vector2<f64> {
    let (s, c) = angle.sin_cos();
    Vector2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Closest point to `p` on the closed segment `[a, b]`.
///
/// Degenerate segments (`a ≈ b`) collapse to `a`.
pub fn closest_point_on_segment(
    p: Vector2<f64>,
    a: Vector2<f64>,
    b: Vector2<f64>,
) -> Vector2<f64> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq < 1e-18 {
        return a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Arithmetic mean of a flat `[x0,y0,x1,y1,...]` vertex sequence.
///
/// The vertex centroid, not the area centroid: it is the natural local
/// origin for editing because subtracting it zeroes the mean exactly,
/// which makes recentering idempotent.
pub fn vertex_centroid(flat: &[f64]) -> Option<Vector2<f64>> {
    let n = flat.len() / 2;
    if n == 0 {
        return None;
    }
    let mut sum = Vector2::zeros();
    for k in 0..n {
        sum += Vector2::new(flat[2 * k], flat[2 * k + 1]);
    }
    Some(sum / n as f64)
}
