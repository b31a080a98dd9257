use nalgebra::{Matrix3, Vector3};

/// Below this product of magnitudes a direction is treated as undefined.
pub const DEGENERATE_MAGNITUDE: f64 = 1e-4;

#[inline]
pub fn modulus(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Cosine of the angle between two vectors, clamped to `[-1, 1]`.
///
/// Returns `0.0` when `|a|·|b|` is below [`DEGENERATE_MAGNITUDE`]. That value marks an
/// undefined direction and must not be read as a genuine right angle.
pub fn cosine_angle(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let norms = modulus(a) * modulus(b);
    if norms < DEGENERATE_MAGNITUDE {
        return 0.0;
    }
    (a.dot(b) / norms).clamp(-1.0, 1.0)
}

/// Angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_degrees(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    cosine_angle(a, b).acos().to_degrees()
}

#[inline]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Rounds to the nearest integer; a fractional part of exactly 0.5 rounds toward +∞.
///
/// Consequently `x - nearest_integer(x)` always lies in `[-0.5, 0.5)`.
#[inline]
pub fn nearest_integer(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Row-vector times matrix: `out[j] = Σ_i v[i]·m[(i, j)]`.
#[inline]
pub fn vector_times_matrix(v: &Vector3<f64>, m: &Matrix3<f64>) -> Vector3<f64> {
    m.tr_mul(v)
}
