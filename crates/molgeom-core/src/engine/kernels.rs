use std::f64::consts::PI;

/// Soft bin membership `exp(-(bandwidth·(x - center))²)`.
///
/// Equals 1 at the bin center for any bandwidth and decays symmetrically around it.
#[inline]
pub fn gaussian_proximity(x: f64, center: f64, bandwidth: f64) -> f64 {
    let scaled = bandwidth * (x - center);
    (-scaled * scaled).exp()
}

/// Cosine taper `0.5·(cos(πr/cutoff) + 1)` for `r < cutoff`, zero beyond.
#[inline]
pub fn radial_cutoff(r: f64, cutoff: f64) -> f64 {
    if r < cutoff {
        0.5 * ((PI * r / cutoff).cos() + 1.0)
    } else {
        0.0
    }
}

/// `count` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = end;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn gaussian_proximity_is_one_at_center_for_any_bandwidth() {
        for bandwidth in [0.0875, 1.7, 25.0, 100.0] {
            for x in [-3.0, 0.0, 1.09, 180.0] {
                assert_eq!(gaussian_proximity(x, x, bandwidth), 1.0);
            }
        }
    }

    #[test]
    fn gaussian_proximity_is_symmetric_and_decays() {
        let left = gaussian_proximity(0.9, 1.0, 25.0);
        let right = gaussian_proximity(1.1, 1.0, 25.0);
        assert!(f64_approx_equal(left, right));
        assert!(f64_approx_equal(left, (-6.25f64).exp()));
        assert!(gaussian_proximity(1.2, 1.0, 25.0) < right);
    }

    #[test]
    fn radial_cutoff_tapers_from_one_to_zero() {
        let cutoff = 11.3;
        assert_eq!(radial_cutoff(0.0, cutoff), 1.0);
        assert_eq!(radial_cutoff(cutoff, cutoff), 0.0);
        assert_eq!(radial_cutoff(cutoff + 1.0, cutoff), 0.0);
        assert!(f64_approx_equal(radial_cutoff(cutoff / 2.0, cutoff), 0.5));
        assert!(radial_cutoff(cutoff - 1e-6, cutoff) < 1e-9);
    }

    #[test]
    fn linspace_includes_both_ends() {
        let values = linspace(0.9, 1.6, 10);
        assert_eq!(values.len(), 10);
        assert_eq!(values[0], 0.9);
        assert_eq!(values[9], 1.6);
        assert!(f64_approx_equal(values[1] - values[0], 0.7 / 9.0));

        assert_eq!(linspace(40.0, 180.0, 8), vec![40.0, 60.0, 80.0, 100.0, 120.0, 140.0, 160.0, 180.0]);
        assert_eq!(linspace(2.0, 10.0, 1), vec![2.0]);
        assert!(linspace(2.0, 10.0, 0).is_empty());
    }
}
