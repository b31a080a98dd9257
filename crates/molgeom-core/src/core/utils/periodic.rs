use super::vector::{nearest_integer, vector_times_matrix};
use crate::core::models::cell::UnitCell;
use nalgebra::{Matrix3, Vector3};

/// The pair of lattice transforms of a unit cell, both applied to row vectors.
///
/// `direct` maps fractional to Cartesian coordinates (its rows are the lattice vectors
/// a, b, c); `fractional` maps Cartesian to fractional coordinates and is the inverse of
/// `direct`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTransforms {
    pub direct: Matrix3<f64>,
    pub fractional: Matrix3<f64>,
}

impl CellTransforms {
    pub fn to_fractional(&self, cartesian: &Vector3<f64>) -> Vector3<f64> {
        vector_times_matrix(cartesian, &self.fractional)
    }

    pub fn to_cartesian(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        vector_times_matrix(fractional, &self.direct)
    }

    pub fn minimum_image(&self, delta: &Vector3<f64>) -> Vector3<f64> {
        minimum_image(delta, &self.fractional, &self.direct)
    }
}

/// Builds the direct and fractional transforms of a triclinic cell.
///
/// The direct matrix is lower triangular with `a` along x and `b` in the xy plane.
/// The fractional matrix is assembled from the reciprocal axis lengths and the cosines
/// of the reciprocal angles.
pub fn build_transforms(cell: &UnitCell) -> CellTransforms {
    let (sin_alpha, cos_alpha) = cell.alpha.to_radians().sin_cos();
    let (sin_beta, cos_beta) = cell.beta.to_radians().sin_cos();
    let (sin_gamma, cos_gamma) = cell.gamma.to_radians().sin_cos();

    let angular = cell.angular_volume_factor();
    let volume = cell.a * cell.b * cell.c * angular;

    let a_star = cell.b * cell.c * sin_alpha / volume;
    let b_star = cell.a * cell.c * sin_beta / volume;
    let c_star = cell.a * cell.b * sin_gamma / volume;
    let cos_alpha_star = (cos_beta * cos_gamma - cos_alpha) / (sin_beta * sin_gamma);
    let cos_beta_star = (cos_alpha * cos_gamma - cos_beta) / (sin_alpha * sin_gamma);

    #[rustfmt::skip]
    let direct = Matrix3::new(
        cell.a,             0.0,                                                     0.0,
        cell.b * cos_gamma, cell.b * sin_gamma,                                      0.0,
        cell.c * cos_beta,  -cell.c * (cos_beta * cos_gamma - cos_alpha) / sin_gamma, cell.c * angular / sin_gamma,
    );

    #[rustfmt::skip]
    let fractional = Matrix3::new(
        1.0 / cell.a,                       0.0,                         0.0,
        -cos_gamma / (cell.a * sin_gamma),  1.0 / (cell.b * sin_gamma),  0.0,
        a_star * cos_beta_star,             b_star * cos_alpha_star,     c_star,
    );

    CellTransforms { direct, fractional }
}

/// Applies the minimum-image convention to a Cartesian displacement.
///
/// Each fractional component is wrapped into `[-0.5, 0.5)` by subtracting its nearest
/// integer before converting back to Cartesian coordinates.
pub fn minimum_image(
    delta: &Vector3<f64>,
    fractional: &Matrix3<f64>,
    direct: &Matrix3<f64>,
) -> Vector3<f64> {
    let wrapped = vector_times_matrix(delta, fractional).map(|s| s - nearest_integer(s));
    vector_times_matrix(&wrapped, direct)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn vectors_approx_equal(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (a - b).norm() < 1e-8
    }

    fn wrap_axis(x: f64, length: f64) -> f64 {
        let s = x / length;
        (s - (s + 0.5).floor()) * length
    }

    #[test]
    fn cubic_direct_matrix_is_diagonal() {
        let transforms = build_transforms(&UnitCell::cubic(4.0).unwrap());
        assert!((transforms.direct - Matrix3::from_diagonal_element(4.0)).norm() < 1e-12);
        assert!((transforms.fractional - Matrix3::from_diagonal_element(0.25)).norm() < 1e-12);
    }

    #[test]
    fn fractional_matrix_inverts_direct_matrix_for_triclinic_cell() {
        let cell = UnitCell::new(7.1, 8.3, 9.7, 72.0, 101.0, 115.0).unwrap();
        let transforms = build_transforms(&cell);
        let product = transforms.fractional * transforms.direct;
        assert!((product - Matrix3::identity()).norm() < 1e-10);
    }

    #[test]
    fn direct_matrix_rows_have_cell_lengths_and_angles() {
        let cell = UnitCell::new(5.0, 6.0, 7.0, 80.0, 95.0, 110.0).unwrap();
        let d = build_transforms(&cell).direct;
        let a: Vector3<f64> = d.row(0).transpose();
        let b: Vector3<f64> = d.row(1).transpose();
        let c: Vector3<f64> = d.row(2).transpose();

        assert!(f64_approx_equal(a.norm(), 5.0));
        assert!(f64_approx_equal(b.norm(), 6.0));
        assert!(f64_approx_equal(c.norm(), 7.0));
        assert!(f64_approx_equal(b.angle(&c).to_degrees(), 80.0));
        assert!(f64_approx_equal(a.angle(&c).to_degrees(), 95.0));
        assert!(f64_approx_equal(a.angle(&b).to_degrees(), 110.0));
        assert!(f64_approx_equal(d.determinant(), cell.volume()));
    }

    #[test]
    fn minimum_image_wraps_each_axis_in_cubic_cell() {
        let length = 10.0;
        let transforms = build_transforms(&UnitCell::cubic(length).unwrap());
        for delta in [
            Vector3::new(9.0, -9.0, 0.5),
            Vector3::new(4.9, 5.1, -5.1),
            Vector3::new(23.0, -17.2, 0.0),
            Vector3::new(5.2, -5.3, 14.9),
        ] {
            let expected = delta.map(|x| wrap_axis(x, length));
            assert!(vectors_approx_equal(&transforms.minimum_image(&delta), &expected));
        }
    }

    #[test]
    fn minimum_image_reduces_to_per_axis_wrap_for_orthorhombic_cell() {
        let cell = UnitCell::new(4.0, 6.0, 8.0, 90.0, 90.0, 90.0).unwrap();
        let transforms = build_transforms(&cell);
        let delta = Vector3::new(3.5, -4.0, 7.0);
        let expected = Vector3::new(wrap_axis(3.5, 4.0), wrap_axis(-4.0, 6.0), wrap_axis(7.0, 8.0));
        assert!(vectors_approx_equal(&transforms.minimum_image(&delta), &expected));
    }

    #[test]
    fn minimum_image_is_invariant_under_lattice_translations() {
        let cell = UnitCell::new(7.0, 8.0, 9.0, 75.0, 100.0, 110.0).unwrap();
        let transforms = build_transforms(&cell);
        let delta = Vector3::new(0.7, -1.2, 0.4);
        let shift = transforms.to_cartesian(&Vector3::new(2.0, -1.0, 3.0));

        let wrapped = transforms.minimum_image(&delta);
        let shifted = transforms.minimum_image(&(delta + shift));
        assert!(vectors_approx_equal(&wrapped, &shifted));
        assert!(vectors_approx_equal(&wrapped, &delta));
    }

    #[test]
    fn fractional_round_trip_through_transforms() {
        let cell = UnitCell::new(7.0, 8.0, 9.0, 75.0, 100.0, 110.0).unwrap();
        let transforms = build_transforms(&cell);
        let v = Vector3::new(1.5, -2.25, 3.0);
        let back = transforms.to_cartesian(&transforms.to_fractional(&v));
        assert!(vectors_approx_equal(&back, &v));
    }
}
