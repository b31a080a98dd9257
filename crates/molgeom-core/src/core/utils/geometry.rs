use super::periodic::{CellTransforms, build_transforms};
use super::vector::{angle_degrees, cross};
use crate::core::models::cell::UnitCell;
use nalgebra::{Point3, Vector3};

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (b - a).norm()
}

/// Bond angle `a-b-c` in degrees, with `b` as the vertex.
pub fn angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    angle_degrees(&(a - b), &(c - b))
}

/// Signed dihedral angle `a-b-c-d` in degrees, in `[-180, 180]`.
pub fn torsion(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    DihedralFrame::new(a - b, c - b, d - c).signed()
}

/// Dihedral angle `a-b-c-d` folded onto the interval `[0, period]`.
///
/// The signed torsion is first mapped onto `[0, 360)` and then folded as a triangle
/// wave of width `2·period`: even folds count up from zero, odd folds count back down.
/// The result is continuous in the true dihedral everywhere inside `[0, 360)`, and also
/// across the 0/360 seam whenever `360 / period` is an even integer (e.g. 180 or 90).
/// For `period = 360` the result is the dihedral in `[0, 360)`, which jumps at the seam.
pub fn folded_dihedral(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
    period: f64,
) -> f64 {
    DihedralFrame::new(a - b, c - b, d - c).folded(period)
}

pub fn periodic_distance(a: &Point3<f64>, b: &Point3<f64>, cell: &UnitCell) -> f64 {
    let transforms = build_transforms(cell);
    transforms.minimum_image(&(b - a)).norm()
}

pub fn periodic_angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, cell: &UnitCell) -> f64 {
    let transforms = build_transforms(cell);
    angle_degrees(
        &transforms.minimum_image(&(a - b)),
        &transforms.minimum_image(&(c - b)),
    )
}

pub fn periodic_torsion(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
    cell: &UnitCell,
) -> f64 {
    DihedralFrame::periodic(a, b, c, d, &build_transforms(cell)).signed()
}

pub fn periodic_folded_dihedral(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
    period: f64,
    cell: &UnitCell,
) -> f64 {
    DihedralFrame::periodic(a, b, c, d, &build_transforms(cell)).folded(period)
}

/// Folds an angle in `[0, 360]` onto `[0, period]`.
pub fn fold_angle(theta: f64, period: f64) -> f64 {
    let nfold = (theta / period).floor();
    if nfold.rem_euclid(2.0) == 0.0 {
        theta - nfold * period
    } else {
        2.0 * period - (theta - (nfold - 1.0) * period)
    }
}

/// The three bond displacements a dihedral is computed from.
struct DihedralFrame {
    normal_abc: Vector3<f64>,
    normal_bcd: Vector3<f64>,
    cd: Vector3<f64>,
}

impl DihedralFrame {
    fn new(ba: Vector3<f64>, bc: Vector3<f64>, cd: Vector3<f64>) -> Self {
        Self {
            normal_abc: cross(&bc, &ba),
            normal_bcd: cross(&bc, &cd),
            cd,
        }
    }

    fn periodic(
        a: &Point3<f64>,
        b: &Point3<f64>,
        c: &Point3<f64>,
        d: &Point3<f64>,
        transforms: &CellTransforms,
    ) -> Self {
        Self::new(
            transforms.minimum_image(&(a - b)),
            transforms.minimum_image(&(c - b)),
            transforms.minimum_image(&(d - c)),
        )
    }

    fn magnitude(&self) -> f64 {
        angle_degrees(&self.normal_abc, &self.normal_bcd)
    }

    fn is_negative(&self) -> bool {
        self.cd.dot(&self.normal_abc) < 0.0
    }

    fn signed(&self) -> f64 {
        if self.is_negative() {
            -self.magnitude()
        } else {
            self.magnitude()
        }
    }

    fn folded(&self, period: f64) -> f64 {
        let theta = if self.is_negative() {
            360.0 - self.magnitude()
        } else {
            self.magnitude()
        };
        fold_angle(theta, period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    /// Four points with the fourth rotated by `phi` degrees about the z axis relative to
    /// the first, so the a-b-c-d dihedral equals `phi`.
    fn dihedral_points(phi: f64) -> [Point3<f64>; 4] {
        let (sin, cos) = phi.to_radians().sin_cos();
        [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.5),
            Point3::new(cos, sin, 1.5),
        ]
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point3::new(0.3, -1.2, 4.0);
        let b = Point3::new(-2.0, 0.5, 1.0);
        assert!(f64_approx_equal(distance(&a, &b), distance(&b, &a)));
        assert!(f64_approx_equal(distance(&a, &a), 0.0));
    }

    #[test]
    fn water_angle_reproduces_configured_geometry() {
        let bond = 0.9572;
        let configured = 104.52f64;
        let half = (configured / 2.0).to_radians();
        let oxygen = Point3::origin();
        let h1 = Point3::new(bond * half.sin(), bond * half.cos(), 0.0);
        let h2 = Point3::new(-bond * half.sin(), bond * half.cos(), 0.0);

        assert!((angle(&h1, &oxygen, &h2) - configured).abs() < 1e-6);
        assert!(f64_approx_equal(distance(&oxygen, &h1), bond));
    }

    #[test]
    fn angle_stays_within_zero_and_one_eighty() {
        let b = Point3::origin();
        let a = Point3::new(1.0, 0.0, 0.0);
        assert!(f64_approx_equal(angle(&a, &b, &Point3::new(-2.0, 0.0, 0.0)), 180.0));
        assert!(f64_approx_equal(angle(&a, &b, &Point3::new(3.0, 0.0, 0.0)), 0.0));
        for c in [Point3::new(-1.0, 2.0, 0.5), Point3::new(0.2, -0.1, 3.0)] {
            let value = angle(&a, &b, &c);
            assert!((0.0..=180.0).contains(&value));
        }
    }

    #[test]
    fn torsion_sign_follows_rotation_direction() {
        let [a, b, c, d] = dihedral_points(60.0);
        assert!((torsion(&a, &b, &c, &d) - 60.0).abs() < 1e-9);
        let [a, b, c, d] = dihedral_points(-60.0);
        assert!((torsion(&a, &b, &c, &d) + 60.0).abs() < 1e-9);
        let [a, b, c, d] = dihedral_points(180.0);
        assert!((torsion(&a, &b, &c, &d).abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn folded_dihedral_with_full_period_maps_onto_zero_to_three_sixty() {
        for (phi, expected) in [(30.0, 30.0), (-30.0, 330.0), (150.0, 150.0), (-150.0, 210.0)] {
            let [a, b, c, d] = dihedral_points(phi);
            let value = folded_dihedral(&a, &b, &c, &d, 360.0);
            assert!((value - expected).abs() < 1e-9, "phi {phi}: got {value}");
        }
    }

    #[test]
    fn folded_dihedral_with_half_period_is_a_triangle_wave() {
        for (phi, expected) in [(30.0, 30.0), (-30.0, 30.0), (200.0, 160.0), (120.0, 120.0)] {
            let [a, b, c, d] = dihedral_points(phi);
            let value = folded_dihedral(&a, &b, &c, &d, 180.0);
            assert!((value - expected).abs() < 1e-9, "phi {phi}: got {value}");
        }
    }

    #[test]
    fn folded_dihedral_is_continuous_across_the_seam() {
        for period in [180.0, 90.0] {
            let mut previous: Option<f64> = None;
            let mut phi = -45.0;
            while phi <= 45.0 {
                let [a, b, c, d] = dihedral_points(phi);
                let value = folded_dihedral(&a, &b, &c, &d, period);
                assert!((0.0..=period + 1e-9).contains(&value));
                if let Some(prev) = previous {
                    assert!(
                        (value - prev).abs() <= 0.5 + 1e-6,
                        "jump at phi {phi} with period {period}: {prev} -> {value}"
                    );
                }
                previous = Some(value);
                phi += 0.5;
            }
        }
    }

    #[test]
    fn fold_angle_mirrors_odd_folds() {
        assert!(f64_approx_equal(fold_angle(100.0, 120.0), 100.0));
        assert!(f64_approx_equal(fold_angle(150.0, 120.0), 90.0));
        assert!(f64_approx_equal(fold_angle(250.0, 120.0), 10.0));
        assert!(f64_approx_equal(fold_angle(359.0, 120.0), 119.0));
    }

    #[test]
    fn periodic_distance_uses_nearest_image() {
        let cell = UnitCell::cubic(10.0).unwrap();
        let a = Point3::new(0.5, 5.0, 5.0);
        let b = Point3::new(9.5, 5.0, 5.0);
        assert!((periodic_distance(&a, &b, &cell) - 1.0).abs() < 1e-9);
        assert!((periodic_distance(&b, &a, &cell) - 1.0).abs() < 1e-9);
        assert!((distance(&a, &b) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn periodic_measures_match_unwrapped_molecule() {
        let cell = UnitCell::new(12.0, 13.0, 14.0, 85.0, 95.0, 100.0).unwrap();
        let transforms = build_transforms(&cell);
        let [a, b, c, d] = dihedral_points(75.0);
        let shift = transforms.to_cartesian(&Vector3::new(1.0, -2.0, 1.0));
        let d_image = d + shift;
        let a_image = a - shift;

        assert!((periodic_distance(&c, &d_image, &cell) - distance(&c, &d)).abs() < 1e-8);
        assert!((periodic_angle(&a_image, &b, &c, &cell) - angle(&a, &b, &c)).abs() < 1e-8);
        assert!(
            (periodic_torsion(&a_image, &b, &c, &d_image, &cell) - torsion(&a, &b, &c, &d)).abs()
                < 1e-8
        );
        assert!(
            (periodic_folded_dihedral(&a, &b, &c, &d_image, 180.0, &cell)
                - folded_dihedral(&a, &b, &c, &d, 180.0))
            .abs()
                < 1e-8
        );
    }
}
