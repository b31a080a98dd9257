//! Local-environment descriptor families.
//!
//! Every function here is a pure read of a [`FrameContext`](super::context::FrameContext)
//! and returns owned values; formatting is left to the caller.
//!
//! - [`radial`]: distance histograms over bonded shells and distant atoms.
//! - [`angular`]: bond-angle and torsion histograms.
//! - [`charges`]: partial-charge histograms and neighbor charge summaries.
//! - [`counts`]: element tallies and one-hot identities.
//! - [`environment`]: directional nearest-atom descriptor around a query axis.
//! - [`coulomb`]: sorted Coulomb-matrix rows.

pub mod angular;
pub mod charges;
pub mod coulomb;
pub mod counts;
pub mod environment;
pub mod radial;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::models::atom::Atom;
    use crate::core::models::structure::Structure;
    use nalgebra::Point3;

    fn atom(symbol: &str, x: f64, y: f64, z: f64, charge: f64) -> Atom {
        Atom::new(symbol, Point3::new(x, y, z)).with_charge(charge)
    }

    /// H0-C1-C2-H3 with the H-C-C-H dihedral set to `dihedral` degrees.
    ///
    /// Both C-H bonds are 1.077 Å, the C-C bond is 1.5 Å and the H-C-C angles are
    /// equal.
    pub fn hcch(dihedral: f64) -> Structure {
        let (sin, cos) = dihedral.to_radians().sin_cos();
        Structure::new(vec![
            atom("H", -0.4, 1.0, 0.0, 0.1),
            atom("C", 0.0, 0.0, 0.0, -0.2),
            atom("C", 1.5, 0.0, 0.0, -0.1),
            atom("H", 1.9, cos, sin, 0.2),
        ])
    }

    /// Ethanol-like skeleton: C0-C1-O2-H3, two hydrogens on C0 and one on C1, plus a
    /// far-away fluorine that bonds to nothing.
    pub fn ethanol_with_spectator() -> Structure {
        Structure::new(vec![
            atom("C", 0.0, 0.0, 0.0, -0.30),
            atom("C", 1.52, 0.0, 0.0, 0.05),
            atom("O", 2.05, 1.35, 0.0, -0.60),
            atom("H", 2.99, 1.30, 0.0, 0.40),
            atom("H", -0.36, 1.03, 0.0, 0.10),
            atom("H", -0.36, -0.51, 0.89, 0.11),
            atom("H", 1.88, -0.51, -0.89, 0.09),
            atom("F", 0.0, 0.0, 8.0, -0.25),
        ])
    }
}
