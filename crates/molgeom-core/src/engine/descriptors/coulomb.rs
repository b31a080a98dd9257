use crate::core::utils::geometry::distance;
use crate::engine::context::FrameContext;
use crate::engine::error::DescriptorError;

/// The Coulomb-matrix row of `atom`, sorted ascending.
///
/// Holds `q_atom · q_i / d(atom, i)` for every other atom. Rows shorter than the
/// configured capacity are filled with the padding value before sorting; longer rows
/// keep only their `capacity` smallest entries.
pub fn sorted_coulomb_row(ctx: &FrameContext, atom: usize) -> Result<Vec<f64>, DescriptorError> {
    let q_atom = ctx.charge(atom)?;
    let capacity = ctx.config.coulomb_capacity;

    let mut row = Vec::with_capacity(capacity.max(ctx.len()));
    for i in (0..ctx.len()).filter(|&i| i != atom) {
        let d = distance(ctx.position(atom), ctx.position(i));
        if d == 0.0 {
            return Err(DescriptorError::CoincidentAtoms {
                first: atom.min(i),
                second: atom.max(i),
            });
        }
        row.push(q_atom * ctx.charge(i)? / d);
    }
    if row.len() < capacity {
        row.resize(capacity, ctx.config.coulomb_padding);
    }
    row.sort_by(f64::total_cmp);
    row.truncate(capacity);
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::structure::Structure;
    use crate::core::topology::graph::NeighborGraph;
    use crate::core::topology::radii::CovalentRadii;
    use crate::engine::config::DescriptorConfig;
    use crate::engine::descriptors::fixtures;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn row_is_padded_and_sorted() {
        let structure = fixtures::hcch(60.0);
        let config = DescriptorConfig::default();
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();

        let row = sorted_coulomb_row(&ctx, 1).unwrap();
        assert_eq!(row.len(), 29);
        assert!(row.windows(2).all(|w| w[0] <= w[1]));

        let d10 = distance(structure.position(1), structure.position(0));
        let d13 = distance(structure.position(1), structure.position(3));
        // Negative terms sort before the zero padding, positive ones after it.
        assert!(f64_approx_equal(row[0], -0.2 * 0.2 / d13));
        assert!(f64_approx_equal(row[1], -0.2 * 0.1 / d10));
        assert!(f64_approx_equal(row[28], -0.2 * -0.1 / 1.5));
        assert!(row[2..28].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn row_is_invariant_under_reordering_of_other_atoms() {
        let ordered = fixtures::ethanol_with_spectator();
        let mut atoms = ordered.atoms().to_vec();
        atoms.swap(1, 6);
        atoms.swap(3, 5);
        let reordered = Structure::new(atoms);
        let config = DescriptorConfig::default();
        let radii = CovalentRadii::new();

        let a = FrameContext::build(&ordered, &radii, &config).unwrap();
        let b = FrameContext::build(&reordered, &radii, &config).unwrap();
        let row_a = sorted_coulomb_row(&a, 0).unwrap();
        let row_b = sorted_coulomb_row(&b, 0).unwrap();
        for (x, y) in row_a.iter().zip(&row_b) {
            assert!(f64_approx_equal(*x, *y));
        }
    }

    #[test]
    fn capacity_truncates_to_smallest_entries() {
        let structure = fixtures::ethanol_with_spectator();
        let config = DescriptorConfig {
            coulomb_capacity: 3,
            ..DescriptorConfig::default()
        };
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();

        let row = sorted_coulomb_row(&ctx, 2).unwrap();
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(|&v| v < 0.0));
    }

    #[test]
    fn coincident_atoms_are_rejected() {
        let structure = Structure::new(vec![
            Atom::new("C", Point3::origin()).with_charge(0.1),
            Atom::new("F", Point3::new(4.0, 0.0, 0.0)).with_charge(-0.1),
            Atom::new("F", Point3::origin()).with_charge(-0.2),
        ]);
        let config = DescriptorConfig::default();
        let graph = NeighborGraph::from_bonds(3, std::iter::empty()).unwrap();
        let ctx = FrameContext::with_graph(&structure, graph, &config);

        assert_eq!(
            sorted_coulomb_row(&ctx, 2),
            Err(DescriptorError::CoincidentAtoms { first: 0, second: 2 })
        );
    }
}
