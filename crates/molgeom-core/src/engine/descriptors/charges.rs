use crate::core::utils::geometry::distance;
use crate::engine::context::FrameContext;
use crate::engine::error::DescriptorError;
use crate::engine::histogram::ChannelHistogram;

/// Minimum, maximum and mean partial charge over a set of neighbors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ChargeSummary {
    /// Placeholder written for an atom without qualifying neighbors: an impossible
    /// minimum of 100, maximum of -100 and a zero mean.
    pub const EMPTY: ChargeSummary = ChargeSummary {
        min: 100.0,
        max: -100.0,
        mean: 0.0,
    };

    pub fn as_array(&self) -> [f64; 3] {
        [self.min, self.max, self.mean]
    }
}

pub fn neighbor_charge_histogram(
    ctx: &FrameContext,
    atom: usize,
    exclude: &[usize],
) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atom(atom)?;
    let mut histogram = ChannelHistogram::new(&ctx.config.charge);
    for i in ctx.graph.neighbors(atom).filter(|i| !exclude.contains(i)) {
        histogram.add(ctx.species(i), ctx.charge(i)?);
    }
    Ok(histogram.into_vec())
}

/// Charge histogram over atoms two bonds from `atom`, one contribution per path.
pub fn second_shell_charge_histogram(ctx: &FrameContext, atom: usize) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atom(atom)?;
    let mut histogram = ChannelHistogram::new(&ctx.config.charge);
    for j in ctx.graph.second_shell(atom) {
        histogram.add(ctx.species(j), ctx.charge(j)?);
    }
    Ok(histogram.into_vec())
}

/// Charge histogram over atoms closer than `radius` to `atom` that lie outside its
/// first and second bond shells.
pub fn close_atom_charge_histogram(
    ctx: &FrameContext,
    atom: usize,
    radius: f64,
) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atom(atom)?;
    let bonded = ctx.graph.within_two_bonds(atom);
    let mut histogram = ChannelHistogram::new(&ctx.config.charge);
    for i in (0..ctx.len()).filter(|&i| !bonded[i]) {
        if distance(ctx.position(atom), ctx.position(i)) < radius {
            histogram.add(ctx.species(i), ctx.charge(i)?);
        }
    }
    Ok(histogram.into_vec())
}

/// Summarizes the charges of the direct neighbors of `atom` not listed in `exclude`.
///
/// Returns `None` when no neighbor qualifies.
pub fn neighbor_charge_summary(
    ctx: &FrameContext,
    atom: usize,
    exclude: &[usize],
) -> Result<Option<ChargeSummary>, DescriptorError> {
    ctx.check_atom(atom)?;
    let mut summary: Option<ChargeSummary> = None;
    let mut total = 0.0;
    let mut count = 0usize;
    for i in ctx.graph.neighbors(atom).filter(|i| !exclude.contains(i)) {
        let q = ctx.charge(i)?;
        summary = Some(match summary {
            None => ChargeSummary {
                min: q,
                max: q,
                mean: 0.0,
            },
            Some(s) => ChargeSummary {
                min: s.min.min(q),
                max: s.max.max(q),
                mean: 0.0,
            },
        });
        total += q;
        count += 1;
    }
    Ok(summary.map(|s| ChargeSummary {
        mean: total / count as f64,
        ..s
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::{Atom, HEAVY_CHANNEL};
    use crate::core::models::structure::Structure;
    use crate::core::topology::radii::CovalentRadii;
    use crate::engine::config::DescriptorConfig;
    use crate::engine::descriptors::fixtures;
    use crate::engine::kernels::gaussian_proximity;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn channel(values: &[f64], channel: usize, bins: usize) -> &[f64] {
        &values[channel * bins..(channel + 1) * bins]
    }

    #[test]
    fn neighbor_charges_are_binned_by_neighbor_species() {
        let structure = fixtures::ethanol_with_spectator();
        let config = DescriptorConfig::default();
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();

        let values = neighbor_charge_histogram(&ctx, 1, &[0]).unwrap();
        let bins = config.charge.count;
        for (n, center) in config.charge.centers().into_iter().enumerate() {
            let o = gaussian_proximity(-0.60, center, 17.5);
            let h = gaussian_proximity(0.09, center, 17.5);
            assert!(f64_approx_equal(channel(&values, 4, bins)[n], o));
            assert!(f64_approx_equal(channel(&values, 0, bins)[n], h));
            assert!(f64_approx_equal(channel(&values, HEAVY_CHANNEL, bins)[n], o));
            assert_eq!(channel(&values, 1, bins)[n], 0.0);
        }
    }

    #[test]
    fn second_shell_charges_skip_the_center_atom() {
        let structure = fixtures::ethanol_with_spectator();
        let config = DescriptorConfig::default();
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();

        // O2 -> C1 -> {C0, H6}.
        let values = second_shell_charge_histogram(&ctx, 2).unwrap();
        let bins = config.charge.count;
        let centers = config.charge.centers();
        for n in 0..bins {
            assert!(f64_approx_equal(
                channel(&values, 1, bins)[n],
                gaussian_proximity(-0.30, centers[n], 17.5)
            ));
            assert!(f64_approx_equal(
                channel(&values, 0, bins)[n],
                gaussian_proximity(0.09, centers[n], 17.5)
            ));
        }
        assert!(channel(&values, 4, bins).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn close_atoms_exclude_bonded_shells_and_respect_radius() {
        let structure = fixtures::ethanol_with_spectator();
        let config = DescriptorConfig::default();
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();
        let bins = config.charge.count;

        // Outside the first two shells of H3: H6 at 2.30 Å, C0, H4 and H5 between
        // 3 and 4 Å, and the distant F.
        let near = close_atom_charge_histogram(&ctx, 3, 3.0).unwrap();
        for (n, center) in config.charge.centers().into_iter().enumerate() {
            let expected = gaussian_proximity(0.09, center, 17.5);
            assert!(f64_approx_equal(channel(&near, 0, bins)[n], expected));
        }
        for ch in 1..6 {
            assert!(channel(&near, ch, bins).iter().all(|&v| v == 0.0));
        }

        let far = close_atom_charge_histogram(&ctx, 3, 5.0).unwrap();
        let centers = config.charge.centers();
        let expected_c = gaussian_proximity(-0.30, centers[5], 17.5);
        assert!(f64_approx_equal(channel(&far, 1, bins)[5], expected_c));
        assert!(channel(&far, 0, bins).iter().any(|&v| v > 0.0));
        assert!(channel(&far, 3, bins).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn charge_summary_reports_min_max_mean() {
        let structure = fixtures::ethanol_with_spectator();
        let config = DescriptorConfig::default();
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();

        let summary = neighbor_charge_summary(&ctx, 0, &[]).unwrap().unwrap();
        assert!(f64_approx_equal(summary.min, 0.05));
        assert!(f64_approx_equal(summary.max, 0.11));
        assert!(f64_approx_equal(summary.mean, (0.05 + 0.10 + 0.11) / 3.0));

        let excluded = neighbor_charge_summary(&ctx, 0, &[1]).unwrap().unwrap();
        assert!(f64_approx_equal(excluded.min, 0.10));
        assert!(f64_approx_equal(excluded.mean, 0.105));
    }

    #[test]
    fn charge_summary_is_none_without_neighbors() {
        let structure = fixtures::ethanol_with_spectator();
        let config = DescriptorConfig::default();
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();

        assert_eq!(neighbor_charge_summary(&ctx, 7, &[]).unwrap(), None);
        assert_eq!(neighbor_charge_summary(&ctx, 3, &[2]).unwrap(), None);
        assert_eq!(ChargeSummary::EMPTY.as_array(), [100.0, -100.0, 0.0]);
    }

    #[test]
    fn missing_charges_are_reported() {
        let structure = Structure::new(vec![
            Atom::new("O", Point3::origin()).with_charge(-0.8),
            Atom::new("H", Point3::new(0.96, 0.0, 0.0)),
        ]);
        let config = DescriptorConfig::default();
        let ctx = FrameContext::build(&structure, &CovalentRadii::new(), &config).unwrap();

        assert_eq!(
            neighbor_charge_histogram(&ctx, 0, &[]),
            Err(DescriptorError::MissingCharge { atom: 1 })
        );
    }
}
