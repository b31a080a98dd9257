use crate::core::io::labels::{CouplingRecord, CouplingType};
use crate::core::io::output::{FeatureRow, FeatureValue};
use crate::core::utils::geometry::{angle, distance, torsion};
use crate::engine::context::FrameContext;
use crate::engine::descriptors::angular::{self, AngleExtreme};
use crate::engine::descriptors::charges::{self, ChargeSummary};
use crate::engine::descriptors::environment::{self, Candidate};
use crate::engine::descriptors::{coulomb, counts, radial};
use crate::engine::error::DescriptorError;

/// Builds the feature row of one coupling record.
///
/// The row starts with the record identifiers and label, followed by the feature block
/// of the record's coupling type.
pub fn build_row(ctx: &FrameContext, record: &CouplingRecord) -> Result<FeatureRow, DescriptorError> {
    let (a, b) = (record.atom_index_0, record.atom_index_1);
    ctx.check_atoms(&[a, b])?;

    let mut row = RowBuilder::new(ctx);
    row.prefix(record);
    match record.coupling_type {
        CouplingType::OneJHC | CouplingType::OneJHN => {
            let (h, partner) = hydrogen_first(ctx, a, b);
            row.one_bond(h, partner)?;
        }
        CouplingType::TwoJHC | CouplingType::TwoJHN => {
            let (h, partner) = hydrogen_first(ctx, a, b);
            row.two_bond(h, partner)?;
        }
        CouplingType::ThreeJHC | CouplingType::ThreeJHN => {
            let (h, partner) = hydrogen_first(ctx, a, b);
            row.three_bond(h, partner)?;
        }
        CouplingType::TwoJHH => {
            let (i, j) = lower_charge_first(ctx, a, b)?;
            row.geminal(i, j)?;
        }
        CouplingType::ThreeJHH => {
            let (i, j) = lower_charge_first(ctx, a, b)?;
            row.vicinal(i, j)?;
        }
    }
    Ok(row.finish())
}

fn hydrogen_first(ctx: &FrameContext, a: usize, b: usize) -> (usize, usize) {
    if ctx.species(b).is_hydrogen() { (b, a) } else { (a, b) }
}

fn lower_charge_first(ctx: &FrameContext, a: usize, b: usize) -> Result<(usize, usize), DescriptorError> {
    if ctx.charge(a)? > ctx.charge(b)? {
        Ok((b, a))
    } else {
        Ok((a, b))
    }
}

fn bond_length(ctx: &FrameContext, i: usize, j: usize) -> Result<f64, DescriptorError> {
    ctx.graph
        .bond_length(i, j)
        .ok_or_else(|| DescriptorError::MissingNeighbor {
            atom: i,
            requirement: format!("bonded to atom {j}"),
        })
}

fn first_neighbor(ctx: &FrameContext, atom: usize) -> Result<usize, DescriptorError> {
    ctx.graph
        .first_neighbor(atom)
        .ok_or_else(|| DescriptorError::MissingNeighbor {
            atom,
            requirement: "at all".to_string(),
        })
}

/// The last neighbor of `x` (by index) that is also bonded to `j`.
fn bridge_neighbor(ctx: &FrameContext, x: usize, j: usize) -> Result<usize, DescriptorError> {
    ctx.graph
        .neighbors(x)
        .filter(|&y| ctx.graph.are_bonded(y, j))
        .last()
        .ok_or_else(|| DescriptorError::MissingNeighbor {
            atom: x,
            requirement: format!("bonded to atom {j}"),
        })
}

struct RowBuilder<'a, 'c> {
    ctx: &'a FrameContext<'c>,
    row: FeatureRow,
}

impl<'a, 'c> RowBuilder<'a, 'c> {
    fn new(ctx: &'a FrameContext<'c>) -> Self {
        Self {
            ctx,
            row: FeatureRow::new(),
        }
    }

    fn finish(self) -> FeatureRow {
        self.row
    }

    fn prefix(&mut self, record: &CouplingRecord) {
        self.row.push_text(record.id.as_str());
        self.row.push_count(record.atom_index_0 as u64);
        self.row.push_count(record.atom_index_1 as u64);
        self.row.push_text(record.coupling_type.as_str());
        self.row.push(match record.value {
            Some(value) => FeatureValue::Exact(value),
            None => FeatureValue::Empty,
        });
    }

    fn exact(&mut self, values: impl IntoIterator<Item = f64>) {
        self.row.extend_exact(values);
    }

    fn histogram(&mut self, values: Vec<f64>) {
        self.row.extend_binned(values);
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        distance(self.ctx.position(i), self.ctx.position(j))
    }

    fn angle(&self, i: usize, vertex: usize, k: usize) -> f64 {
        angle(self.ctx.position(i), self.ctx.position(vertex), self.ctx.position(k))
    }

    fn abs_torsion(&self, i: usize, j: usize, k: usize, l: usize) -> f64 {
        let p = |atom: usize| self.ctx.position(atom);
        torsion(p(i), p(j), p(k), p(l)).abs()
    }

    fn charges(&mut self, atoms: &[usize]) -> Result<(), DescriptorError> {
        for &atom in atoms {
            let q = self.ctx.charge(atom)?;
            self.row.push_exact(q);
        }
        Ok(())
    }

    fn identity(&mut self, atoms: &[usize]) {
        let species: Vec<_> = atoms.iter().map(|&a| self.ctx.species(a)).collect();
        self.row.extend_counts(counts::identity_counts(&species));
    }

    fn neighbor_counts(&mut self, atom: usize, exclude: &[usize]) -> Result<(), DescriptorError> {
        let tally = counts::neighbor_element_counts(self.ctx, atom, exclude)?;
        self.row.extend_counts(tally.as_array());
        Ok(())
    }

    fn second_shell_counts(&mut self, atom: usize) -> Result<(), DescriptorError> {
        let tally = counts::second_shell_element_counts(self.ctx, atom)?;
        self.row.extend_counts(tally.as_array());
        Ok(())
    }

    fn charge_summary(&mut self, atom: usize, exclude: &[usize]) -> Result<(), DescriptorError> {
        let summary = charges::neighbor_charge_summary(self.ctx, atom, exclude)?.unwrap_or(ChargeSummary::EMPTY);
        self.exact(summary.as_array());
        Ok(())
    }

    fn cyclic(&mut self, atom: usize) {
        self.row.push_count(u64::from(self.ctx.is_cyclic(atom)));
        self.row.push_count(self.ctx.cyclic_neighbor_count(atom) as u64);
    }

    /// Per channel: the three histograms bin by bin, the three weighted sums and the
    /// nearest candidate (or five zeros).
    fn environment(&mut self, atom: usize, reference: usize) -> Result<(), DescriptorError> {
        let descriptor = environment::nearest_per_element(self.ctx, atom, reference)?;
        for channel in &descriptor.channels {
            for n in 0..channel.distance_histogram.len() {
                self.row.extend_binned([
                    channel.distance_histogram[n],
                    channel.axial_histogram[n],
                    channel.perpendicular_histogram[n],
                ]);
            }
            self.exact([channel.total_weight, channel.forward_weight, channel.backward_weight]);
            match channel.nearest {
                Some(Candidate {
                    distance,
                    axial,
                    perpendicular,
                    bond_distance,
                    charge,
                    ..
                }) => {
                    self.exact([distance, axial, perpendicular]);
                    self.row.push_count(u64::from(bond_distance));
                    self.row.push_exact(charge);
                }
                None => self.row.extend_counts([0; 5]),
            }
        }
        Ok(())
    }

    /// Close-atom charge histograms: every atom at the near radius, then every atom at
    /// the far radius.
    fn close_atom_charges(&mut self, atoms: &[usize]) -> Result<(), DescriptorError> {
        for radius in self.ctx.config.close_atom_radii {
            for &atom in atoms {
                self.histogram(charges::close_atom_charge_histogram(self.ctx, atom, radius)?);
            }
        }
        Ok(())
    }

    fn second_shell_distances(&mut self, atoms: &[usize]) -> Result<(), DescriptorError> {
        for &atom in atoms {
            self.histogram(radial::second_shell_distance_histogram(self.ctx, atom)?);
        }
        Ok(())
    }

    fn one_bond(&mut self, i: usize, j: usize) -> Result<(), DescriptorError> {
        let ctx = self.ctx;
        self.exact([bond_length(ctx, i, j)?]);
        self.charges(&[i, j])?;
        self.charge_summary(j, &[i])?;
        self.cyclic(j);
        self.environment(i, j)?;
        self.environment(j, i)?;
        self.neighbor_counts(j, &[i])?;
        self.second_shell_counts(j)?;
        self.histogram(radial::neighbor_distance_histogram(ctx, j, &[i])?);
        self.histogram(angular::neighbor_angle_histogram(ctx, i, j)?);
        self.histogram(angular::neighbor_torsion_histogram(ctx, i, j)?);
        self.second_shell_distances(&[j, i])?;
        self.histogram(charges::neighbor_charge_histogram(ctx, j, &[i])?);
        self.close_atom_charges(&[i, j])?;
        self.exact(coulomb::sorted_coulomb_row(ctx, i)?);
        self.exact(coulomb::sorted_coulomb_row(ctx, j)?);
        Ok(())
    }

    fn two_bond(&mut self, i: usize, j: usize) -> Result<(), DescriptorError> {
        let ctx = self.ctx;
        let x = first_neighbor(ctx, i)?;
        self.exact([
            bond_length(ctx, i, x)?,
            bond_length(ctx, j, x)?,
            self.distance(i, j),
            self.angle(i, x, j),
        ]);
        self.charges(&[i, j, x])?;
        self.identity(&[x]);
        self.neighbor_counts(x, &[i, j])?;
        self.neighbor_counts(j, &[x])?;
        self.second_shell_counts(j)?;
        self.histogram(radial::neighbor_distance_histogram(ctx, j, &[x])?);
        self.histogram(radial::neighbor_distance_histogram(ctx, x, &[i, j])?);
        self.histogram(angular::neighbor_angle_histogram(ctx, i, x)?);
        self.histogram(angular::neighbor_angle_histogram(ctx, j, x)?);
        self.histogram(angular::chain_torsion_histogram(ctx, i, x, j)?);
        self.charge_summary(j, &[x])?;
        self.charge_summary(x, &[i, j])?;
        self.cyclic(j);
        self.cyclic(x);
        self.environment(i, x)?;
        self.environment(j, x)?;
        self.environment(x, i)?;
        self.close_atom_charges(&[i, j, x])?;
        self.second_shell_distances(&[i, j, x])?;
        self.histogram(charges::neighbor_charge_histogram(ctx, j, &[x])?);
        self.histogram(charges::neighbor_charge_histogram(ctx, x, &[i, j])?);
        Ok(())
    }

    fn three_bond(&mut self, i: usize, j: usize) -> Result<(), DescriptorError> {
        let ctx = self.ctx;
        let x = first_neighbor(ctx, i)?;
        let y = bridge_neighbor(ctx, x, j)?;
        self.identity(&[x]);
        self.identity(&[y]);
        self.exact([
            bond_length(ctx, i, x)?,
            bond_length(ctx, x, y)?,
            bond_length(ctx, y, j)?,
            self.distance(i, y),
            self.distance(j, x),
            self.distance(i, j),
        ]);
        self.charges(&[i, j, x, y])?;
        self.exact([self.angle(i, x, y), self.angle(x, y, j), self.abs_torsion(i, x, y, j)]);
        self.neighbor_counts(j, &[y])?;
        self.neighbor_counts(x, &[y, i])?;
        self.neighbor_counts(y, &[x, j])?;
        self.histogram(radial::neighbor_distance_histogram(ctx, x, &[i, y])?);
        self.histogram(radial::neighbor_distance_histogram(ctx, y, &[x, j])?);
        self.histogram(radial::neighbor_distance_histogram(ctx, j, &[y])?);
        self.histogram(angular::neighbor_angle_histogram(ctx, i, x)?);
        self.histogram(angular::neighbor_angle_histogram(ctx, x, y)?);
        self.histogram(angular::neighbor_angle_histogram(ctx, y, j)?);
        self.histogram(angular::chain_torsion_histogram(ctx, x, y, j)?);
        self.histogram(angular::chain_torsion_histogram(ctx, i, x, y)?);
        self.histogram(angular::chain_torsion_histogram(ctx, j, y, x)?);
        self.charge_summary(j, &[y])?;
        self.charge_summary(x, &[i, y])?;
        self.charge_summary(y, &[j, x])?;
        self.cyclic(j);
        self.cyclic(x);
        self.cyclic(y);
        self.environment(i, x)?;
        self.environment(j, y)?;
        self.environment(x, i)?;
        self.environment(y, j)?;
        self.close_atom_charges(&[i, j, x, y])?;
        self.second_shell_distances(&[i, j, x, y])?;
        self.histogram(charges::neighbor_charge_histogram(ctx, j, &[y])?);
        self.histogram(charges::neighbor_charge_histogram(ctx, x, &[i, y])?);
        self.histogram(charges::neighbor_charge_histogram(ctx, y, &[x, j])?);
        Ok(())
    }

    fn geminal(&mut self, i: usize, j: usize) -> Result<(), DescriptorError> {
        let ctx = self.ctx;
        let x = first_neighbor(ctx, i)?;
        let (ix, jx) = (bond_length(ctx, i, x)?, bond_length(ctx, j, x)?);
        self.exact([ix.min(jx), ix.max(jx), self.distance(i, j), self.angle(i, x, j)]);
        self.identity(&[x]);
        self.neighbor_counts(x, &[i, j])?;
        self.histogram(radial::neighbor_distance_histogram(ctx, x, &[i, j])?);
        self.histogram(angular::neighbor_extreme_angle_histogram(ctx, i, j, x, AngleExtreme::Min)?);
        self.histogram(angular::neighbor_extreme_angle_histogram(ctx, i, j, x, AngleExtreme::Max)?);
        self.charges(&[i, j, x])?;
        self.charge_summary(x, &[i, j])?;
        self.cyclic(x);
        self.environment(i, x)?;
        self.environment(j, x)?;
        self.environment(x, i)?;
        self.close_atom_charges(&[i, j, x])?;
        self.second_shell_distances(&[i, j, x])?;
        self.histogram(charges::neighbor_charge_histogram(ctx, x, &[i, j])?);
        Ok(())
    }

    fn vicinal(&mut self, i: usize, j: usize) -> Result<(), DescriptorError> {
        let ctx = self.ctx;
        let x = first_neighbor(ctx, i)?;
        let y = first_neighbor(ctx, j)?;
        let (ix, jy) = (bond_length(ctx, i, x)?, bond_length(ctx, j, y)?);
        let (xj, yi) = (self.distance(x, j), self.distance(y, i));
        let (ixy, jyx) = (self.angle(i, x, y), self.angle(j, y, x));
        self.exact([
            ix.min(jy),
            ix.max(jy),
            xj.min(yi),
            xj.max(yi),
            self.distance(i, j),
            self.distance(x, y),
        ]);
        self.exact([ixy.min(jyx), ixy.max(jyx), self.abs_torsion(i, x, y, j)]);
        self.identity(&[x, y]);
        self.neighbor_counts(x, &[y, i])?;
        self.neighbor_counts(y, &[x, j])?;
        self.histogram(radial::neighbor_distance_histogram(ctx, x, &[i, y])?);
        self.histogram(radial::neighbor_distance_histogram(ctx, y, &[j, x])?);
        self.charges(&[i, j, x, y])?;
        self.charge_summary(x, &[i, y])?;
        self.charge_summary(y, &[j, x])?;
        self.cyclic(x);
        self.cyclic(y);
        self.environment(i, x)?;
        self.environment(j, y)?;
        self.environment(x, i)?;
        self.environment(y, j)?;
        self.close_atom_charges(&[i, j, x, y])?;
        self.second_shell_distances(&[i, j, x, y])?;
        self.histogram(charges::neighbor_charge_histogram(ctx, x, &[i, y])?);
        self.histogram(charges::neighbor_charge_histogram(ctx, y, &[x, j])?);
        Ok(())
    }
}
