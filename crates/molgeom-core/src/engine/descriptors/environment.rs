use crate::core::models::atom::NUM_CHANNELS;
use crate::core::topology::paths::BondDistances;
use crate::core::utils::geometry::angle;
use crate::core::utils::vector::cosine_angle;
use crate::engine::context::FrameContext;
use crate::engine::error::DescriptorError;
use crate::engine::kernels::{gaussian_proximity, radial_cutoff};

/// Geometry of one nearby atom relative to the query axis `reference -> atom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub atom: usize,
    pub distance: f64,
    /// Signed projection of `atom - candidate` onto the query axis.
    pub axial: f64,
    /// Distance of the candidate from the query axis.
    pub perpendicular: f64,
    pub bond_distance: u32,
    pub charge: f64,
    pub torsion_proxy: f64,
    /// Angle `reference-atom-candidate` in degrees.
    pub angle: f64,
}

/// An atom known only by its index and its distance to the query atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyAtom {
    pub atom: usize,
    pub distance: f64,
}

/// Environment summary of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelEnvironment {
    pub distance_histogram: Vec<f64>,
    pub axial_histogram: Vec<f64>,
    pub perpendicular_histogram: Vec<f64>,
    /// Sum of `Rc(d, sum_cutoff)` over every candidate.
    pub total_weight: f64,
    /// The part of `total_weight` from candidates with a positive axial projection.
    pub forward_weight: f64,
    /// The remainder of `total_weight`.
    pub backward_weight: f64,
    pub nearest: Option<Candidate>,
    pub second_nearest: Option<NearbyAtom>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentDescriptor {
    pub atom: usize,
    pub reference: usize,
    pub channels: Vec<ChannelEnvironment>,
}

impl EnvironmentDescriptor {
    pub fn channel(&self, channel: usize) -> &ChannelEnvironment {
        &self.channels[channel]
    }
}

#[derive(Clone)]
struct ChannelAccumulator {
    distance_histogram: Vec<f64>,
    axial_histogram: Vec<f64>,
    perpendicular_histogram: Vec<f64>,
    total_weight: f64,
    forward_weight: f64,
    backward_weight: f64,
    nearest: Option<(usize, f64)>,
    second_nearest: Option<(usize, f64)>,
}

impl ChannelAccumulator {
    fn new(bins: usize) -> Self {
        Self {
            distance_histogram: vec![0.0; bins],
            axial_histogram: vec![0.0; bins],
            perpendicular_histogram: vec![0.0; bins],
            total_weight: 0.0,
            forward_weight: 0.0,
            backward_weight: 0.0,
            nearest: None,
            second_nearest: None,
        }
    }

    /// Ties keep the earlier atom in front.
    fn offer(&mut self, atom: usize, distance: f64) {
        let closer = |slot: Option<(usize, f64)>| slot.is_none_or(|(_, d)| distance < d);
        if closer(self.nearest) {
            self.second_nearest = self.nearest;
            self.nearest = Some((atom, distance));
        } else if closer(self.second_nearest) {
            self.second_nearest = Some((atom, distance));
        }
    }
}

/// Directional environment of `atom` seen along the axis from `reference`.
///
/// Every atom outside the first and second bond shells of `atom` is projected onto the
/// axis and binned by distance, axial projection and perpendicular distance. Per channel
/// the nearest such atom is described in full; the second-nearest is only located.
///
/// # Errors
///
/// Fails with [`DescriptorError::MissingNeighbor`] when a nearest atom has no bond path
/// to `atom`, and with [`DescriptorError::MissingCharge`] when it carries no charge.
/// The second-nearest atom never fails the descriptor.
pub fn nearest_per_element(
    ctx: &FrameContext,
    atom: usize,
    reference: usize,
) -> Result<EnvironmentDescriptor, DescriptorError> {
    ctx.check_atoms(&[atom, reference])?;
    let env = &ctx.config.environment;
    let distance_centers = env.distance_bins.centers();
    let axial_centers = env.axial_bins.centers();
    let perpendicular_centers = env.perpendicular_bins.centers();
    let bins = distance_centers.len();

    let shells = ctx.graph.within_two_bonds(atom);
    let axis = ctx.position(atom) - ctx.position(reference);
    let mut accumulators = vec![ChannelAccumulator::new(bins); NUM_CHANNELS];

    for i in (0..ctx.len()).filter(|&i| !shells[i]) {
        let offset = ctx.position(atom) - ctx.position(i);
        let cos = cosine_angle(&axis, &offset);
        let d = offset.norm();
        let axial = d * cos;
        let perpendicular = d * (1.0 - cos * cos).sqrt();
        let weight = radial_cutoff(d, env.sum_cutoff);

        let distance_taper = radial_cutoff(d, env.histogram_cutoff);
        let axial_taper = radial_cutoff(axial.abs(), env.histogram_cutoff);
        let perpendicular_taper = radial_cutoff(perpendicular, env.histogram_cutoff);

        for channel in ctx.species(i).channels() {
            let acc = &mut accumulators[channel];
            acc.offer(i, d);
            acc.total_weight += weight;
            if axial > 0.0 {
                acc.forward_weight += weight;
            } else {
                acc.backward_weight += weight;
            }
            for n in 0..bins {
                acc.distance_histogram[n] +=
                    gaussian_proximity(d, distance_centers[n], env.distance_bins.bandwidth) * distance_taper;
                acc.axial_histogram[n] +=
                    gaussian_proximity(axial, axial_centers[n], env.axial_bins.bandwidth) * axial_taper;
                acc.perpendicular_histogram[n] += gaussian_proximity(
                    perpendicular,
                    perpendicular_centers[n],
                    env.perpendicular_bins.bandwidth,
                ) * perpendicular_taper;
            }
        }
    }

    let hops = ctx.bond_distances(atom);
    let channels = accumulators
        .into_iter()
        .map(|acc| -> Result<ChannelEnvironment, DescriptorError> {
            Ok(ChannelEnvironment {
                nearest: acc
                    .nearest
                    .map(|(candidate, _)| describe_candidate(ctx, reference, atom, candidate, &hops))
                    .transpose()?,
                second_nearest: acc
                    .second_nearest
                    .map(|(index, distance)| NearbyAtom { atom: index, distance }),
                distance_histogram: acc.distance_histogram,
                axial_histogram: acc.axial_histogram,
                perpendicular_histogram: acc.perpendicular_histogram,
                total_weight: acc.total_weight,
                forward_weight: acc.forward_weight,
                backward_weight: acc.backward_weight,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EnvironmentDescriptor {
        atom,
        reference,
        channels,
    })
}

fn describe_candidate(
    ctx: &FrameContext,
    reference: usize,
    atom: usize,
    candidate: usize,
    hops: &BondDistances,
) -> Result<Candidate, DescriptorError> {
    let axis = ctx.position(atom) - ctx.position(reference);
    let offset = ctx.position(atom) - ctx.position(candidate);
    let cos = cosine_angle(&axis, &offset);
    let distance = offset.norm();
    let bond_distance = hops.get(candidate).ok_or_else(|| DescriptorError::MissingNeighbor {
        atom: candidate,
        requirement: format!("on a bond path to atom {atom}"),
    })?;

    Ok(Candidate {
        atom: candidate,
        distance,
        axial: distance * cos,
        perpendicular: distance * (1.0 - cos * cos).sqrt(),
        bond_distance,
        charge: ctx.charge(candidate)?,
        torsion_proxy: bound_torsion_proxy(ctx, reference, atom, candidate, hops)?,
        angle: angle(ctx.position(reference), ctx.position(atom), ctx.position(candidate)),
    })
}

/// Cosine between the query axis `reference -> atom` and the last bond on the shortest
/// path from `atom` to `candidate`.
///
/// The bond runs from the first neighbor of `candidate` (by index) that is one step
/// closer to the source of `hops` to `candidate` itself.
pub fn bound_torsion_proxy(
    ctx: &FrameContext,
    reference: usize,
    atom: usize,
    candidate: usize,
    hops: &BondDistances,
) -> Result<f64, DescriptorError> {
    let closer = hops.get(candidate).and_then(|h| h.checked_sub(1));
    let anchor = closer
        .and_then(|target| ctx.graph.neighbors(candidate).find(|&l| hops.get(l) == Some(target)))
        .ok_or_else(|| DescriptorError::MissingNeighbor {
            atom: candidate,
            requirement: format!("one bond closer to atom {}", hops.source()),
        })?;
    let axis = ctx.position(atom) - ctx.position(reference);
    let bond = ctx.position(candidate) - ctx.position(anchor);
    Ok(cosine_angle(&axis, &bond))
}
