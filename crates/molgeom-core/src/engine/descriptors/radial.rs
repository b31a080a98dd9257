use crate::core::utils::geometry::distance;
use crate::engine::context::FrameContext;
use crate::engine::error::DescriptorError;
use crate::engine::histogram::ChannelHistogram;
use crate::engine::kernels::radial_cutoff;

/// Smoothed histogram of the bond lengths from `atom` to its direct neighbors, skipping
/// the atoms in `exclude`.
pub fn neighbor_distance_histogram(
    ctx: &FrameContext,
    atom: usize,
    exclude: &[usize],
) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atom(atom)?;
    let mut histogram = ChannelHistogram::new(&ctx.config.neighbor_distance);
    for i in ctx.graph.neighbors(atom).filter(|i| !exclude.contains(i)) {
        let d = distance(ctx.position(atom), ctx.position(i));
        histogram.add(ctx.species(i), d);
    }
    Ok(histogram.into_vec())
}

/// Smoothed histogram of the distances from `atom` to atoms two bonds away.
///
/// An atom reached through several neighbors contributes once per path.
pub fn second_shell_distance_histogram(ctx: &FrameContext, atom: usize) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atom(atom)?;
    let mut histogram = ChannelHistogram::new(&ctx.config.second_shell_distance);
    for j in ctx.graph.second_shell(atom) {
        let d = distance(ctx.position(atom), ctx.position(j));
        histogram.add(ctx.species(j), d);
    }
    Ok(histogram.into_vec())
}

/// Radial histogram over every atom that is neither `atom` nor bonded to it, each
/// contribution tapered by the distant-radial cutoff.
pub fn distant_radial_histogram(ctx: &FrameContext, atom: usize) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atom(atom)?;
    let cutoff = ctx.config.distant_radial_cutoff;
    let mut histogram = ChannelHistogram::new(&ctx.config.distant_radial);
    for i in 0..ctx.len() {
        if i == atom || ctx.graph.are_bonded(atom, i) {
            continue;
        }
        let d = distance(ctx.position(atom), ctx.position(i));
        histogram.add_weighted(ctx.species(i), d, radial_cutoff(d, cutoff));
    }
    Ok(histogram.into_vec())
}
