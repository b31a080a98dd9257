use crate::core::models::atom::{Species, TRACKED_SPECIES};
use crate::engine::context::FrameContext;
use crate::engine::error::DescriptorError;
use crate::engine::histogram::ElementCounts;

pub fn neighbor_element_counts(
    ctx: &FrameContext,
    atom: usize,
    exclude: &[usize],
) -> Result<ElementCounts, DescriptorError> {
    ctx.check_atom(atom)?;
    let mut counts = ElementCounts::new();
    for i in ctx.graph.neighbors(atom).filter(|i| !exclude.contains(i)) {
        counts.add(ctx.species(i));
    }
    Ok(counts)
}

/// Tallies atoms two bonds away from `atom`, once per connecting path.
pub fn second_shell_element_counts(ctx: &FrameContext, atom: usize) -> Result<ElementCounts, DescriptorError> {
    ctx.check_atom(atom)?;
    let mut counts = ElementCounts::new();
    for j in ctx.graph.second_shell(atom) {
        counts.add(ctx.species(j));
    }
    Ok(counts)
}

/// One-hot (or two-hot) encoding of the given species over H, C, N, F, O.
pub fn identity_counts(species: &[Species]) -> [u64; TRACKED_SPECIES] {
    let mut counts = [0; TRACKED_SPECIES];
    for channel in species.iter().filter_map(|s| s.channel()) {
        counts[channel] += 1;
    }
    counts
}
