use crate::core::utils::geometry::{angle, torsion};
use crate::engine::context::FrameContext;
use crate::engine::error::DescriptorError;
use crate::engine::histogram::ChannelHistogram;

/// Which of the two candidate angles [`neighbor_extreme_angle_histogram`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleExtreme {
    Min,
    Max,
}

/// Histogram of the angles `a1-a2-i` for every neighbor `i` of `a2` other than `a1`.
pub fn neighbor_angle_histogram(ctx: &FrameContext, a1: usize, a2: usize) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atoms(&[a1, a2])?;
    let mut histogram = ChannelHistogram::new(&ctx.config.angle);
    for i in ctx.graph.neighbors(a2).filter(|&i| i != a1) {
        let theta = angle(ctx.position(a1), ctx.position(a2), ctx.position(i));
        histogram.add(ctx.species(i), theta);
    }
    Ok(histogram.into_vec())
}

/// For every neighbor `i` of `x` other than `a1` and `a2`, bins the smaller (or larger)
/// of the angles `a1-x-i` and `a2-x-i`.
pub fn neighbor_extreme_angle_histogram(
    ctx: &FrameContext,
    a1: usize,
    a2: usize,
    x: usize,
    extreme: AngleExtreme,
) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atoms(&[a1, a2, x])?;
    let mut histogram = ChannelHistogram::new(&ctx.config.angle);
    for i in ctx.graph.neighbors(x).filter(|&i| i != a1 && i != a2) {
        let first = angle(ctx.position(a1), ctx.position(x), ctx.position(i));
        let second = angle(ctx.position(a2), ctx.position(x), ctx.position(i));
        let theta = match extreme {
            AngleExtreme::Min => first.min(second),
            AngleExtreme::Max => first.max(second),
        };
        histogram.add(ctx.species(i), theta);
    }
    Ok(histogram.into_vec())
}

/// Histogram of `|torsion(a1, a2, i, j)|` over `i` bonded to `a2` (not `a1`) and `j`
/// bonded to `i` (not `a2`). Contributions go to the channel of `j`.
pub fn neighbor_torsion_histogram(ctx: &FrameContext, a1: usize, a2: usize) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atoms(&[a1, a2])?;
    let mut histogram = ChannelHistogram::new(&ctx.config.torsion);
    for i in ctx.graph.neighbors(a2).filter(|&i| i != a1) {
        for j in ctx.graph.neighbors(i).filter(|&j| j != a2) {
            let phi = torsion(ctx.position(a1), ctx.position(a2), ctx.position(i), ctx.position(j));
            histogram.add(ctx.species(j), phi.abs());
        }
    }
    Ok(histogram.into_vec())
}

/// Histogram of `|torsion(a1, a2, a3, i)|` for every neighbor `i` of `a3` other than `a2`.
pub fn chain_torsion_histogram(
    ctx: &FrameContext,
    a1: usize,
    a2: usize,
    a3: usize,
) -> Result<Vec<f64>, DescriptorError> {
    ctx.check_atoms(&[a1, a2, a3])?;
    let mut histogram = ChannelHistogram::new(&ctx.config.torsion);
    for i in ctx.graph.neighbors(a3).filter(|&i| i != a2) {
        let phi = torsion(ctx.position(a1), ctx.position(a2), ctx.position(a3), ctx.position(i));
        histogram.add(ctx.species(i), phi.abs());
    }
    Ok(histogram.into_vec())
}
