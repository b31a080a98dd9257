use super::couplings;
use crate::core::io::labels::CouplingRecord;
use crate::core::io::output::FeatureRow;
use crate::core::models::structure::Structure;
use crate::core::topology::radii::CovalentRadii;
use crate::engine::config::DescriptorConfig;
use crate::engine::context::FrameContext;
use crate::engine::error::WorkflowError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything the feature workflow needs besides the structure and its records.
#[derive(Debug, Clone, Default)]
pub struct FeatureConfig {
    pub descriptors: DescriptorConfig,
    pub radii: CovalentRadii,
}

/// Computes one feature row per coupling record of `structure`.
///
/// The bond graph and cyclic set are built once up front. Rows come back in the order
/// of `records`, also when they are computed in parallel.
///
/// # Errors
///
/// Fails on an invalid configuration, on an element without a covalent radius, and on
/// the first record whose descriptors cannot be computed.
#[instrument(skip_all, name = "feature_workflow")]
pub fn run(
    structure: &Structure,
    records: &[CouplingRecord],
    config: &FeatureConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<FeatureRow>, WorkflowError> {
    config.descriptors.validate()?;

    reporter.report(Progress::PhaseStart { name: "Topology" });
    info!(
        atoms = structure.len(),
        records = records.len(),
        "Building bond graph for '{}'.",
        structure.title
    );
    let ctx = FrameContext::build(structure, &config.radii, &config.descriptors)?;
    debug!(
        bonds = ctx.graph.bond_count(),
        cyclic_atoms = ctx.cyclic.len(),
        "Frame topology ready."
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Features" });
    reporter.report(Progress::TaskStart {
        total_steps: records.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = records.iter();

    #[cfg(feature = "parallel")]
    let iterator = records.par_iter();

    let results: Vec<Result<FeatureRow, WorkflowError>> = iterator
        .map(|record| {
            let row = couplings::build_row(&ctx, record).map_err(|source| WorkflowError::Record {
                id: record.id.clone(),
                coupling_type: record.coupling_type.to_string(),
                source,
            });
            reporter.report(Progress::TaskIncrement);
            row
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let rows = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    info!("Computed {} feature row(s).", rows.len());
    Ok(rows)
}
