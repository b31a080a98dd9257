use crate::core::io::tasks::GeometryTasks;
use crate::core::models::cell::UnitCell;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::{
    angle, distance, folded_dihedral, periodic_angle, periodic_distance, periodic_folded_dihedral,
};
use crate::engine::error::WorkflowError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument, warn};

/// One row per frame: the 1-based frame number and one value per task.
pub type SeriesRow = (usize, Vec<f64>);

/// Measurement series of a trajectory, split by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementSeries {
    pub distances: Vec<SeriesRow>,
    pub angles: Vec<SeriesRow>,
    pub torsions: Vec<SeriesRow>,
}

impl MeasurementSeries {
    pub fn frame_count(&self) -> usize {
        self.distances
            .len()
            .max(self.angles.len())
            .max(self.torsions.len())
    }
}

/// Evaluates every task on every frame.
///
/// Distances and angles are in Angstroms and degrees; torsions are folded onto
/// `[0, period]` with each task's periodicity. When `cell` is given it overrides any
/// cell carried by the frames; otherwise a frame's own cell, if present, switches that
/// frame to minimum-image geometry.
///
/// # Errors
///
/// Fails on the first unreadable frame and on any task that names an atom the frame
/// does not have.
#[instrument(skip_all, name = "measure_workflow")]
pub fn run<I, E>(
    frames: I,
    tasks: &GeometryTasks,
    cell: Option<&UnitCell>,
    reporter: &ProgressReporter,
) -> Result<MeasurementSeries, WorkflowError>
where
    I: IntoIterator<Item = Result<Structure, E>>,
    WorkflowError: From<E>,
{
    if tasks.is_empty() {
        warn!("No measurement tasks were given; output will only list frame numbers.");
    }
    info!(
        distances = tasks.distances.len(),
        angles = tasks.angles.len(),
        torsions = tasks.torsions.len(),
        periodic = cell.is_some(),
        "Starting measurements."
    );
    reporter.report(Progress::PhaseStart { name: "Measuring" });

    let mut series = MeasurementSeries::default();
    for (index, frame) in frames.into_iter().enumerate() {
        let structure = frame?;
        let number = index + 1;
        let frame_cell = cell.or(structure.cell());
        check_tasks(&structure, tasks, number)?;
        debug!(frame = number, atoms = structure.len(), "Measuring frame.");

        let p = |i: usize| structure.position(i);
        let distances = tasks
            .distances
            .iter()
            .map(|&[a, b]| match frame_cell {
                Some(c) => periodic_distance(p(a), p(b), c),
                None => distance(p(a), p(b)),
            })
            .collect();
        let angles = tasks
            .angles
            .iter()
            .map(|&[a, b, c]| match frame_cell {
                Some(cell) => periodic_angle(p(a), p(b), p(c), cell),
                None => angle(p(a), p(b), p(c)),
            })
            .collect();
        let torsions = tasks
            .torsions
            .iter()
            .map(|task| {
                let [a, b, c, d] = task.atoms;
                let period = f64::from(task.period);
                match frame_cell {
                    Some(cell) => periodic_folded_dihedral(p(a), p(b), p(c), p(d), period, cell),
                    None => folded_dihedral(p(a), p(b), p(c), p(d), period),
                }
            })
            .collect();

        series.distances.push((number, distances));
        series.angles.push((number, angles));
        series.torsions.push((number, torsions));
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::PhaseFinish);
    if series.frame_count() == 0 {
        return Err(WorkflowError::NoFrames);
    }
    info!("Measured {} frame(s).", series.frame_count());
    Ok(series)
}

fn check_tasks(structure: &Structure, tasks: &GeometryTasks, frame: usize) -> Result<(), WorkflowError> {
    match tasks.max_atom_index() {
        Some(index) if index >= structure.len() => Err(WorkflowError::TaskOutOfRange {
            frame,
            index,
            len: structure.len(),
        }),
        _ => Ok(()),
    }
}
