use crate::cli::MeasureArgs;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use crate::utils::backup::backup_existing;
use crate::utils::progress::CliProgressHandler;
use molgeom::core::io::StructureFormat;
use molgeom::core::io::arc::ArcFile;
use molgeom::core::io::output::write_measurement_table;
use molgeom::core::io::tasks::{GeometryTasks, TorsionTask};
use molgeom::core::io::traits::FrameFormat;
use molgeom::core::io::xyz::XyzFile;
use molgeom::core::models::cell::UnitCell;
use molgeom::engine::progress::ProgressReporter;
use molgeom::workflows;
use molgeom::workflows::measure::{MeasurementSeries, SeriesRow};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, info};

/// File names of the three measurement tables.
struct TableNames {
    distances: &'static str,
    angles: &'static str,
    torsions: &'static str,
}

pub fn run(args: MeasureArgs, progress: &CliProgressHandler) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let (tasks, names) = resolve_tasks(&args, &defaults)?;
    let cell = args.unit_cell.as_deref().map(parse_cell).transpose()?;
    debug!("Resolved {} task(s), explicit cell: {:?}", tasks.len(), cell);

    info!("Reading {} frames from {:?}", args.format, &args.input);
    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let series = match args.format {
        StructureFormat::Xyz => {
            let frames =
                XyzFile::frames_from_path(&args.input).map_err(|e| CliError::parsing(&args.input, e))?;
            let structures = frames.map(|frame| frame.map(|(structure, _)| structure));
            workflows::measure::run(structures, &tasks, cell.as_ref(), &reporter)?
        }
        StructureFormat::Arc => {
            let frames =
                ArcFile::frames_from_path(&args.input).map_err(|e| CliError::parsing(&args.input, e))?;
            let structures = frames.map(|frame| frame.map(|(structure, _)| structure));
            workflows::measure::run(structures, &tasks, cell.as_ref(), &reporter)?
        }
    };

    write_tables(&args.output_dir, &tasks, &series, &names)
}

fn resolve_tasks(args: &MeasureArgs, defaults: &DefaultsConfig) -> Result<(GeometryTasks, TableNames)> {
    if let Some(path) = &args.tasks {
        info!("Loading measurement tasks from {:?}", path);
        let tasks = GeometryTasks::read_from_path(path).map_err(|e| CliError::parsing(path, e))?;
        let names = TableNames {
            distances: defaults.distance_table,
            angles: defaults.angle_table,
            torsions: defaults.torsion_table,
        };
        return Ok((tasks, names));
    }

    let mut tasks = GeometryTasks::default();
    if let Some(atoms) = &args.distance {
        match atoms.as_slice() {
            &[i, j] => tasks.distances.push([i, j]),
            _ => return Err(arity_error("distance", 2)),
        }
    }
    if let Some(atoms) = &args.angle {
        match atoms.as_slice() {
            &[i, j, k] => tasks.angles.push([i, j, k]),
            _ => return Err(arity_error("angle", 3)),
        }
    }
    if let Some(atoms) = &args.torsion {
        match atoms.as_slice() {
            &[_, _, _, _, 0] => {
                return Err(CliError::Argument(
                    "Torsion periodicity must be positive".to_string(),
                ));
            }
            &[i, j, k, l, period] => tasks.torsions.push(TorsionTask {
                atoms: [i, j, k, l],
                period: u32::try_from(period).map_err(|_| {
                    CliError::Argument(format!("Torsion periodicity {} is too large", period))
                })?,
            }),
            _ => return Err(arity_error("torsion", 5)),
        }
    }
    if tasks.is_empty() {
        return Err(CliError::Argument(
            "Nothing to measure: give a task file (-e) or one of -d, -a, -t".to_string(),
        ));
    }

    let names = TableNames {
        distances: defaults.single_distance_table,
        angles: defaults.single_angle_table,
        torsions: defaults.single_torsion_table,
    };
    Ok((tasks, names))
}

fn arity_error(kind: &str, expected: usize) -> CliError {
    CliError::Argument(format!("A {} needs exactly {} values", kind, expected))
}

fn parse_cell(params: &[f64]) -> Result<UnitCell> {
    let params: [f64; 6] = params
        .try_into()
        .map_err(|_| CliError::Argument("A unit cell needs exactly 6 values".to_string()))?;
    UnitCell::from_params(params).map_err(|e| CliError::Argument(e.to_string()))
}

/// Writes one table per non-empty task category.
fn write_tables(
    dir: &Path,
    tasks: &GeometryTasks,
    series: &MeasurementSeries,
    names: &TableNames,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let tables: [(bool, &str, &[SeriesRow]); 3] = [
        (tasks.distances.is_empty(), names.distances, series.distances.as_slice()),
        (tasks.angles.is_empty(), names.angles, series.angles.as_slice()),
        (tasks.torsions.is_empty(), names.torsions, series.torsions.as_slice()),
    ];
    for (empty, name, rows) in tables {
        if empty {
            continue;
        }
        let path = dir.join(name);
        backup_existing(&path)?;
        let file = BufWriter::new(File::create(&path)?);
        write_measurement_table(file, rows).map_err(anyhow::Error::from)?;
        info!("Wrote {} frame(s) to {:?}", rows.len(), path);
    }
    Ok(())
}
