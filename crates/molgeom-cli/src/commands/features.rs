use crate::cli::FeaturesArgs;
use crate::config::PartialFeatureConfig;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use crate::utils::backup::backup_existing;
use crate::utils::progress::CliProgressHandler;
use anyhow::anyhow;
use molgeom::core::io::labels::read_labels_from_path;
use molgeom::core::io::output::{FeatureRow, FeatureWriter};
use molgeom::core::io::traits::FrameFormat;
use molgeom::core::io::xyz::XyzFile;
use molgeom::engine::progress::ProgressReporter;
use molgeom::workflows;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: FeaturesArgs, progress: &CliProgressHandler) -> Result<()> {
    let defaults = DefaultsConfig::default();
    let resolved =
        PartialFeatureConfig::load(args.config.as_deref(), &args.set_values)?.merge_with_cli(&args)?;

    info!("Loading input structure from {:?}", &args.input);
    let (structure, ()) = XyzFile::read_first_from_path(&args.input)
        .map_err(|e| CliError::parsing(&args.input, e))?
        .ok_or_else(|| CliError::parsing(&args.input, anyhow!("the file contains no frame")))?;
    if !structure.has_charges() {
        warn!("Input structure has no partial charges; charge descriptors will fail.");
    }

    let labels_path = args
        .labels
        .clone()
        .unwrap_or_else(|| default_labels_path(&args.input, defaults.labels_extension));
    info!("Loading coupling records from {:?}", &labels_path);
    let records =
        read_labels_from_path(&labels_path).map_err(|e| CliError::parsing(&labels_path, e))?;

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let rows = workflows::features::run(&structure, &records, &resolved.features, &reporter)?;

    match &args.output {
        Some(path) => {
            backup_existing(path)?;
            let file = BufWriter::new(File::create(path)?);
            write_rows(file, &rows, resolved.histogram_precision)?;
            info!("Wrote {} row(s) to {:?}", rows.len(), path);
        }
        None => write_rows(std::io::stdout().lock(), &rows, resolved.histogram_precision)?,
    }
    Ok(())
}

/// The label file next to `input`, named `<input>.<extension>`.
fn default_labels_path(input: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn write_rows<W: Write>(writer: W, rows: &[FeatureRow], histogram_precision: usize) -> Result<()> {
    let mut out = FeatureWriter::new(writer, histogram_precision);
    for row in rows {
        out.write_row(row).map_err(anyhow::Error::from)?;
    }
    out.flush()?;
    Ok(())
}
