use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Environment variable holding `tracing` filter directives, e.g.
/// `MOLGEOM_LOG=molgeom::workflows=debug`. It replaces the level chosen by `-v`.
pub const LOG_ENV_VAR: &str = "MOLGEOM_LOG";

pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Chooses the active filter. `--quiet` always wins; otherwise non-empty directives from
/// [`LOG_ENV_VAR`] take precedence over the `-v` count.
pub fn build_filter(verbosity: u8, quiet: bool, directives: Option<&str>) -> Result<EnvFilter> {
    let level = level_filter(verbosity, quiet);
    match directives.map(str::trim).filter(|d| !d.is_empty() && !quiet) {
        Some(directives) => EnvFilter::try_new(directives).map_err(|e| {
            CliError::Config(format!("Invalid {} value '{}': {}", LOG_ENV_VAR, directives, e))
        }),
        None => Ok(EnvFilter::default().add_directive(level.into())),
    }
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let directives = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(verbosity, quiet, directives.as_deref())?;

    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    let file = log_file
        .map(|path| -> Result<_> {
            let file = File::create(&path)?;
            Ok(fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_thread_ids(true))
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .init();
    Ok(())
}
