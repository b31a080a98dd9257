use clap::{Args, Parser, Subcommand};
use molgeom::core::io::StructureFormat;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Molgeom Developers",
    version,
    about = "molgeom - Geometry measurements and local-environment descriptors for small molecules and trajectories.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute one descriptor row per labeled atom pair of a structure.
    Features(FeaturesArgs),
    /// Measure distances, angles and torsions over every frame of a trajectory.
    Measure(MeasureArgs),
    /// List the supported structure formats.
    Formats,
}

/// Arguments for the `features` subcommand.
#[derive(Args, Debug)]
pub struct FeaturesArgs {
    /// Path to the input structure in XYZ format, with partial charges in the fifth column.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to the coupling label file. Defaults to the input path with a `.train` suffix.
    #[arg(short, long, value_name = "PATH")]
    pub labels: Option<PathBuf>,

    /// Path for the comma-separated feature rows. Defaults to standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the number of decimals written for histogram bins.
    #[arg(long, value_name = "INT")]
    pub histogram_precision: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S descriptors.coulomb-capacity=23
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `measure` subcommand.
#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Path to the input structure or trajectory.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Format of the input file (see `molgeom formats`).
    #[arg(short, long, default_value = "arc", value_name = "FORMAT")]
    pub format: StructureFormat,

    /// Read the measurements from a task file instead of the command line.
    #[arg(
        short = 'e',
        long = "tasks",
        value_name = "PATH",
        conflicts_with_all = ["distance", "angle", "torsion"]
    )]
    pub tasks: Option<PathBuf>,

    /// Measure the distance between two atoms (0-based indices).
    #[arg(short, long, num_args = 2, value_names = ["I", "J"])]
    pub distance: Option<Vec<usize>>,

    /// Measure the angle I-J-K, with J as the vertex.
    #[arg(short, long, num_args = 3, value_names = ["I", "J", "K"])]
    pub angle: Option<Vec<usize>>,

    /// Measure the torsion I-J-K-L folded onto [0, PERIOD] degrees.
    #[arg(short, long, num_args = 5, value_names = ["I", "J", "K", "L", "PERIOD"])]
    pub torsion: Option<Vec<usize>>,

    /// Periodic unit cell (a, b, c in Angstroms; alpha, beta, gamma in degrees).
    /// Overrides any cell stored in the input frames.
    #[arg(
        short,
        long = "unitcell",
        num_args = 6,
        value_names = ["A", "B", "C", "ALPHA", "BETA", "GAMMA"],
        allow_negative_numbers = true
    )]
    pub unit_cell: Option<Vec<f64>>,

    /// Directory that receives the measurement tables.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,
}
