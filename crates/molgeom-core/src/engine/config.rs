use super::kernels::linspace;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Bins '{name}' are invalid: {reason}")]
    InvalidBins { name: &'static str, reason: String },

    #[error("Parameter '{name}' must be positive and finite (value: {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("Environment histograms must share one bin count (distance: {distance}, axial: {axial}, perpendicular: {perpendicular})")]
    MismatchedEnvironmentBins {
        distance: usize,
        axial: usize,
        perpendicular: usize,
    },

    #[error("Coulomb capacity must be at least 1")]
    ZeroCoulombCapacity,
}

/// Centers and width of one smoothed histogram.
///
/// `count` centers are spaced evenly from `start` to `end` (both included). Each value
/// contributes `exp(-(bandwidth·(x - center))²)` to every bin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BinSpec {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub bandwidth: f64,
}

impl BinSpec {
    pub const fn new(start: f64, end: f64, count: usize, bandwidth: f64) -> Self {
        Self {
            start,
            end,
            count,
            bandwidth,
        }
    }

    pub fn centers(&self) -> Vec<f64> {
        linspace(self.start, self.end, self.count)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBins {
            name,
            reason: reason.to_string(),
        };
        if self.count == 0 {
            return Err(invalid("at least one bin is required"));
        }
        if !(self.start.is_finite() && self.end.is_finite()) {
            return Err(invalid("range bounds must be finite"));
        }
        if self.count > 1 && self.end <= self.start {
            return Err(invalid("end must be greater than start"));
        }
        if !(self.bandwidth.is_finite() && self.bandwidth > 0.0) {
            return Err(invalid("bandwidth must be positive"));
        }
        Ok(())
    }
}

/// Parameters of the directional environment descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct EnvironmentConfig {
    /// Bins over the distance to the query atom.
    pub distance_bins: BinSpec,
    /// Bins over the signed projection onto the query axis.
    pub axial_bins: BinSpec,
    /// Bins over the distance from the query axis.
    pub perpendicular_bins: BinSpec,
    /// Taper radius of the per-channel weighted sums.
    pub sum_cutoff: f64,
    /// Taper radius applied to every histogram contribution.
    pub histogram_cutoff: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            distance_bins: BinSpec::new(1.0, 5.5, 9, 1.7),
            axial_bins: BinSpec::new(-5.0, 5.0, 9, 1.4),
            perpendicular_bins: BinSpec::new(1.0, 5.5, 9, 1.7),
            sum_cutoff: 5.0,
            histogram_cutoff: 6.0,
        }
    }
}

/// Parameters of every local-environment descriptor family.
///
/// All fields have defaults, so a configuration file only needs to name the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct DescriptorConfig {
    pub neighbor_distance: BinSpec,
    pub second_shell_distance: BinSpec,
    pub distant_radial: BinSpec,
    pub distant_radial_cutoff: f64,
    pub angle: BinSpec,
    pub torsion: BinSpec,
    pub charge: BinSpec,
    /// Radii (Å) of the two close-atom charge shells.
    pub close_atom_radii: [f64; 2],
    pub environment: EnvironmentConfig,
    /// Number of entries kept in a sorted Coulomb row.
    pub coulomb_capacity: usize,
    /// Value filling a Coulomb row when the frame has fewer atoms than the capacity.
    pub coulomb_padding: f64,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            neighbor_distance: BinSpec::new(0.9, 1.6, 10, 25.0),
            second_shell_distance: BinSpec::new(1.4, 3.4, 10, 8.75),
            distant_radial: BinSpec::new(2.0, 10.0, 9, 1.7),
            distant_radial_cutoff: 11.3,
            angle: BinSpec::new(40.0, 180.0, 10, 0.125),
            torsion: BinSpec::new(0.0, 180.0, 10, 0.0875),
            charge: BinSpec::new(-0.75, 0.75, 15, 17.5),
            close_atom_radii: [3.0, 5.0],
            environment: EnvironmentConfig::default(),
            coulomb_capacity: 29,
            coulomb_padding: 0.0,
        }
    }
}

impl DescriptorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.neighbor_distance.validate("neighbor-distance")?;
        self.second_shell_distance.validate("second-shell-distance")?;
        self.distant_radial.validate("distant-radial")?;
        self.angle.validate("angle")?;
        self.torsion.validate("torsion")?;
        self.charge.validate("charge")?;

        let env = &self.environment;
        env.distance_bins.validate("environment.distance-bins")?;
        env.axial_bins.validate("environment.axial-bins")?;
        env.perpendicular_bins.validate("environment.perpendicular-bins")?;
        if env.distance_bins.count != env.axial_bins.count
            || env.distance_bins.count != env.perpendicular_bins.count
        {
            return Err(ConfigError::MismatchedEnvironmentBins {
                distance: env.distance_bins.count,
                axial: env.axial_bins.count,
                perpendicular: env.perpendicular_bins.count,
            });
        }

        for (name, value) in [
            ("distant-radial-cutoff", self.distant_radial_cutoff),
            ("close-atom-radii[0]", self.close_atom_radii[0]),
            ("close-atom-radii[1]", self.close_atom_radii[1]),
            ("environment.sum-cutoff", env.sum_cutoff),
            ("environment.histogram-cutoff", env.histogram_cutoff),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.coulomb_capacity == 0 {
            return Err(ConfigError::ZeroCoulombCapacity);
        }
        Ok(())
    }
}
