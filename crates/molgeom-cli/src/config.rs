pub mod defaults;

use crate::cli::FeaturesArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use molgeom::core::topology::radii::CovalentRadii;
use molgeom::engine::config::DescriptorConfig;
use molgeom::workflows::features::FeatureConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use toml::{Table, Value};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    #[serde(rename = "histogram-precision")]
    histogram_precision: Option<usize>,
}

/// The `features` configuration as written in a file, before command-line flags and
/// built-in defaults are applied.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialFeatureConfig {
    descriptors: Option<DescriptorConfig>,
    radii: Option<BTreeMap<String, f64>>,
    output: Option<PartialOutputConfig>,
}

/// Fully resolved settings of one `features` run.
#[derive(Debug, Clone)]
pub struct ResolvedFeatureConfig {
    pub features: FeatureConfig,
    pub histogram_precision: usize,
}

impl PartialFeatureConfig {
    /// Reads the optional configuration file and applies `-S key=value` overrides on top.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut table = match path {
            Some(path) => {
                debug!("Loading configuration from file: {:?}", path);
                let content = std::fs::read_to_string(path)?;
                toml::from_str::<Table>(&content).map_err(|e| CliError::parsing(path, e))?
            }
            None => Table::new(),
        };
        apply_set_values(&mut table, set_values)?;

        Value::Table(table).try_into().map_err(|e| match path {
            Some(path) => CliError::parsing(path, e),
            None => CliError::Config(e.to_string()),
        })
    }

    pub fn merge_with_cli(self, args: &FeaturesArgs) -> Result<ResolvedFeatureConfig> {
        let defaults = DefaultsConfig::default();

        let radii = CovalentRadii::with_overrides(self.radii.unwrap_or_default())
            .map_err(|e| CliError::Config(e.to_string()))?;
        let histogram_precision = args
            .histogram_precision
            .or(self.output.and_then(|output| output.histogram_precision))
            .unwrap_or(defaults.histogram_precision);

        Ok(ResolvedFeatureConfig {
            features: FeatureConfig {
                descriptors: self.descriptors.unwrap_or_default(),
                radii,
            },
            histogram_precision,
        })
    }
}

fn apply_set_values(table: &mut Table, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        debug!("Applying override {} = {}", key, value_str);
        insert_dotted(table, key.trim(), parse_value(value_str))?;
    }
    Ok(())
}

fn insert_dotted(table: &mut Table, key: &str, value: Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(CliError::Config(format!("Invalid --set key: '{}'", key)));
    };
    if parts.iter().any(|part| part.is_empty()) {
        return Err(CliError::Config(format!("Invalid --set key: '{}'", key)));
    }

    let mut current = table;
    for part in parents {
        current = match current
            .entry(part.to_string())
            .or_insert(Value::Table(Table::new()))
        {
            Value::Table(inner) => inner,
            _ => {
                return Err(CliError::Config(format!(
                    "Cannot set '{}': '{}' is not a section",
                    key, part
                )));
            }
        };
    }
    current.insert(last.to_string(), value);
    Ok(())
}

/// Interprets an override value as an integer, float, boolean, array of those, or
/// string, in that order.
fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    if let Some(items) = raw.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
        return Value::Array(
            items
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(parse_value)
                .collect(),
        );
    }
    if let Ok(integer) = raw.parse::<i64>() {
        Value::Integer(integer)
    } else if let Ok(float) = raw.parse::<f64>() {
        Value::Float(float)
    } else if let Ok(boolean) = raw.parse::<bool>() {
        Value::Boolean(boolean)
    } else {
        Value::String(raw.to_string())
    }
}
