use crate::core::models::atom::canonical_symbol;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Built-in covalent radii in Angstroms for the elements of small organic molecules.
static DEFAULT_COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.38,
    "C" => 0.95,
    "N" => 0.88,
    "F" => 0.71,
    "O" => 0.82,
};

#[derive(Debug, Error)]
pub enum RadiiLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid covalent radius {value} for element '{symbol}': must be positive")]
    InvalidRadius { symbol: String, value: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RadiiFile {
    #[serde(default)]
    radii: HashMap<String, f64>,
}

/// Covalent-radius lookup: the built-in table plus user overrides.
///
/// Overrides take precedence over built-in values and may introduce new elements.
/// Symbols are matched in canonical case, so `"cl"` and `"Cl"` name the same element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CovalentRadii {
    overrides: HashMap<String, f64>,
}

impl CovalentRadii {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the given overrides applied on top of the built-in radii.
    pub fn with_overrides<I, S>(overrides: I) -> Result<Self, RadiiLoadError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut radii = Self::new();
        for (symbol, value) in overrides {
            radii.insert(symbol, value)?;
        }
        Ok(radii)
    }

    /// Loads overrides from a TOML file containing a `[radii]` table.
    pub fn load(path: &Path) -> Result<Self, RadiiLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RadiiLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: RadiiFile = toml::from_str(&content).map_err(|e| RadiiLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::with_overrides(file.radii)
    }

    pub fn insert(&mut self, symbol: impl Into<String>, value: f64) -> Result<(), RadiiLoadError> {
        let symbol = canonical_symbol(&symbol.into());
        if !(value > 0.0 && value.is_finite()) {
            return Err(RadiiLoadError::InvalidRadius { symbol, value });
        }
        self.overrides.insert(symbol, value);
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        let symbol = canonical_symbol(symbol);
        self.overrides
            .get(&symbol)
            .copied()
            .or_else(|| DEFAULT_COVALENT_RADII.get(symbol.as_str()).copied())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }
}
