use super::traits::{LineErrorKind, float_field, int_field};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: u64, kind: LineErrorKind },
    #[error("Line {line} has {found} fields; expected 5 or 6")]
    FieldCount { line: u64, found: usize },
    #[error("Unknown coupling type '{value}' on line {line}")]
    UnknownCouplingType { line: u64, value: String },
}

/// The scalar-coupling classes a labeled atom pair can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CouplingType {
    OneJHC,
    OneJHN,
    TwoJHC,
    TwoJHN,
    ThreeJHC,
    ThreeJHN,
    TwoJHH,
    ThreeJHH,
}

impl CouplingType {
    pub const ALL: [CouplingType; 8] = [
        CouplingType::OneJHC,
        CouplingType::OneJHN,
        CouplingType::TwoJHC,
        CouplingType::TwoJHN,
        CouplingType::ThreeJHC,
        CouplingType::ThreeJHN,
        CouplingType::TwoJHH,
        CouplingType::ThreeJHH,
    ];

    /// Number of bonds separating the coupled atoms.
    pub fn bond_separation(self) -> u32 {
        match self {
            CouplingType::OneJHC | CouplingType::OneJHN => 1,
            CouplingType::TwoJHC | CouplingType::TwoJHN | CouplingType::TwoJHH => 2,
            CouplingType::ThreeJHC | CouplingType::ThreeJHN | CouplingType::ThreeJHH => 3,
        }
    }

    /// True for hydrogen-hydrogen couplings.
    pub fn is_homonuclear(self) -> bool {
        matches!(self, CouplingType::TwoJHH | CouplingType::ThreeJHH)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CouplingType::OneJHC => "1JHC",
            CouplingType::OneJHN => "1JHN",
            CouplingType::TwoJHC => "2JHC",
            CouplingType::TwoJHN => "2JHN",
            CouplingType::ThreeJHC => "3JHC",
            CouplingType::ThreeJHN => "3JHN",
            CouplingType::TwoJHH => "2JHH",
            CouplingType::ThreeJHH => "3JHH",
        }
    }
}

impl fmt::Display for CouplingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCouplingTypeError(pub String);

impl fmt::Display for ParseCouplingTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a known coupling type", self.0)
    }
}

impl std::error::Error for ParseCouplingTypeError {}

impl FromStr for CouplingType {
    type Err = ParseCouplingTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CouplingType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCouplingTypeError(s.to_string()))
    }
}

/// One labeled atom pair: `id,molecule,atom_index_0,atom_index_1,type[,value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingRecord {
    pub id: String,
    pub molecule: String,
    pub atom_index_0: usize,
    pub atom_index_1: usize,
    pub coupling_type: CouplingType,
    /// The training target, absent for prediction-only rows.
    pub value: Option<f64>,
}

/// Reads header-less coupling records, keeping them in file order.
pub fn read_labels<R: Read>(reader: R) -> Result<Vec<CouplingRecord>, LabelError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());
        if row.iter().all(str::is_empty) {
            continue;
        }
        if !(5..=6).contains(&row.len()) {
            return Err(LabelError::FieldCount {
                line,
                found: row.len(),
            });
        }
        let parse = |kind| LabelError::Parse { line, kind };

        let coupling_type =
            row[4]
                .parse::<CouplingType>()
                .map_err(|e| LabelError::UnknownCouplingType {
                    line,
                    value: e.0,
                })?;
        let value = match row.get(5) {
            Some(v) if !v.is_empty() => Some(float_field(Some(v), "value").map_err(parse)?),
            _ => None,
        };

        records.push(CouplingRecord {
            id: row[0].to_string(),
            molecule: row[1].to_string(),
            atom_index_0: int_field(Some(&row[2]), "atom_index_0").map_err(parse)?,
            atom_index_1: int_field(Some(&row[3]), "atom_index_1").map_err(parse)?,
            coupling_type,
            value,
        });
    }
    Ok(records)
}

pub fn read_labels_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CouplingRecord>, LabelError> {
    let file = File::open(path)?;
    read_labels(file)
}
