//! Reading structure, label and task files, and writing feature rows.
//!
//! Structure formats implement the frame-at-a-time [`traits::FrameFormat`] trait, so a
//! multi-frame trajectory is consumed lazily and end of input simply ends iteration.
//! The label and task readers return their whole content at once; both files are small.

pub mod arc;
pub mod labels;
pub mod output;
pub mod tasks;
pub mod traits;
pub mod xyz;

use std::fmt;
use std::str::FromStr;

/// Structure formats understood by the readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureFormat {
    Xyz,
    Arc,
}

impl StructureFormat {
    pub const ALL: [StructureFormat; 2] = [StructureFormat::Xyz, StructureFormat::Arc];

    pub fn name(self) -> &'static str {
        use traits::FrameFormat;
        match self {
            StructureFormat::Xyz => xyz::XyzFile::NAME,
            StructureFormat::Arc => arc::ArcFile::NAME,
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StructureFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xyz" | "xmol" => Ok(StructureFormat::Xyz),
            "arc" | "tinker" | "txyz" => Ok(StructureFormat::Arc),
            other => Err(format!("unsupported structure format '{other}'")),
        }
    }
}
