use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::arc::ArcError;
use crate::core::io::xyz::XyzError;
use crate::core::topology::graph::TopologyError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DescriptorError {
    #[error("Atom index {index} is out of range for a structure of {len} atoms")]
    AtomOutOfRange { index: usize, len: usize },

    #[error("Atom {atom} has no partial charge")]
    MissingCharge { atom: usize },

    #[error("Atoms {first} and {second} occupy the same position")]
    CoincidentAtoms { first: usize, second: usize },

    #[error("Atom {atom} has no neighbor {requirement}")]
    MissingNeighbor { atom: usize, requirement: String },

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid descriptor configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build the bond graph: {0}")]
    Topology(#[from] TopologyError),

    #[error("Descriptor computation failed: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("Record '{id}' ({coupling_type}) failed: {source}")]
    Record {
        id: String,
        coupling_type: String,
        #[source]
        source: DescriptorError,
    },

    #[error("Measurement on frame {frame} references atom {index}, but the frame has {len} atoms")]
    TaskOutOfRange {
        frame: usize,
        index: usize,
        len: usize,
    },

    #[error("Failed to read XYZ frame: {0}")]
    Xyz(#[from] XyzError),

    #[error("Failed to read ARC frame: {0}")]
    Arc(#[from] ArcError),

    #[error("Input contains no structure frames")]
    NoFrames,
}
