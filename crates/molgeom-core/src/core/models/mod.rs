//! # Core Models Module
//!
//! Plain data types describing one frame of a molecular structure.
//!
//! ## Key Components
//!
//! - [`atom`] - Atoms with element symbol, descriptor species, position and optional charge
//! - [`cell`] - Triclinic unit-cell parameters for periodic frames
//! - [`structure`] - An ordered list of atoms plus an optional unit cell
//!
//! The models carry no derived state. Bond graphs, ring membership and bond-distance
//! labelings are computed from a [`structure::Structure`] by the [`crate::core::topology`]
//! module and are owned by whoever computed them.

pub mod atom;
pub mod cell;
pub mod structure;
