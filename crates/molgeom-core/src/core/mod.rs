//! # Core Module
//!
//! The stateless foundation of the library: frame data, numeric geometry, bond topology
//! and file I/O.
//!
//! ## Architecture
//!
//! - **Frame Representation** ([`models`]) - Atoms, unit cells and structures
//! - **Geometry** ([`utils`]) - Vector helpers, periodic-cell transforms with the
//!   minimum-image convention, and distance/angle/torsion measures
//! - **Bond Topology** ([`topology`]) - Covalent-radius bond graphs, ring membership and
//!   bond-count labeling
//! - **File I/O** ([`io`]) - XYZ and Tinker readers, coupling label and task files, and
//!   the comma-separated feature output
//!
//! Nothing in this layer logs or keeps state between frames. The [`crate::engine`]
//! layer builds per-frame contexts on top of it.

pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
