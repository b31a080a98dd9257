//! # Topology Module
//!
//! Bond connectivity derived from atomic coordinates and the graph analyses run on it.
//!
//! - [`radii`] - Covalent radii: a built-in table for H, C, N, F, O plus TOML overrides
//! - [`graph`] - The [`graph::NeighborGraph`], built from sum-of-radii bond detection
//! - [`rings`] - Heavy-atom ring membership ([`rings::is_cyclic`], [`rings::CyclicSet`])
//! - [`paths`] - Breadth-first bond-count labeling ([`paths::BondDistances`])
//!
//! Everything here is computed per frame and owned by the caller. A graph must be fully
//! built before any ring or path query runs against it.

pub mod graph;
pub mod paths;
pub mod radii;
pub mod rings;
