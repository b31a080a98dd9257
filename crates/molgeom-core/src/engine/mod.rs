//! # Engine Module
//!
//! This module implements the descriptor engine: the per-frame context, the smoothing
//! kernels and the local-environment descriptor families evaluated on top of the core
//! data model.
//!
//! ## Overview
//!
//! A frame is first turned into a [`FrameContext`](context::FrameContext), which owns the
//! bond graph and cyclic-atom set derived from the structure. Descriptor functions then
//! read that context and return owned vectors of numbers, one smoothed histogram or
//! tally per element channel (H, C, N, F, O and the heavy-atom aggregate).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Bin centers, bandwidths, cutoffs and row capacities
//!   for every descriptor family, loadable from TOML
//! - **Frame Context** ([`context`]) - Topology shared by all descriptors of one frame
//! - **Kernels** ([`kernels`]) - Gaussian bin membership and the radial cutoff taper
//! - **Accumulators** ([`histogram`]) - Channel-major histograms and element tallies
//! - **Descriptors** ([`descriptors`]) - Distance, angle, torsion, charge, count,
//!   environment and Coulomb descriptors
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Descriptor and workflow error types
//!
//! ## Key Capabilities
//!
//! - **Pure descriptor functions** with no shared mutable state, safe to evaluate in
//!   parallel over records of the same frame
//! - **Configurable binning** with defaults tuned for small organic molecules
//! - **Explicit failures** for missing charges, missing bond paths and coincident atoms

pub mod config;
pub mod context;
pub mod descriptors;
pub mod error;
pub mod histogram;
pub mod kernels;
pub mod progress;
