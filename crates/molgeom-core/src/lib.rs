//! # Molgeom Core Library
//!
//! Molecular geometry measurements and smoothed local-environment descriptors, built
//! for turning small-molecule structures into feature vectors for machine learning.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture to keep concerns separate,
//! making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `UnitCell`),
//!   vector and periodic geometry, the covalent bond graph, and readers and writers for
//!   structure, label, task and feature files.
//!
//! - **[`engine`]: The Logic Core.** The per-frame `FrameContext`, the smoothing
//!   kernels, and every descriptor family (distance, angle, torsion and charge
//!   histograms, element counts, the directional environment descriptor and sorted
//!   Coulomb rows).
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie `core` and
//!   `engine` together: coupling feature rows for labelled atom pairs and geometry
//!   measurement series over trajectories.

pub mod core;
pub mod engine;
pub mod workflows;
