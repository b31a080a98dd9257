//! # Workflows Module
//!
//! High-level entry points that turn whole input files into output rows.
//!
//! ## Overview
//!
//! Each workflow takes parsed inputs (a structure or a stream of frames, plus the records
//! or tasks to evaluate), validates its configuration, reports progress through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and returns owned
//! results. Writing those results to disk is left to the caller.
//!
//! ## Architecture
//!
//! - **Feature Workflow** ([`features`]) - Builds the bond topology of one frame and
//!   emits one descriptor row per coupling record
//! - **Coupling Rows** ([`couplings`]) - The fixed column layout of a feature row for
//!   each coupling family (1J, 2J, 3J, geminal and vicinal H-H)
//! - **Measure Workflow** ([`measure`]) - Distance, angle and torsion series over every
//!   frame of a trajectory, periodic when a cell is known
//!
//! ## Key Capabilities
//!
//! - **Deterministic output order** matching the input records, also under `parallel`
//! - **Per-record diagnostics** naming the record that could not be described
//! - **Streaming trajectories** consumed one frame at a time

pub mod couplings;
pub mod features;
pub mod measure;
