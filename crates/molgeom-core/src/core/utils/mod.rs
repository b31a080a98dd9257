//! Numeric helpers shared by the measurement and descriptor code: 3-vector arithmetic,
//! periodic-cell transforms and the distance/angle/torsion measures built on them.

pub mod geometry;
pub mod periodic;
pub mod vector;
