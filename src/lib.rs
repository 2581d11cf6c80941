//! What-if scenario calculator for regional transport emissions.
//!
//! A baseline set of travel statistics (distance per mode, per period)
//! plus a structure of policy levers (new transit projects, ridership
//! growth, electrification, occupancy changes, trip reduction) is turned
//! into a derived 2030 scenario dataset with resulting emissions.

pub mod config;
/// Scenario evaluation pipeline and its ordered stages.
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
/// Transit project descriptors and precomputed effects.
pub mod projects;
pub mod summary;
