//! Typed data model: modes, metric tables, and derived constants.

/// Fixed coefficients and baseline-derived aggregates.
pub mod constants;
pub mod dataset;
pub mod mode;

// Re-export the main types for convenience
pub use constants::DerivedConstants;
pub use dataset::{Dataset, EmissionFactors, MetricTable, Period};
pub use mode::{Mode, ModeVec};
