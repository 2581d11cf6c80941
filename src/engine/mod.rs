//! Scenario evaluation: lever validation and the ordered stage pipeline.

pub mod stages;

use log::debug;

use crate::config::LeverSettings;
use crate::error::ModelError;
use crate::model::{Dataset, DerivedConstants, EmissionFactors};
use crate::projects::{CombinePolicy, LinearSum, ProjectEffectTable};

/// Evaluates lever settings against an immutable baseline.
///
/// The engine borrows the startup-time tables and never mutates them.
/// Every call to [`ScenarioEngine::evaluate`] works on its own copy of
/// the dataset, so concurrent evaluations from shared references never
/// observe each other's intermediate scenario state.
///
/// Generic over `P: CombinePolicy` for static dispatch of the
/// project-combination policy; [`ScenarioEngine::new`] picks the
/// default additive policy.
pub struct ScenarioEngine<'a, P: CombinePolicy = LinearSum> {
    dataset: &'a Dataset,
    constants: &'a DerivedConstants,
    projects: &'a ProjectEffectTable,
    factors: &'a EmissionFactors,
    combine: P,
}

impl<'a> ScenarioEngine<'a, LinearSum> {
    /// Creates an engine with the default additive combination policy.
    pub fn new(
        dataset: &'a Dataset,
        constants: &'a DerivedConstants,
        projects: &'a ProjectEffectTable,
        factors: &'a EmissionFactors,
    ) -> Self {
        Self::with_policy(dataset, constants, projects, factors, LinearSum)
    }
}

impl<'a, P: CombinePolicy> ScenarioEngine<'a, P> {
    /// Creates an engine with a custom project-combination policy.
    pub fn with_policy(
        dataset: &'a Dataset,
        constants: &'a DerivedConstants,
        projects: &'a ProjectEffectTable,
        factors: &'a EmissionFactors,
        combine: P,
    ) -> Self {
        Self {
            dataset,
            constants,
            projects,
            factors,
            combine,
        }
    }

    /// Runs the full ordered pipeline for one lever-settings structure
    /// and returns the computed dataset.
    ///
    /// The stages run in a fixed order because each depends on the
    /// cumulative scenario state left by its predecessors: project and
    /// ridership shifts first, fleet relabelling next, demand scaling,
    /// then the occupancy override, and emissions last.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidLever`] if any lever value is
    /// outside its declared domain, or [`ModelError::UnknownProject`]
    /// for a selected project id missing from the table. No partial
    /// result is produced on error.
    pub fn evaluate(&self, levers: &LeverSettings) -> Result<Dataset, ModelError> {
        if let Some(e) = levers.validate().into_iter().next() {
            return Err(ModelError::InvalidLever {
                field: e.field,
                message: e.message,
            });
        }
        let effect = self
            .projects
            .combined(&levers.transit.projects, &self.combine)?;

        debug!(
            "evaluating scenario: {} project(s), bus +{}, cycling x{}, trips -{}%",
            levers.transit.projects.len(),
            levers.bus.ridership_increase,
            levers.cycling.mode_share,
            levers.trips.reduction_pct,
        );

        // Fresh working copy per evaluation; the borrowed baseline stays
        // untouched.
        let ds = *self.dataset;
        let ds = stages::apply_transit_projects(ds, &effect);
        let ds = stages::apply_bus_ridership(ds, self.constants, levers.bus.ridership_increase);
        let ds = stages::apply_cycling_uptake(ds, self.constants, levers.cycling.mode_share);
        let ds =
            stages::apply_bus_electrification(ds, self.constants, levers.bus.electrification_year);
        let ds = stages::apply_car_electrification(ds, levers.car.electrification);
        let ds = stages::apply_trip_reduction(ds, self.constants, levers.trips.reduction_pct);
        let ds = stages::apply_occupancy_override(ds, levers.car.occupancy);
        let ds = stages::compute_emissions(ds, self.factors, levers.car.emission_improvement);
        Ok(ds)
    }
}
