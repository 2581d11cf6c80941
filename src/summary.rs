//! Post-hoc summary aggregation from a computed dataset.

use std::fmt;

use crate::model::{Dataset, DerivedConstants, MetricTable, Mode};

/// kg CO2-e per megatonne.
const KG_PER_MT: f64 = 1.0e9;

/// Aggregate figures for display alongside the per-mode tables.
///
/// Computed post-hoc from a finished [`Dataset`] so the headline numbers
/// always agree with the per-mode rows; no hidden state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryReport {
    /// Total 2018 emissions (Mt CO2-e).
    pub emissions_mt_2018: f64,
    /// Total 2030-baseline emissions (Mt CO2-e).
    pub emissions_mt_baseline: f64,
    /// Total 2030-scenario emissions (Mt CO2-e).
    pub emissions_mt_scenario: f64,
    /// Registered cars in 2018.
    pub cars_2018: f64,
    /// Estimated cars on the road in the 2030 baseline.
    pub cars_baseline: f64,
    /// Estimated cars on the road in the 2030 scenario.
    pub cars_scenario: f64,
}

fn light_vkt(table: &MetricTable) -> f64 {
    table.vkt[Mode::PassengerLight] + table.vkt[Mode::ElectricLight]
}

impl SummaryReport {
    /// Builds the summary from a computed dataset.
    ///
    /// Car counts scale the 2018 ownership figure by each period's
    /// light-vehicle vkt relative to 2018.
    pub fn from_dataset(ds: &Dataset, k: &DerivedConstants) -> Self {
        Self {
            emissions_mt_2018: ds.observed.emissions.total() / KG_PER_MT,
            emissions_mt_baseline: ds.baseline.emissions.total() / KG_PER_MT,
            emissions_mt_scenario: ds.scenario.emissions.total() / KG_PER_MT,
            cars_2018: k.car_ownership_2018,
            cars_baseline: k.cars_per_light_vkt * light_vkt(&ds.baseline),
            cars_scenario: k.cars_per_light_vkt * light_vkt(&ds.scenario),
        }
    }
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Scenario Summary ---")?;
        writeln!(f, "Emissions 2018:           {:.3} Mt CO2-e", self.emissions_mt_2018)?;
        writeln!(
            f,
            "Emissions 2030 baseline:  {:.3} Mt CO2-e",
            self.emissions_mt_baseline
        )?;
        writeln!(
            f,
            "Emissions 2030 scenario:  {:.3} Mt CO2-e",
            self.emissions_mt_scenario
        )?;
        writeln!(f, "Cars 2018:                {:.0}", self.cars_2018)?;
        writeln!(f, "Cars 2030 baseline:       {:.0}", self.cars_baseline)?;
        write!(f, "Cars 2030 scenario:       {:.0}", self.cars_scenario)
    }
}
