//! Baseline and scenario metric tables plus per-mode emission factors.

use std::fmt;

use super::mode::{Mode, ModeVec};

/// Calendar period covered by the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Observed values for 2018.
    Observed2018,
    /// 2030 projection without any intervention.
    Baseline2030,
    /// 2030 projection with the selected interventions applied.
    Scenario2030,
}

impl Period {
    /// All periods, in chronological order.
    pub const ALL: [Period; 3] = [
        Period::Observed2018,
        Period::Baseline2030,
        Period::Scenario2030,
    ];

    /// Suffix used by the table contract row keys (`pkt_2018`, ...).
    pub fn key_suffix(self) -> &'static str {
        match self {
            Period::Observed2018 => "2018",
            Period::Baseline2030 => "2030_baseline",
            Period::Scenario2030 => "2030_scenario",
        }
    }
}

/// Passenger-distance, vehicle-distance, and emissions rows for one period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricTable {
    /// Passenger-distance travelled (km per year).
    pub pkt: ModeVec,
    /// Vehicle-distance travelled (km per year).
    pub vkt: ModeVec,
    /// Emissions (kg CO2-e per year), always derived from vkt and factors.
    pub emissions: ModeVec,
}

/// Per-mode emission factors (kg CO2-e per vehicle-km) for each period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionFactors {
    /// Factors observed in 2018.
    pub observed: ModeVec,
    /// Projected 2030 factors without intervention.
    pub baseline: ModeVec,
    /// Projected 2030 factors under the scenario.
    pub scenario: ModeVec,
}

impl EmissionFactors {
    /// Factor row for one period.
    pub fn row(&self, period: Period) -> &ModeVec {
        match period {
            Period::Observed2018 => &self.observed,
            Period::Baseline2030 => &self.baseline,
            Period::Scenario2030 => &self.scenario,
        }
    }
}

/// Complete working dataset: observed 2018, projected 2030 baseline, and
/// the 2030 scenario the engine mutates.
///
/// The observed and baseline tables are read-only after construction.
/// Engine stages write only to `scenario`, and every evaluation starts
/// from its own copy of the whole dataset, so concurrent evaluations
/// never observe each other's intermediate state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dataset {
    /// Observed 2018 values.
    pub observed: MetricTable,
    /// 2030 projection without intervention.
    pub baseline: MetricTable,
    /// 2030 projection with interventions; the only table stages mutate.
    pub scenario: MetricTable,
}

impl Dataset {
    /// Assembles a dataset from the six pkt/vkt input rows.
    ///
    /// Emissions rows are never taken from input; each period's row is
    /// derived here as `factors x vkt` so the dataset starts internally
    /// consistent. The scenario emissions row is recomputed again by the
    /// final engine stage after the vkt mutations.
    pub fn from_rows(
        observed_pkt: ModeVec,
        observed_vkt: ModeVec,
        baseline_pkt: ModeVec,
        baseline_vkt: ModeVec,
        scenario_pkt: ModeVec,
        scenario_vkt: ModeVec,
        factors: &EmissionFactors,
    ) -> Self {
        let derive = |f: &ModeVec, vkt: &ModeVec| ModeVec::from_fn(|m| f[m] * vkt[m]);
        Self {
            observed: MetricTable {
                pkt: observed_pkt,
                vkt: observed_vkt,
                emissions: derive(&factors.observed, &observed_vkt),
            },
            baseline: MetricTable {
                pkt: baseline_pkt,
                vkt: baseline_vkt,
                emissions: derive(&factors.baseline, &baseline_vkt),
            },
            scenario: MetricTable {
                pkt: scenario_pkt,
                vkt: scenario_vkt,
                emissions: derive(&factors.scenario, &scenario_vkt),
            },
        }
    }

    /// Metric table for one period.
    pub fn table(&self, period: Period) -> &MetricTable {
        match period {
            Period::Observed2018 => &self.observed,
            Period::Baseline2030 => &self.baseline,
            Period::Scenario2030 => &self.scenario,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<16} {:>16} {:>16} {:>16} {:>14}",
            "mode", "pkt baseline", "pkt scenario", "vkt scenario", "em scenario"
        )?;
        for m in Mode::ALL {
            writeln!(
                f,
                "{:<16} {:>16.0} {:>16.0} {:>16.0} {:>14.0}",
                m.as_str(),
                self.baseline.pkt[m],
                self.scenario.pkt[m],
                self.scenario.vkt[m],
                self.scenario.emissions[m],
            )?;
        }
        write!(
            f,
            "{:<16} {:>16.0} {:>16.0} {:>16.0} {:>14.0}",
            "total",
            self.baseline.pkt.total(),
            self.scenario.pkt.total(),
            self.scenario.vkt.total(),
            self.scenario.emissions.total(),
        )
    }
}
