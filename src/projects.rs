//! Candidate transit projects and their precomputed per-mode effects.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ModelError;
use crate::model::{Dataset, DerivedConstants, Mode, ModeVec};

/// Service characteristics of one candidate transit project, as loaded
/// from the project table. Static and read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDescriptor {
    /// Project identifier (table row key).
    #[serde(rename = "project")]
    pub id: String,
    /// Transit mode the project is designed to serve.
    pub primary_mode: Mode,
    /// Minutes between departures during peak hours.
    pub peak_freq: f64,
    /// Minutes between departures off peak.
    pub off_peak_freq: f64,
    /// Passengers per vehicle at peak.
    pub vehicle_capacity: f64,
    /// One-way route distance (km).
    pub distance: f64,
    /// Service hours counted as peak per day.
    pub num_peak_hrs: f64,
    /// Total service hours per day.
    pub num_hours: f64,
}

impl ProjectDescriptor {
    fn validate(&self) -> Result<(), ModelError> {
        let fail = |message: &str| {
            Err(ModelError::InvalidProject {
                id: self.id.clone(),
                message: message.into(),
            })
        };
        if self.id.is_empty() {
            return Err(ModelError::InvalidProject {
                id: "<empty>".into(),
                message: "project id must not be empty".into(),
            });
        }
        if !self.primary_mode.is_transit() {
            return fail("primary_mode must be a transit mode");
        }
        if !self.peak_freq.is_finite()
            || self.peak_freq <= 0.0
            || !self.off_peak_freq.is_finite()
            || self.off_peak_freq <= 0.0
        {
            return fail("service frequencies must be finite and > 0 minutes");
        }
        if !self.vehicle_capacity.is_finite() || self.vehicle_capacity <= 0.0 {
            return fail("vehicle_capacity must be finite and > 0");
        }
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return fail("distance must be finite and > 0 km");
        }
        if !self.num_peak_hrs.is_finite()
            || !self.num_hours.is_finite()
            || self.num_peak_hrs < 0.0
            || self.num_hours < self.num_peak_hrs
        {
            return fail("num_peak_hrs must be in [0, num_hours]");
        }
        Ok(())
    }
}

/// Isolated effect of one project on every mode's pkt and vkt.
///
/// The effect on transit modes other than the project's primary mode is
/// exactly zero; the effect on private/active modes is non-positive and
/// proportional to each mode's baseline share of private travel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectEffect {
    /// Passenger-distance delta per mode (km per year).
    pub pkt: ModeVec,
    /// Vehicle-distance delta per mode (km per year).
    pub vkt: ModeVec,
}

/// Policy for merging the effects of several selected projects into one.
///
/// The shipped [`LinearSum`] policy adds effects mode by mode: project
/// benefits are assumed additive, with no capacity interaction or
/// diminishing returns between projects. This is a modelling assumption,
/// held behind a seam so a future policy can replace it without touching
/// the engine contract.
pub trait CombinePolicy {
    /// Merges the given isolated effects into one combined effect.
    fn combine(&self, effects: &[ProjectEffect]) -> ProjectEffect;
}

/// Simple additive combination of project effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSum;

impl CombinePolicy for LinearSum {
    fn combine(&self, effects: &[ProjectEffect]) -> ProjectEffect {
        let mut out = ProjectEffect::default();
        for e in effects {
            for m in Mode::ALL {
                out.pkt[m] += e.pkt[m];
                out.vkt[m] += e.vkt[m];
            }
        }
        out
    }
}

/// Precomputed per-project effects, keyed by project id.
///
/// Computed once at startup from descriptors and derived constants;
/// independent of lever settings and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProjectEffectTable {
    effects: BTreeMap<String, ProjectEffect>,
}

impl ProjectEffectTable {
    /// Computes the isolated effect of every descriptor.
    ///
    /// For a project with primary mode M:
    /// - primary pkt: departures per peak hour times route distance,
    ///   annualised, times capacity, both directions, both AM peak hours;
    /// - primary vkt: peak and off-peak departures over the service day,
    ///   times route distance, annualised, both directions;
    /// - each private/active mode is drawn down by its baseline share of
    ///   private pkt, converted to vkt via occupancy for light vehicles
    ///   and 1:1 for walking and cycling.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidProject`] for a descriptor violating
    /// its constraints, including duplicate project ids.
    pub fn compute(
        descriptors: &[ProjectDescriptor],
        ds: &Dataset,
        k: &DerivedConstants,
    ) -> Result<Self, ModelError> {
        let mut effects = BTreeMap::new();
        for p in descriptors {
            p.validate()?;

            let mut effect = ProjectEffect::default();
            let primary = p.primary_mode;
            effect.pkt[primary] = (60.0 / p.peak_freq)
                * p.distance
                * k.pkt_annualisation
                * p.vehicle_capacity
                * 2.0  // both directions
                * 2.0; // both AM peak hours
            effect.vkt[primary] = ((60.0 / p.peak_freq) * p.num_peak_hrs
                + (60.0 / p.off_peak_freq) * (p.num_hours - p.num_peak_hrs))
                * p.distance
                * k.vkt_annualisation
                * 2.0; // both directions

            for m in Mode::PRIVATE {
                let draw = -(ds.baseline.pkt[m] / k.private_pkt_total) * effect.pkt[primary];
                effect.pkt[m] = draw;
                effect.vkt[m] = if m.is_light_vehicle() {
                    draw / k.car_occupancy
                } else {
                    draw
                };
            }

            if effects.insert(p.id.clone(), effect).is_some() {
                return Err(ModelError::InvalidProject {
                    id: p.id.clone(),
                    message: "duplicate project id".into(),
                });
            }
        }
        Ok(Self { effects })
    }

    /// Effect of one project, if it exists.
    pub fn get(&self, id: &str) -> Option<&ProjectEffect> {
        self.effects.get(id)
    }

    /// Project ids, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.effects.keys().map(String::as_str)
    }

    /// Number of projects in the table.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// True if the table holds no projects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Resolves a selection of project ids and merges their effects.
    ///
    /// An empty selection yields the all-zero effect.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownProject`] for an id not in the table.
    pub fn combined<P: CombinePolicy>(
        &self,
        selected: &[String],
        policy: &P,
    ) -> Result<ProjectEffect, ModelError> {
        let mut picked = Vec::with_capacity(selected.len());
        for id in selected {
            let effect = self
                .effects
                .get(id)
                .ok_or_else(|| ModelError::UnknownProject(id.clone()))?;
            picked.push(*effect);
        }
        Ok(policy.combine(&picked))
    }
}
