//! Fixed coefficients and aggregates derived once from the baseline.

use crate::error::ModelError;

use super::dataset::Dataset;
use super::mode::Mode;

/// Target year of the scenario projection.
pub const SCENARIO_YEAR: u32 = 2030;

/// A bus-electrification start year must be strictly later than this to
/// take effect.
pub const ELECTRIFICATION_REFERENCE_YEAR: u32 = 2019;

/// Annualisation factor: one AM peak hour to annual passenger-km.
const PKT_ANNUALISATION: f64 = 2250.0;
/// Annualisation factor: one weekday to annual vehicle-km.
const VKT_ANNUALISATION: f64 = 332.0;
/// Average passenger-km per vehicle-km for the light fleet.
const CAR_OCCUPANCY: f64 = 1.58;
/// Service lifespan of a bus fleet, in years.
const BUS_LIFESPAN_YEARS: f64 = 15.0;
/// Registered light vehicles in the region in 2018.
const CAR_OWNERSHIP_2018: f64 = 1_261_016.0;

/// Scalars used repeatedly by the transformation stages, computed once
/// from the baseline dataset and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedConstants {
    /// One peak hour to annual passenger-km.
    pub pkt_annualisation: f64,
    /// One weekday to annual vehicle-km.
    pub vkt_annualisation: f64,
    /// Baseline average light-fleet occupancy (pkt per vkt).
    pub car_occupancy: f64,
    /// Service lifespan of the bus fleet, in years.
    pub bus_lifespan_years: f64,
    /// Registered light vehicles in 2018.
    pub car_ownership_2018: f64,
    /// Total 2030-baseline pkt across private/active modes, the
    /// denominator for proportional draw-downs.
    pub private_pkt_total: f64,
    /// Same total excluding cycling; cycling is not a donor to itself.
    pub private_pkt_excl_cycling: f64,
    /// Estimated cars per light-vehicle vkt, from 2018 ownership and vkt.
    pub cars_per_light_vkt: f64,
}

impl DerivedConstants {
    /// Computes the derived constants from a loaded dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DegenerateBaseline`] if any proportionality
    /// denominator is zero or negative; the engine cannot compute
    /// proportional shifts from such a baseline.
    pub fn from_dataset(ds: &Dataset) -> Result<Self, ModelError> {
        let private_pkt_total: f64 = Mode::PRIVATE.iter().map(|&m| ds.baseline.pkt[m]).sum();
        let private_pkt_excl_cycling: f64 = Mode::PRIVATE
            .iter()
            .filter(|&&m| m != Mode::Cycling)
            .map(|&m| ds.baseline.pkt[m])
            .sum();
        let light_vkt_2018 =
            ds.observed.vkt[Mode::PassengerLight] + ds.observed.vkt[Mode::ElectricLight];

        if private_pkt_total <= 0.0 {
            return Err(ModelError::DegenerateBaseline(
                "total private/active pkt in the 2030 baseline must be > 0".into(),
            ));
        }
        if private_pkt_excl_cycling <= 0.0 {
            return Err(ModelError::DegenerateBaseline(
                "private/active pkt excluding cycling in the 2030 baseline must be > 0".into(),
            ));
        }
        if light_vkt_2018 <= 0.0 {
            return Err(ModelError::DegenerateBaseline(
                "2018 light-vehicle vkt must be > 0".into(),
            ));
        }

        Ok(Self {
            pkt_annualisation: PKT_ANNUALISATION,
            vkt_annualisation: VKT_ANNUALISATION,
            car_occupancy: CAR_OCCUPANCY,
            bus_lifespan_years: BUS_LIFESPAN_YEARS,
            car_ownership_2018: CAR_OWNERSHIP_2018,
            private_pkt_total,
            private_pkt_excl_cycling,
            cars_per_light_vkt: CAR_OWNERSHIP_2018 / light_vkt_2018,
        })
    }
}
