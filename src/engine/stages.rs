//! Ordered transformation stages over the scenario table.
//!
//! Each stage is a pure function taking the dataset by value and
//! returning the updated value; only the scenario table is written.
//! Stage order matters: each stage reads the cumulative scenario state
//! left by its predecessors, the occupancy override must follow every
//! pkt-affecting stage, and emissions are computed last. Every stage is
//! a no-op at its disabled lever value.

use crate::model::constants::{ELECTRIFICATION_REFERENCE_YEAR, SCENARIO_YEAR};
use crate::model::{Dataset, DerivedConstants, EmissionFactors, Mode};
use crate::projects::ProjectEffect;

/// Stage 1: adds the combined effect of the selected transit projects to
/// the scenario pkt and vkt rows.
pub fn apply_transit_projects(mut ds: Dataset, effect: &ProjectEffect) -> Dataset {
    for m in Mode::ALL {
        ds.scenario.pkt[m] += effect.pkt[m];
        ds.scenario.vkt[m] += effect.vkt[m];
    }
    ds
}

/// Stage 2: shifts travel onto diesel buses for a proportional ridership
/// `increase` over the 2030-baseline bus pkt.
///
/// Each private/active mode donates in proportion to its baseline share
/// of private pkt; light-vehicle vkt follows via occupancy, walking and
/// cycling 1:1.
pub fn apply_bus_ridership(mut ds: Dataset, k: &DerivedConstants, increase: f64) -> Dataset {
    if increase <= 0.0 {
        return ds;
    }
    let shift = ds.baseline.pkt[Mode::DieselBus] * increase;
    ds.scenario.pkt[Mode::DieselBus] += shift;

    for m in Mode::PRIVATE {
        let draw = -(ds.baseline.pkt[m] / k.private_pkt_total) * shift;
        ds.scenario.pkt[m] += draw;
        ds.scenario.vkt[m] += if m.is_light_vehicle() {
            draw / k.car_occupancy
        } else {
            draw
        };
    }
    ds
}

/// Stage 3: raises cycling to a `target` mode-share index, where 1 is
/// the baseline share and values of 0 or below disable the stage.
///
/// The absolute increase `(target - 1) * baseline cycling pkt` lands on
/// cycling pkt and vkt 1:1; every other private/active mode donates in
/// proportion to its share of private pkt excluding cycling (cycling is
/// not a donor to itself, hence the separate denominator).
pub fn apply_cycling_uptake(mut ds: Dataset, k: &DerivedConstants, target: f64) -> Dataset {
    if target <= 0.0 {
        return ds;
    }
    let shift = ds.baseline.pkt[Mode::Cycling] * (target - 1.0);
    ds.scenario.pkt[Mode::Cycling] += shift;
    ds.scenario.vkt[Mode::Cycling] += shift;

    for m in Mode::PRIVATE {
        if m == Mode::Cycling {
            continue;
        }
        let draw = -(ds.baseline.pkt[m] / k.private_pkt_excl_cycling) * shift;
        ds.scenario.pkt[m] += draw;
        ds.scenario.vkt[m] += if m.is_light_vehicle() {
            draw / k.car_occupancy
        } else {
            draw
        };
    }
    ds
}

/// Stage 4: relabels part of the diesel-bus fleet as electric, for
/// electrification starting in `start_year` (0 disables the stage).
///
/// The shifted fraction is the share of the fleet's service lifespan
/// remaining by the scenario year. Total bus pkt and vkt are conserved;
/// only the mode label changes.
pub fn apply_bus_electrification(mut ds: Dataset, k: &DerivedConstants, start_year: u32) -> Dataset {
    if start_year <= ELECTRIFICATION_REFERENCE_YEAR {
        return ds;
    }
    let prop = f64::from(SCENARIO_YEAR.saturating_sub(start_year)) / k.bus_lifespan_years;

    let pkt_shift = ds.scenario.pkt[Mode::DieselBus] * prop;
    ds.scenario.pkt[Mode::DieselBus] -= pkt_shift;
    ds.scenario.pkt[Mode::ElectricBus] += pkt_shift;

    let vkt_shift = ds.scenario.vkt[Mode::DieselBus] * prop;
    ds.scenario.vkt[Mode::DieselBus] -= vkt_shift;
    ds.scenario.vkt[Mode::ElectricBus] += vkt_shift;
    ds
}

/// Stage 5: shifts a `fraction` in [0, 1] of scenario petrol/diesel-car
/// travel onto electric cars. Total light-vehicle pkt and vkt conserved.
pub fn apply_car_electrification(mut ds: Dataset, fraction: f64) -> Dataset {
    if fraction <= 0.0 {
        return ds;
    }
    let pkt_shift = ds.scenario.pkt[Mode::PassengerLight] * fraction;
    ds.scenario.pkt[Mode::PassengerLight] -= pkt_shift;
    ds.scenario.pkt[Mode::ElectricLight] += pkt_shift;

    let vkt_shift = ds.scenario.vkt[Mode::PassengerLight] * fraction;
    ds.scenario.vkt[Mode::PassengerLight] -= vkt_shift;
    ds.scenario.vkt[Mode::ElectricLight] += vkt_shift;
    ds
}

/// Stage 6: scales scenario pkt for every mode down by `percent` of
/// trips not taken.
///
/// Walking and cycling vkt follow pkt 1:1 and light-vehicle vkt is
/// recomputed from pkt via baseline occupancy. Transit vkt is left
/// unchanged: timetabled service does not shrink with ridership.
pub fn apply_trip_reduction(mut ds: Dataset, k: &DerivedConstants, percent: f64) -> Dataset {
    if percent <= 0.0 {
        return ds;
    }
    let kept = 1.0 - percent / 100.0;
    for m in Mode::ALL {
        ds.scenario.pkt[m] *= kept;
        if m.is_light_vehicle() {
            ds.scenario.vkt[m] = ds.scenario.pkt[m] / k.car_occupancy;
        } else if matches!(m, Mode::Walking | Mode::Cycling) {
            ds.scenario.vkt[m] = ds.scenario.pkt[m];
        }
    }
    ds
}

/// Stage 7: overwrites light-vehicle vkt from scenario pkt at the given
/// `occupancy`, when set.
///
/// This stage is an override, not an increment: whatever vkt the earlier
/// stages left behind is replaced, which is why it must run after every
/// pkt-affecting stage.
pub fn apply_occupancy_override(mut ds: Dataset, occupancy: Option<f64>) -> Dataset {
    let Some(o) = occupancy else {
        return ds;
    };
    if o <= 0.0 {
        return ds;
    }
    ds.scenario.vkt[Mode::PassengerLight] = ds.scenario.pkt[Mode::PassengerLight] / o;
    ds.scenario.vkt[Mode::ElectricLight] = ds.scenario.pkt[Mode::ElectricLight] / o;
    ds
}

/// Stage 8: recomputes scenario emissions for every mode from the
/// scenario factors and final vkt, then applies the emission-standard
/// `improvement` to petrol/diesel cars only. Must run last.
pub fn compute_emissions(
    mut ds: Dataset,
    factors: &EmissionFactors,
    improvement: f64,
) -> Dataset {
    for m in Mode::ALL {
        ds.scenario.emissions[m] = factors.scenario[m] * ds.scenario.vkt[m];
    }
    ds.scenario.emissions[Mode::PassengerLight] *= 1.0 - improvement;
    ds
}
