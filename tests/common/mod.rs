//! Shared test fixtures for integration tests.

use modeshift::model::{Dataset, DerivedConstants, EmissionFactors, Mode, ModeVec};
use modeshift::projects::{ProjectDescriptor, ProjectEffectTable};

/// Relative tolerance for floating-point comparisons.
pub const TOL: f64 = 1e-6;

/// Asserts two values agree within a relative tolerance.
pub fn assert_close(actual: f64, expected: f64, context: &str) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= TOL * scale,
        "{context}: got {actual}, expected {expected}"
    );
}

/// Default emission factors: identical baseline and scenario rows.
pub fn default_factors() -> EmissionFactors {
    let mut observed = ModeVec::ZERO;
    observed[Mode::PassengerLight] = 0.240;
    observed[Mode::ElectricLight] = 0.035;
    observed[Mode::DieselBus] = 1.350;
    observed[Mode::ElectricBus] = 0.210;
    observed[Mode::HeavyRail] = 1.800;
    observed[Mode::LightRail] = 0.900;

    let mut projected = ModeVec::ZERO;
    projected[Mode::PassengerLight] = 0.225;
    projected[Mode::ElectricLight] = 0.030;
    projected[Mode::DieselBus] = 1.300;
    projected[Mode::ElectricBus] = 0.180;
    projected[Mode::HeavyRail] = 1.500;
    projected[Mode::LightRail] = 0.110;

    EmissionFactors {
        observed,
        baseline: projected,
        scenario: projected,
    }
}

/// Default dataset: private baseline pkt totals 100_000 (60/20/15/5
/// split), diesel-bus baseline pkt exactly 100_000, and light-vehicle
/// vkt consistent with occupancy 1.58.
pub fn default_dataset() -> Dataset {
    let mut pkt = ModeVec::ZERO;
    pkt[Mode::PassengerLight] = 60_000.0;
    pkt[Mode::ElectricLight] = 20_000.0;
    pkt[Mode::Walking] = 15_000.0;
    pkt[Mode::Cycling] = 5_000.0;
    pkt[Mode::DieselBus] = 100_000.0;
    pkt[Mode::ElectricBus] = 2_000.0;
    pkt[Mode::HeavyRail] = 30_000.0;

    let vkt = ModeVec::from_fn(|m| {
        if m.is_light_vehicle() {
            pkt[m] / 1.58
        } else if m.is_transit() {
            pkt[m] / 10.0
        } else {
            pkt[m]
        }
    });

    Dataset::from_rows(pkt, vkt, pkt, vkt, pkt, vkt, &default_factors())
}

/// Derived constants for the default dataset.
pub fn default_constants(ds: &Dataset) -> DerivedConstants {
    DerivedConstants::from_dataset(ds).expect("default baseline is well-formed")
}

/// Two candidate projects: one heavy-rail, one busway.
pub fn default_descriptors() -> Vec<ProjectDescriptor> {
    vec![
        ProjectDescriptor {
            id: "CityRail".to_string(),
            primary_mode: Mode::HeavyRail,
            peak_freq: 5.0,
            off_peak_freq: 10.0,
            vehicle_capacity: 750.0,
            distance: 3.5,
            num_peak_hrs: 6.0,
            num_hours: 18.0,
        },
        ProjectDescriptor {
            id: "EastBusway".to_string(),
            primary_mode: Mode::DieselBus,
            peak_freq: 4.0,
            off_peak_freq: 8.0,
            vehicle_capacity: 90.0,
            distance: 7.0,
            num_peak_hrs: 6.0,
            num_hours: 18.0,
        },
    ]
}

/// Project effect table for the default dataset and descriptors.
pub fn default_effects(ds: &Dataset, k: &DerivedConstants) -> ProjectEffectTable {
    ProjectEffectTable::compute(&default_descriptors(), ds, k)
        .expect("default descriptors are valid")
}
