//! Integration tests for the all-levers-disabled baseline evaluation.

mod common;

use modeshift::config::LeverSettings;
use modeshift::engine::ScenarioEngine;
use modeshift::model::Mode;
use modeshift::summary::SummaryReport;

use common::assert_close;

#[test]
fn disabled_levers_reproduce_the_baseline() {
    let ds = common::default_dataset();
    let k = common::default_constants(&ds);
    let effects = common::default_effects(&ds, &k);
    let factors = common::default_factors();
    let engine = ScenarioEngine::new(&ds, &k, &effects, &factors);

    let out = engine
        .evaluate(&LeverSettings::baseline())
        .expect("baseline levers are valid");

    for m in Mode::ALL {
        assert_close(
            out.scenario.pkt[m],
            ds.baseline.pkt[m],
            &format!("{m} pkt"),
        );
        assert_close(
            out.scenario.vkt[m],
            ds.baseline.vkt[m],
            &format!("{m} vkt"),
        );
    }
}

#[test]
fn disabled_levers_reproduce_baseline_factor_emissions() {
    let ds = common::default_dataset();
    let k = common::default_constants(&ds);
    let effects = common::default_effects(&ds, &k);
    let factors = common::default_factors();
    let engine = ScenarioEngine::new(&ds, &k, &effects, &factors);

    let out = engine
        .evaluate(&LeverSettings::baseline())
        .expect("baseline levers are valid");

    for m in Mode::ALL {
        assert_close(
            out.scenario.emissions[m],
            factors.baseline[m] * ds.baseline.vkt[m],
            &format!("{m} emissions"),
        );
    }
}

#[test]
fn repeated_evaluation_is_deterministic() {
    let ds = common::default_dataset();
    let k = common::default_constants(&ds);
    let effects = common::default_effects(&ds, &k);
    let factors = common::default_factors();
    let engine = ScenarioEngine::new(&ds, &k, &effects, &factors);

    let mut levers = LeverSettings::baseline();
    levers.transit.projects = vec!["CityRail".to_string()];
    levers.bus.ridership_increase = 0.4;
    levers.cycling.mode_share = 5.0;
    levers.bus.electrification_year = 2025;
    levers.car.electrification = 0.2;
    levers.trips.reduction_pct = 10.0;
    levers.car.occupancy = Some(1.7);
    levers.car.emission_improvement = 0.1;
    let a = engine.evaluate(&levers).expect("levers are valid");
    let b = engine.evaluate(&levers).expect("levers are valid");
    assert_eq!(a, b);
}

#[test]
fn summary_matches_per_mode_totals() {
    let ds = common::default_dataset();
    let k = common::default_constants(&ds);
    let effects = common::default_effects(&ds, &k);
    let factors = common::default_factors();
    let engine = ScenarioEngine::new(&ds, &k, &effects, &factors);

    let out = engine
        .evaluate(&LeverSettings::baseline())
        .expect("baseline levers are valid");
    let report = SummaryReport::from_dataset(&out, &k);

    assert_close(
        report.emissions_mt_scenario * 1.0e9,
        out.scenario.emissions.total(),
        "summary total",
    );
    assert_close(
        report.cars_scenario,
        report.cars_baseline,
        "no lever moves the car estimate",
    );
}
