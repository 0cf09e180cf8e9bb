//! Integration tests comparing portfolio strategies against each other.

mod common;

use dc_plan::catalog::Technology;
use dc_plan::plan::portfolio::{
    AccreditationParams, GreedyParams, MixInput, MixRow, ShareVector,
};
use dc_plan::report::PlanReport;

/// Share-mode plan at a given firm split.
fn share_plan(required_it_mw: f64, grid_pct: f64, gt_pct: f64) -> PlanReport {
    let mix = MixInput::Shares(
        ShareVector::zero()
            .with(Technology::Grid, grid_pct)
            .with(Technology::GasTurbine, gt_pct),
    );
    common::compute(&common::it_basis_inputs(required_it_mw), &mix)
}

#[test]
fn share_strategy_always_covers_the_target() {
    for target in [10.0, 85.0, 240.0, 615.0] {
        let report = share_plan(target, 60.0, 40.0);
        assert!(
            report.sizing.meets_target,
            "share strategy should converge at {target} MW"
        );
        assert!(
            report.sizing.firm_after_loss_mw + report.sizing.accredited_mw
                >= report.sizing.required_mw - 1e-9
        );
    }
}

#[test]
fn manual_strategy_can_fall_short_where_shares_cannot() {
    let manual = MixInput::Manual(vec![
        MixRow::for_technology(Technology::GasTurbine).with_units(1),
    ]);
    let report = common::compute(&common::it_basis_inputs(200.0), &manual);
    // One 50 MW turbine against a 200 MW target: verdict only, no top-up.
    assert!(!report.sizing.meets_target);
    assert_eq!(report.sizing.capacities[0].units, 1);
}

#[test]
fn matching_manual_fleet_reproduces_share_verdict() {
    let share = share_plan(150.0, 100.0, 0.0);
    let grid_units = share.sizing.capacities[Technology::Grid.index()].units;

    let manual = MixInput::Manual(vec![
        MixRow::for_technology(Technology::Grid).with_units(grid_units),
    ]);
    let report = common::compute(&common::it_basis_inputs(150.0), &manual);
    assert!(report.sizing.meets_target);
    assert_eq!(report.sizing.firm_after_loss_mw, share.sizing.firm_after_loss_mw);
}

#[test]
fn smaller_units_win_under_heavy_size_penalty() {
    // Grid (100 MW) and recip engines (18 MW) split evenly; with a large
    // penalty the augmentation loop should prefer the small units.
    let mix = MixInput::Shares(
        ShareVector::zero()
            .with(Technology::Grid, 50.0)
            .with(Technology::ReciprocatingEngine, 50.0),
    );
    let inputs = common::it_basis_inputs(300.0);

    let light = PlanReport::compute(
        &inputs,
        &mix,
        &common::no_accreditation(),
        &GreedyParams {
            unit_size_penalty: 0.0,
            ..GreedyParams::default()
        },
    );
    let heavy = PlanReport::compute(
        &inputs,
        &mix,
        &common::no_accreditation(),
        &GreedyParams {
            unit_size_penalty: 5.0,
            ..GreedyParams::default()
        },
    );

    assert!(light.sizing.meets_target);
    assert!(heavy.sizing.meets_target);
    let recip_light = light.sizing.capacities[Technology::ReciprocatingEngine.index()].units;
    let recip_heavy = heavy.sizing.capacities[Technology::ReciprocatingEngine.index()].units;
    assert!(
        recip_heavy >= recip_light,
        "heavier penalty should not shift units toward the larger technology"
    );
}

#[test]
fn accreditation_reduces_required_firm_capacity() {
    let mix = MixInput::Manual(vec![
        MixRow::for_technology(Technology::GasTurbine).with_units(5),
        MixRow::for_technology(Technology::SolarPv).with_units(30),
        MixRow::for_technology(Technology::Battery).with_units(10),
    ]);
    let inputs = common::it_basis_inputs(220.0);

    let with = PlanReport::compute(
        &inputs,
        &mix,
        &AccreditationParams::default(),
        &GreedyParams::default(),
    );
    let without = PlanReport::compute(
        &inputs,
        &mix,
        &common::no_accreditation(),
        &GreedyParams::default(),
    );

    assert!(with.sizing.accredited_mw > 0.0);
    assert_eq!(without.sizing.accredited_mw, 0.0);
    // Same fleet, so only the verdict inputs differ.
    assert_eq!(with.sizing.firm_after_loss_mw, without.sizing.firm_after_loss_mw);
}

#[test]
fn off_grid_share_plan_builds_a_thermal_fleet() {
    let mix = MixInput::Shares(
        ShareVector::zero()
            .with(Technology::GasTurbine, 50.0)
            .with(Technology::ReciprocatingEngine, 30.0)
            .with(Technology::FuelCell, 20.0),
    );
    let report = common::compute(&common::it_basis_inputs(120.0), &mix);

    assert!(report.sizing.meets_target);
    assert_eq!(report.sizing.capacities[Technology::Grid.index()].units, 0);
    assert!(report.derived.gas_mscf_per_hr > 0.0, "thermal fleet burns gas");
}

#[test]
fn non_firm_shares_never_affect_firm_sizing() {
    let plain = share_plan(180.0, 70.0, 30.0);

    let with_pv = MixInput::Shares(
        ShareVector::zero()
            .with(Technology::Grid, 70.0)
            .with(Technology::GasTurbine, 30.0)
            .with(Technology::SolarPv, 60.0)
            .with(Technology::Wind, 25.0),
    );
    let report = common::compute(&common::it_basis_inputs(180.0), &with_pv);

    for tech in [
        Technology::Grid,
        Technology::GasTurbine,
        Technology::ReciprocatingEngine,
        Technology::FuelCell,
    ] {
        assert_eq!(
            report.sizing.capacities[tech.index()].units,
            plain.sizing.capacities[tech.index()].units,
            "{tech:?} firm count should be unchanged by non-firm shares"
        );
    }
}
