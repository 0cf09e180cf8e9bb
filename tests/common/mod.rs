//! Shared test fixtures for integration tests.

use dc_plan::catalog::Technology;
use dc_plan::plan::inputs::{PlanningInputs, SizingBasis, SizingMode};
use dc_plan::plan::portfolio::{
    AccreditationParams, GreedyParams, MixInput, MixRow, ShareVector,
};
use dc_plan::report::PlanReport;

/// Default planning inputs (500-acre parcel, 120 MW IT target).
pub fn default_inputs() -> PlanningInputs {
    PlanningInputs::default()
}

/// Planning inputs sized directly on IT load with an explicit target.
pub fn it_basis_inputs(target_mw: f64) -> PlanningInputs {
    PlanningInputs {
        sizing_mode: SizingMode::TargetIt,
        target_it_mw: target_mw,
        sizing_basis: SizingBasis::ItLoad,
        ..PlanningInputs::default()
    }
}

/// Grid-leaning share mix (70% grid, 30% gas turbine, 20% PV add-on).
pub fn default_share_mix() -> MixInput {
    MixInput::Shares(
        ShareVector::zero()
            .with(Technology::Grid, 70.0)
            .with(Technology::GasTurbine, 30.0)
            .with(Technology::SolarPv, 20.0),
    )
}

/// Manual mix with explicit thermal units and a battery add-on.
pub fn default_manual_mix() -> MixInput {
    MixInput::Manual(vec![
        MixRow::for_technology(Technology::Grid).with_units(2),
        MixRow::for_technology(Technology::GasTurbine).with_units(2),
        MixRow::for_technology(Technology::Battery).with_units(4),
    ])
}

/// Accreditation disabled entirely.
pub fn no_accreditation() -> AccreditationParams {
    AccreditationParams {
        enabled: false,
        ..AccreditationParams::default()
    }
}

/// Runs the full pipeline with default accreditation and greedy tuning.
pub fn compute(inputs: &PlanningInputs, mix: &MixInput) -> PlanReport {
    PlanReport::compute(
        inputs,
        mix,
        &AccreditationParams::default(),
        &GreedyParams::default(),
    )
}
