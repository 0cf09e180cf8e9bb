//! Canonical plan evaluation and console reporting.
//!
//! [`PlanReport::compute`] is the single engine entry every caller goes
//! through: land allocation, reliability sizing, then derived draws. UI
//! variants and export paths all consume this one result, so land-limit
//! and PUE policies cannot drift between surfaces.

use std::fmt;

use serde::Serialize;

use crate::plan::derived::{DerivedResult, derive};
use crate::plan::inputs::PlanningInputs;
use crate::plan::land::{LandResult, allocate};
use crate::plan::portfolio::{AccreditationParams, GreedyParams, MixInput};
use crate::plan::reliability::{SizingResult, size_from_mix, size_from_shares};

/// Complete output of one planning calculation.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    /// Land/IT allocation stage.
    pub land: LandResult,
    /// Reliability-sizing stage.
    pub sizing: SizingResult,
    /// Fuel, water, and land draws.
    pub derived: DerivedResult,
}

impl PlanReport {
    /// Runs the full pipeline for one scenario.
    ///
    /// The required generation MW is the effective IT target, times PUE
    /// when the sizing basis is facility load — applied exactly once here.
    /// The target is deliberately not capped by land-limited IT MW:
    /// infeasibility surfaces through [`LandResult::feasible`], never by
    /// silently shrinking the portfolio.
    pub fn compute(
        inputs: &PlanningInputs,
        mix: &MixInput,
        accreditation: &AccreditationParams,
        greedy: &GreedyParams,
    ) -> Self {
        let land = allocate(inputs);
        let required_mw = inputs.required_mw(land.effective_it_target_mw);

        let sizing = match mix {
            MixInput::Shares(shares) => {
                size_from_shares(required_mw, shares, inputs.tier, accreditation, greedy)
            }
            MixInput::Manual(rows) => size_from_mix(required_mw, rows, inputs.tier, accreditation),
        };

        let derived = derive(&sizing, &land, accreditation.bess_duration_hours);

        Self {
            land,
            sizing,
            derived,
        }
    }
}

impl fmt::Display for PlanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let land = &self.land;
        let sizing = &self.sizing;
        let derived = &self.derived;

        writeln!(f, "--- Land / IT ---")?;
        writeln!(f, "Buildable land:        {:.1} ac", land.buildable_acres)?;
        writeln!(
            f,
            "Building footprint:    {:.1} ac ({:.0} ft² over {} phase(s))",
            land.building_footprint_acres,
            land.building_sqft,
            land.phase_mw.len()
        )?;
        writeln!(
            f,
            "Racks / IT from land:  {} racks, {:.2} MW",
            land.racks, land.it_mw_from_land
        )?;
        writeln!(
            f,
            "Effective IT target:   {:.2} MW ({})",
            land.effective_it_target_mw,
            if land.feasible { "feasible" } else { "INFEASIBLE" }
        )?;
        writeln!(f, "Open land remaining:   {:.1} ac", land.open_acres)?;

        writeln!(f, "--- Generation (N+{}) ---", sizing.contingency_order)?;
        writeln!(f, "Required:              {:.2} MW", sizing.required_mw)?;
        for cap in &sizing.capacities {
            if cap.units == 0 && cap.installed_mw == 0.0 {
                continue;
            }
            writeln!(
                f,
                "  {:<13} {:>4} x {:>6.1} MW = {:>8.1} MW installed, {:>8.1} MW dispatched",
                cap.technology.name(),
                cap.units,
                cap.unit_mw,
                cap.installed_mw,
                cap.dispatched_mw
            )?;
        }
        writeln!(
            f,
            "Firm after N+{} loss:   {:.2} MW (drops {:?})",
            sizing.contingency_order, sizing.firm_after_loss_mw, sizing.dropped_unit_mw
        )?;
        writeln!(f, "Accredited non-firm:   {:.2} MW", sizing.accredited_mw)?;
        writeln!(
            f,
            "Reliability target:    {}",
            if sizing.meets_target { "MET" } else { "NOT MET" }
        )?;

        writeln!(f, "--- Resources ---")?;
        writeln!(
            f,
            "Fuel / gas:            {:.1} MMBtu/hr, {:.1} MSCF/hr",
            derived.fuel_mmbtu_per_hr, derived.gas_mscf_per_hr
        )?;
        writeln!(
            f,
            "Water:                 {:.1} gpm ({:.1} generation + {:.1} cooling)",
            derived.total_water_gpm, derived.generation_water_gpm, derived.cooling_water_gpm
        )?;
        write!(
            f,
            "Generation land:       {:.1} ac",
            derived.generation_land_acres
        )
    }
}
