//! Derived quantities over the dispatch allocation: fuel burn, gas flow,
//! water draw, and per-technology land footprint.

use serde::Serialize;

use crate::catalog::{Footprint, FuelKind, spec_for};

use super::land::LandResult;
use super::reliability::SizingResult;

/// Higher heating value of pipeline natural gas (Btu per standard cubic foot).
pub const GAS_BTU_PER_SCF: f64 = 1037.0;

/// Resource draw and footprint for one sized technology row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechDraw {
    /// Technology of this row (parallel to the sizing row).
    pub technology: crate::catalog::Technology,
    /// Fuel burn at dispatched output (MMBtu per hour).
    pub fuel_mmbtu_per_hr: f64,
    /// Natural gas flow (thousand standard cubic feet per hour).
    pub gas_mscf_per_hr: f64,
    /// Generation water draw (gallons per minute).
    pub water_gpm: f64,
    /// Land consumed by this technology (acres).
    pub land_acres: f64,
}

/// Fuel, water, and land totals for a sized portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedResult {
    /// One row per sizing row, same order.
    pub rows: Vec<TechDraw>,
    /// Total fuel burn (MMBtu/hr).
    pub fuel_mmbtu_per_hr: f64,
    /// Total natural gas flow (MSCF/hr).
    pub gas_mscf_per_hr: f64,
    /// Total generation water draw (gpm).
    pub generation_water_gpm: f64,
    /// Data-center cooling water from the land stage (gpm).
    pub cooling_water_gpm: f64,
    /// Generation plus cooling water (gpm).
    pub total_water_gpm: f64,
    /// Total generation land footprint (acres).
    pub generation_land_acres: f64,
}

/// Land consumed by one sizing row under its catalog footprint rule.
fn land_acres(row: &crate::plan::reliability::TechCapacity, bess_duration_hours: f64) -> f64 {
    match spec_for(row.technology).footprint {
        Footprint::PerUnit(acres_per_unit) => f64::from(row.units) * acres_per_unit,
        Footprint::PerMw(acres_per_mw) => row.installed_mw * acres_per_mw,
        Footprint::PerMwHour {
            acres_per_mw_hour,
            overhead_acres,
        } => {
            if row.installed_mw > 0.0 {
                row.installed_mw * acres_per_mw_hour * bess_duration_hours.max(1.0) + overhead_acres
            } else {
                0.0
            }
        }
    }
}

/// Computes fuel, water, and land draws from a sized portfolio.
///
/// Fuel and water are charged against **dispatched** MW only; a technology
/// with no fuel or a zero heat rate burns nothing and draws no generation
/// water. Cooling water carries over from the land stage.
pub fn derive(
    sizing: &SizingResult,
    land: &LandResult,
    bess_duration_hours: f64,
) -> DerivedResult {
    let mut rows = Vec::with_capacity(sizing.capacities.len());
    let mut fuel_total = 0.0;
    let mut gas_total = 0.0;
    let mut water_total = 0.0;
    let mut land_total = 0.0;

    for cap in &sizing.capacities {
        let spec = spec_for(cap.technology);

        let burns_fuel = spec.fuel != FuelKind::None && cap.heat_rate_btu_per_kwh > 0.0;
        let fuel_mmbtu_per_hr = if burns_fuel {
            cap.dispatched_mw * 1000.0 * cap.heat_rate_btu_per_kwh / 1_000_000.0
        } else {
            0.0
        };
        let gas_mscf_per_hr = if burns_fuel && spec.fuel == FuelKind::NaturalGas {
            fuel_mmbtu_per_hr * 1_000_000.0 / GAS_BTU_PER_SCF / 1000.0
        } else {
            0.0
        };
        // Water is skipped under the same condition as fuel: fuel-free
        // technologies draw no generation water even with an intensity
        // override on the row.
        let water_gpm = if burns_fuel {
            cap.water_gal_per_mwh * cap.dispatched_mw / 60.0
        } else {
            0.0
        };
        let acres = land_acres(cap, bess_duration_hours);

        fuel_total += fuel_mmbtu_per_hr;
        gas_total += gas_mscf_per_hr;
        water_total += water_gpm;
        land_total += acres;

        rows.push(TechDraw {
            technology: cap.technology,
            fuel_mmbtu_per_hr,
            gas_mscf_per_hr,
            water_gpm,
            land_acres: acres,
        });
    }

    DerivedResult {
        rows,
        fuel_mmbtu_per_hr: fuel_total,
        gas_mscf_per_hr: gas_total,
        generation_water_gpm: water_total,
        cooling_water_gpm: land.cooling_water_gpm,
        total_water_gpm: water_total + land.cooling_water_gpm,
        generation_land_acres: land_total,
    }
}
