//! API response and query types.
//!
//! Field names follow the CSV schema v1 conventions for consistency
//! across export formats.

use serde::{Deserialize, Serialize};

use crate::catalog::{Technology, spec_for};
use crate::report::PlanReport;

/// Headline figures for dashboards and quick checks.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Generation MW the portfolio was sized against.
    pub required_mw: f64,
    /// Effective IT target (MW).
    pub it_mw: f64,
    /// Whether the parcel supports the IT target.
    pub feasible: bool,
    /// Contingency order k of the selected tier.
    pub contingency_order: usize,
    /// Installed firm capacity (MW).
    pub firm_installed_mw: f64,
    /// Firm capacity surviving the worst-case N+k loss (MW).
    pub firm_after_loss_mw: f64,
    /// Accredited non-firm contribution (MW).
    pub accredited_mw: f64,
    /// Whether the reliability target is met.
    pub meets_target: bool,
    /// Natural gas flow (MSCF/hr).
    pub gas_mscf_per_hr: f64,
    /// Generation plus cooling water (gpm).
    pub total_water_gpm: f64,
    /// Generation land footprint (acres).
    pub generation_land_acres: f64,
}

impl From<&PlanReport> for SummaryResponse {
    fn from(r: &PlanReport) -> Self {
        Self {
            required_mw: r.sizing.required_mw,
            it_mw: r.land.effective_it_target_mw,
            feasible: r.land.feasible,
            contingency_order: r.sizing.contingency_order,
            firm_installed_mw: r.sizing.firm_installed_mw,
            firm_after_loss_mw: r.sizing.firm_after_loss_mw,
            accredited_mw: r.sizing.accredited_mw,
            meets_target: r.sizing.meets_target,
            gas_mscf_per_hr: r.derived.gas_mscf_per_hr,
            total_water_gpm: r.derived.total_water_gpm,
            generation_land_acres: r.derived.generation_land_acres,
        }
    }
}

/// One catalog entry in API form.
#[derive(Debug, Serialize)]
pub struct TechnologyInfo {
    /// Technology display name.
    pub name: &'static str,
    /// Whether the technology counts toward firm capacity.
    pub firm: bool,
    /// Default unit size (MW).
    pub unit_mw: f64,
    /// Default availability factor.
    pub availability: f64,
    /// Default heat rate (Btu/kWh, 0 for non-thermal).
    pub heat_rate_btu_per_kwh: f64,
    /// Default water intensity (gal/MWh).
    pub water_gal_per_mwh: f64,
}

impl From<Technology> for TechnologyInfo {
    fn from(tech: Technology) -> Self {
        let spec = spec_for(tech);
        Self {
            name: tech.name(),
            firm: spec.firm,
            unit_mw: spec.unit_mw,
            availability: spec.availability,
            heat_rate_btu_per_kwh: spec.heat_rate_btu_per_kwh,
            water_gal_per_mwh: spec.water_gal_per_mwh,
        }
    }
}

/// Optional filter for the technologies endpoint.
#[derive(Debug, Deserialize)]
pub struct TechnologyQuery {
    /// When present, keep only entries with this firm flag.
    pub firm: Option<bool>,
}

/// Optional selector for the phases endpoint.
#[derive(Debug, Deserialize)]
pub struct PhaseQuery {
    /// Zero-based phase index; all phases when absent.
    pub index: Option<usize>,
}

/// One build phase in API form.
#[derive(Debug, Serialize)]
pub struct PhaseRecord {
    /// Zero-based phase index.
    pub index: usize,
    /// IT MW assigned to this phase.
    pub it_mw: f64,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
