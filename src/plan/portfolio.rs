//! Generation portfolio inputs: share sliders, manual unit rows,
//! accreditation parameters, and greedy-loop tuning.

use serde::Serialize;

use crate::catalog::{Technology, spec_for};

/// Requested percentage of required MW per technology.
///
/// Firm-technology percentages need not sum to 100; the sizing engine
/// renormalizes them by their sum. Non-firm percentages are independent
/// add-on fractions of required MW.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareVector {
    pct: [f64; Technology::ALL.len()],
}

impl Default for ShareVector {
    fn default() -> Self {
        Self::zero()
    }
}

impl ShareVector {
    /// All shares at 0%.
    pub fn zero() -> Self {
        Self {
            pct: [0.0; Technology::ALL.len()],
        }
    }

    /// Share percentage for one technology, clamped to 0–100.
    pub fn get(&self, technology: Technology) -> f64 {
        self.pct[technology.index()].clamp(0.0, 100.0)
    }

    /// Sets the share percentage for one technology.
    pub fn set(&mut self, technology: Technology, pct: f64) -> &mut Self {
        self.pct[technology.index()] = pct;
        self
    }

    /// Builder-style variant of [`ShareVector::set`].
    pub fn with(mut self, technology: Technology, pct: f64) -> Self {
        self.set(technology, pct);
        self
    }

    /// Sum of firm-technology shares after clamping.
    pub fn firm_sum(&self) -> f64 {
        Technology::ALL
            .iter()
            .filter(|t| spec_for(**t).firm)
            .map(|t| self.get(*t))
            .sum()
    }
}

/// A user-declared group of identical units of one technology.
///
/// Defaults are copied from the catalog on construction; each field can be
/// overridden independently afterwards. Rows have no identity beyond the
/// current calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixRow {
    /// Technology of every unit in this row.
    pub technology: Technology,
    /// Number of identical physical units.
    pub units: u32,
    /// Size of one unit (MW).
    pub unit_mw: f64,
    /// Unit availability factor.
    pub availability: f64,
    /// Heat rate (Btu/kWh, 0 for non-thermal).
    pub heat_rate_btu_per_kwh: f64,
    /// Water intensity (gal/MWh).
    pub water_gal_per_mwh: f64,
}

impl MixRow {
    /// New row with catalog defaults for the technology and zero units.
    pub fn for_technology(technology: Technology) -> Self {
        let spec = spec_for(technology);
        Self {
            technology,
            units: 0,
            unit_mw: spec.unit_mw,
            availability: spec.availability,
            heat_rate_btu_per_kwh: spec.heat_rate_btu_per_kwh,
            water_gal_per_mwh: spec.water_gal_per_mwh,
        }
    }

    /// Builder-style unit count.
    pub fn with_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Builder-style unit size override.
    pub fn with_unit_mw(mut self, unit_mw: f64) -> Self {
        self.unit_mw = unit_mw;
        self
    }
}

/// Which portfolio strategy feeds the sizing engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MixInput {
    /// Share-based optimizer: percentages of required MW.
    Shares(ShareVector),
    /// Manual strategy: explicit unit counts.
    Manual(Vec<MixRow>),
}

/// Reference storage duration against which battery ELCC is accredited.
pub const BESS_REFERENCE_HOURS: f64 = 4.0;

/// ELCC accreditation parameters for non-firm resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccreditationParams {
    /// When false, all accreditation is zeroed.
    pub enabled: bool,
    /// Solar PV ELCC (percent of nameplate, 0–100).
    pub pv_elcc_pct: f64,
    /// Wind ELCC (percent of nameplate, 0–100).
    pub wind_elcc_pct: f64,
    /// Battery ELCC at the reference duration (percent, 0–100).
    pub bess_elcc_pct: f64,
    /// Battery storage duration (hours); credit scales by
    /// `clamp(hours / 4, 0, 1)`.
    pub bess_duration_hours: f64,
}

impl Default for AccreditationParams {
    fn default() -> Self {
        Self {
            enabled: true,
            pv_elcc_pct: 30.0,
            wind_elcc_pct: 15.0,
            bess_elcc_pct: 90.0,
            bess_duration_hours: 4.0,
        }
    }
}

impl AccreditationParams {
    /// Fraction of nameplate MW credited toward the reliability target.
    pub fn credit_fraction(&self, technology: Technology) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        match technology {
            Technology::SolarPv => self.pv_elcc_pct.clamp(0.0, 100.0) / 100.0,
            Technology::Wind => self.wind_elcc_pct.clamp(0.0, 100.0) / 100.0,
            Technology::Battery => {
                let duration_scale = (self.bess_duration_hours / BESS_REFERENCE_HOURS).clamp(0.0, 1.0);
                self.bess_elcc_pct.clamp(0.0, 100.0) / 100.0 * duration_scale
            }
            _ => 0.0,
        }
    }
}

/// Tuning knobs for the greedy augmentation loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreedyParams {
    /// Penalty applied per MW of unit size when scoring candidates.
    /// Discourages closing comparable shortfalls with the largest units.
    pub unit_size_penalty: f64,
    /// Hard iteration ceiling; the best state found so far is returned if
    /// the loop hits it without converging.
    pub max_iterations: usize,
}

impl Default for GreedyParams {
    fn default() -> Self {
        Self {
            unit_size_penalty: 0.1,
            max_iterations: 500,
        }
    }
}
