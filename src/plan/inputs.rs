//! Planning input record and its clamping rules.
//!
//! The engine never rejects out-of-range numbers. Every numeric field is
//! pulled back into its valid domain by [`PlanningInputs::clamped`] before
//! use, so a nonsensical upstream value degrades to a zero-capacity plan
//! instead of an error.

use serde::Serialize;

/// Smallest accepted rack footprint (ft²). Guards the floor division in the
/// land allocator against a zero denominator.
pub const MIN_AREA_PER_RACK_SQFT: f64 = 1.0;

/// Smallest accepted per-rack power draw (kW).
pub const MIN_POWER_PER_RACK_KW: f64 = 0.05;

/// How the achievable IT target is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizingMode {
    /// Size to a user-requested IT MW target.
    TargetIt,
    /// Size to the maximum IT MW the parcel supports.
    MaxFromLand,
}

/// Whether generation is sized to IT load or total facility load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizingBasis {
    /// Required MW equals the effective IT target.
    ItLoad,
    /// Required MW equals the effective IT target times PUE.
    FacilityLoad,
}

/// Data-hall cooling approach. Drives the default water-use effectiveness
/// in the configuration layer; the engine consumes the WUE number directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoolingMode {
    /// Air-cooled with dry coolers.
    Air,
    /// Evaporative cooling towers.
    Evaporative,
    /// Direct-to-chip liquid cooling.
    Liquid,
}

impl CoolingMode {
    /// Typical water-use effectiveness (liters per kWh of IT energy).
    pub fn default_wue(self) -> f64 {
        match self {
            CoolingMode::Air => 0.1,
            CoolingMode::Evaporative => 1.8,
            CoolingMode::Liquid => 0.4,
        }
    }
}

/// Discrete N+k reliability target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReliabilityTier {
    /// 99.9% — survives loss of the single largest firm unit.
    ThreeNines,
    /// 99.99% — survives loss of the two largest firm units.
    FourNines,
    /// 99.999% — survives loss of the three largest firm units.
    FiveNines,
}

impl ReliabilityTier {
    /// Number of largest firm units assumed to fail simultaneously.
    pub fn contingency_order(self) -> usize {
        match self {
            ReliabilityTier::ThreeNines => 1,
            ReliabilityTier::FourNines => 2,
            ReliabilityTier::FiveNines => 3,
        }
    }
}

/// Immutable inputs for one planning calculation.
///
/// Construct with struct syntax (or from the configuration layer) and pass
/// by reference; the engine re-clamps every field itself.
#[derive(Debug, Clone, Serialize)]
pub struct PlanningInputs {
    /// Gross parcel area (acres).
    pub parcel_acres: f64,
    /// Fraction of the parcel that is developable (0.0 to 1.0).
    pub buildable_fraction: f64,
    /// Building footprint as a fraction of buildable land (0.0 to 1.0).
    pub site_coverage_fraction: f64,
    /// Number of data-hall floors (>= 1).
    pub stories: u32,
    /// Fraction of building area lost to support space (0.0 to 0.95).
    pub support_space_fraction: f64,
    /// MEP yard as a fraction of buildable land (0.0 to 1.0).
    pub mep_yard_fraction: f64,
    /// Internal roads as a fraction of buildable land (0.0 to 1.0).
    pub roads_fraction: f64,
    /// Fixed substation allocation (acres).
    pub substation_acres: f64,
    /// White space consumed per rack (ft², >= 1).
    pub area_per_rack_sqft: f64,
    /// IT power per rack (kW, >= 0.05).
    pub power_per_rack_kw: f64,
    /// Data-hall cooling approach.
    pub cooling: CoolingMode,
    /// Power usage effectiveness (>= 1.0).
    pub pue: f64,
    /// Water usage effectiveness (liters per kWh of IT energy, >= 0).
    pub wue: f64,
    /// Target selection mode.
    pub sizing_mode: SizingMode,
    /// Requested IT load in target mode (MW, >= 0).
    pub target_it_mw: f64,
    /// Number of build phases (>= 1).
    pub phases: u32,
    /// When true, the effective target is split evenly across phases.
    pub equalize_phases: bool,
    /// Per-phase IT MW when not equalized; truncated or zero-padded to
    /// `phases` entries, each clamped to >= 0.
    pub phase_targets_mw: Vec<f64>,
    /// Reliability target for generation sizing.
    pub tier: ReliabilityTier,
    /// Whether generation covers IT load or full facility load.
    pub sizing_basis: SizingBasis,
}

impl Default for PlanningInputs {
    fn default() -> Self {
        Self {
            parcel_acres: 500.0,
            buildable_fraction: 0.6,
            site_coverage_fraction: 0.35,
            stories: 1,
            support_space_fraction: 0.3,
            mep_yard_fraction: 0.08,
            roads_fraction: 0.07,
            substation_acres: 10.0,
            area_per_rack_sqft: 60.0,
            power_per_rack_kw: 12.0,
            cooling: CoolingMode::Evaporative,
            pue: 1.25,
            wue: CoolingMode::Evaporative.default_wue(),
            sizing_mode: SizingMode::TargetIt,
            target_it_mw: 120.0,
            phases: 1,
            equalize_phases: true,
            phase_targets_mw: Vec::new(),
            tier: ReliabilityTier::FourNines,
            sizing_basis: SizingBasis::FacilityLoad,
        }
    }
}

impl PlanningInputs {
    /// Returns a copy with every numeric field clamped to its valid domain.
    pub fn clamped(&self) -> Self {
        let mut c = self.clone();
        c.parcel_acres = c.parcel_acres.max(0.0);
        c.buildable_fraction = c.buildable_fraction.clamp(0.0, 1.0);
        c.site_coverage_fraction = c.site_coverage_fraction.clamp(0.0, 1.0);
        c.stories = c.stories.max(1);
        c.support_space_fraction = c.support_space_fraction.clamp(0.0, 0.95);
        c.mep_yard_fraction = c.mep_yard_fraction.clamp(0.0, 1.0);
        c.roads_fraction = c.roads_fraction.clamp(0.0, 1.0);
        c.substation_acres = c.substation_acres.max(0.0);
        c.area_per_rack_sqft = c.area_per_rack_sqft.max(MIN_AREA_PER_RACK_SQFT);
        c.power_per_rack_kw = c.power_per_rack_kw.max(MIN_POWER_PER_RACK_KW);
        c.pue = c.pue.max(1.0);
        c.wue = c.wue.max(0.0);
        c.target_it_mw = c.target_it_mw.max(0.0);
        c.phases = c.phases.max(1);
        for p in &mut c.phase_targets_mw {
            *p = p.max(0.0);
        }
        c
    }

    /// Required generation MW for a given effective IT target, applying the
    /// sizing basis exactly once.
    pub fn required_mw(&self, effective_it_mw: f64) -> f64 {
        match self.sizing_basis {
            SizingBasis::ItLoad => effective_it_mw.max(0.0),
            SizingBasis::FacilityLoad => effective_it_mw.max(0.0) * self.pue.max(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_pulls_fields_into_domain() {
        let raw = PlanningInputs {
            parcel_acres: -10.0,
            buildable_fraction: 1.7,
            site_coverage_fraction: -0.5,
            stories: 0,
            support_space_fraction: 0.99,
            mep_yard_fraction: 2.0,
            roads_fraction: -1.0,
            substation_acres: -5.0,
            area_per_rack_sqft: 0.0,
            power_per_rack_kw: -3.0,
            pue: 0.8,
            wue: -0.2,
            target_it_mw: -100.0,
            phases: 0,
            phase_targets_mw: vec![-4.0, 7.0],
            ..PlanningInputs::default()
        };
        let c = raw.clamped();
        assert_eq!(c.parcel_acres, 0.0);
        assert_eq!(c.buildable_fraction, 1.0);
        assert_eq!(c.site_coverage_fraction, 0.0);
        assert_eq!(c.stories, 1);
        assert_eq!(c.support_space_fraction, 0.95);
        assert_eq!(c.mep_yard_fraction, 1.0);
        assert_eq!(c.roads_fraction, 0.0);
        assert_eq!(c.substation_acres, 0.0);
        assert_eq!(c.area_per_rack_sqft, MIN_AREA_PER_RACK_SQFT);
        assert_eq!(c.power_per_rack_kw, MIN_POWER_PER_RACK_KW);
        assert_eq!(c.pue, 1.0);
        assert_eq!(c.wue, 0.0);
        assert_eq!(c.target_it_mw, 0.0);
        assert_eq!(c.phases, 1);
        assert_eq!(c.phase_targets_mw, vec![0.0, 7.0]);
    }

    #[test]
    fn clamping_is_idempotent() {
        let c = PlanningInputs::default().clamped();
        let cc = c.clamped();
        assert_eq!(format!("{c:?}"), format!("{cc:?}"));
    }

    #[test]
    fn tier_contingency_orders() {
        assert_eq!(ReliabilityTier::ThreeNines.contingency_order(), 1);
        assert_eq!(ReliabilityTier::FourNines.contingency_order(), 2);
        assert_eq!(ReliabilityTier::FiveNines.contingency_order(), 3);
    }

    #[test]
    fn required_mw_applies_basis_once() {
        let mut inputs = PlanningInputs {
            pue: 1.5,
            ..PlanningInputs::default()
        };
        inputs.sizing_basis = SizingBasis::ItLoad;
        assert_eq!(inputs.required_mw(100.0), 100.0);
        inputs.sizing_basis = SizingBasis::FacilityLoad;
        assert_eq!(inputs.required_mw(100.0), 150.0);
    }

    #[test]
    fn required_mw_floors_negative_target_at_zero() {
        let inputs = PlanningInputs::default();
        assert_eq!(inputs.required_mw(-50.0), 0.0);
    }

    #[test]
    fn cooling_modes_have_distinct_wue_defaults() {
        assert!(CoolingMode::Evaporative.default_wue() > CoolingMode::Liquid.default_wue());
        assert!(CoolingMode::Liquid.default_wue() > CoolingMode::Air.default_wue());
    }
}
