//! TOML-based scenario configuration and preset definitions.
//!
//! A scenario file is the persistence unit for the planner: every field has
//! a default, so an older saved scenario merges onto current defaults
//! field-by-field, versioned by `schema_version`.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::Technology;
use crate::plan::inputs::{
    CoolingMode, PlanningInputs, ReliabilityTier, SizingBasis, SizingMode,
};
use crate::plan::portfolio::{AccreditationParams, GreedyParams, MixInput, MixRow, ShareVector};

/// Highest scenario schema this binary understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Scenario file schema version.
    pub schema_version: u32,
    /// Parcel geometry and land fractions.
    pub site: SiteConfig,
    /// Rack density parameters.
    pub racks: RackConfig,
    /// IT load, efficiency, and phasing parameters.
    pub load: LoadConfig,
    /// Reliability target and strategy selection.
    pub reliability: ReliabilityConfig,
    /// Share-mode percentages of required MW.
    pub shares: SharesConfig,
    /// Manual-mode unit rows (used when `reliability.mix_mode = "manual"`).
    pub mix: Vec<MixRowConfig>,
    /// ELCC accreditation parameters.
    pub accreditation: AccreditationConfig,
    /// Greedy augmentation loop tuning.
    pub greedy: GreedyConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Parcel geometry and land fractions.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Gross parcel area (acres).
    pub parcel_acres: f64,
    /// Developable fraction of the parcel (0.0–1.0).
    pub buildable_fraction: f64,
    /// Building footprint fraction of buildable land (0.0–1.0).
    pub site_coverage_fraction: f64,
    /// Data-hall floors.
    pub stories: u32,
    /// Building area lost to support space (0.0–0.95).
    pub support_space_fraction: f64,
    /// MEP yard fraction of buildable land (0.0–1.0).
    pub mep_yard_fraction: f64,
    /// Roads fraction of buildable land (0.0–1.0).
    pub roads_fraction: f64,
    /// Fixed substation allocation (acres).
    pub substation_acres: f64,
}

impl Default for SiteConfig {
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
        }
    }
}

/// Rack density parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RackConfig {
    /// White space per rack (ft²).
    pub area_per_rack_sqft: f64,
    /// IT power per rack (kW).
    pub power_per_rack_kw: f64,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            area_per_rack_sqft: 60.0,
            power_per_rack_kw: 12.0,
        }
    }
}

/// IT load, efficiency, and phasing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Target mode: `"target-it"` or `"max-from-land"`.
    pub sizing_mode: String,
    /// Requested IT load in target mode (MW).
    pub target_it_mw: f64,
    /// Power usage effectiveness.
    pub pue: f64,
    /// Water usage effectiveness (L/kWh); cooling-mode default when absent.
    pub wue: Option<f64>,
    /// Cooling mode: `"air"`, `"evaporative"`, or `"liquid"`.
    pub cooling: String,
    /// Number of build phases.
    pub phases: u32,
    /// Split the target evenly across phases.
    pub equalize_phases: bool,
    /// Per-phase IT MW when not equalized.
    pub phase_targets_mw: Vec<f64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            sizing_mode: "target-it".to_string(),
            target_it_mw: 120.0,
            pue: 1.25,
            wue: None,
            cooling: "evaporative".to_string(),
            phases: 1,
            equalize_phases: true,
            phase_targets_mw: Vec::new(),
        }
    }
}

/// Reliability target and strategy selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReliabilityConfig {
    /// Tier: `"99.9"`, `"99.99"`, or `"99.999"`.
    pub tier: String,
    /// Sizing basis: `"it"` or `"facility"`.
    pub sizing_basis: String,
    /// Portfolio strategy: `"share"` or `"manual"`.
    pub mix_mode: String,
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            tier: "99.99".to_string(),
            sizing_basis: "facility".to_string(),
            mix_mode: "share".to_string(),
        }
    }
}

/// Share-mode percentages of required MW per technology.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SharesConfig {
    /// Grid import share (%).
    pub grid_pct: f64,
    /// Gas turbine share (%).
    pub gas_turbine_pct: f64,
    /// Reciprocating engine share (%).
    pub recip_engine_pct: f64,
    /// Fuel cell share (%).
    pub fuel_cell_pct: f64,
    /// Solar PV add-on share (%).
    pub solar_pv_pct: f64,
    /// Wind add-on share (%).
    pub wind_pct: f64,
    /// Battery add-on share (%).
    pub battery_pct: f64,
}

impl Default for SharesConfig {
    fn default() -> Self {
        Self {
            grid_pct: 70.0,
            gas_turbine_pct: 30.0,
            recip_engine_pct: 0.0,
            fuel_cell_pct: 0.0,
            solar_pv_pct: 20.0,
            wind_pct: 0.0,
            battery_pct: 10.0,
        }
    }
}

/// One manual-mode unit row.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixRowConfig {
    /// Technology name: `"grid"`, `"gas_turbine"`, `"recip_engine"`,
    /// `"fuel_cell"`, `"solar_pv"`, `"wind"`, or `"battery"`.
    pub technology: String,
    /// Number of identical units.
    pub units: u32,
    /// Unit size override (MW); catalog default when absent.
    #[serde(default)]
    pub unit_mw: Option<f64>,
    /// Availability override; catalog default when absent.
    #[serde(default)]
    pub availability: Option<f64>,
    /// Heat rate override (Btu/kWh); catalog default when absent.
    #[serde(default)]
    pub heat_rate_btu_per_kwh: Option<f64>,
    /// Water intensity override (gal/MWh); catalog default when absent.
    #[serde(default)]
    pub water_gal_per_mwh: Option<f64>,
}

/// ELCC accreditation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccreditationConfig {
    /// When false, accreditation contributes nothing.
    pub enabled: bool,
    /// Solar PV ELCC (%).
    pub pv_elcc_pct: f64,
    /// Wind ELCC (%).
    pub wind_elcc_pct: f64,
    /// Battery ELCC at the 4-hour reference (%).
    pub bess_elcc_pct: f64,
    /// Battery storage duration (hours).
    pub bess_duration_hours: f64,
}

impl Default for AccreditationConfig {
    fn default() -> Self {
        let d = AccreditationParams::default();
        Self {
            enabled: d.enabled,
            pv_elcc_pct: d.pv_elcc_pct,
            wind_elcc_pct: d.wind_elcc_pct,
            bess_elcc_pct: d.bess_elcc_pct,
            bess_duration_hours: d.bess_duration_hours,
        }
    }
}

/// Greedy augmentation loop tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GreedyConfig {
    /// Penalty per MW of candidate unit size.
    pub unit_size_penalty: f64,
    /// Hard iteration ceiling.
    pub max_iterations: usize,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        let d = GreedyParams::default();
        Self {
            unit_size_penalty: d.unit_size_penalty,
            max_iterations: d.max_iterations,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"load.sizing_mode"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

fn parse_technology(name: &str) -> Option<Technology> {
    match name {
        "grid" => Some(Technology::Grid),
        "gas_turbine" => Some(Technology::GasTurbine),
        "recip_engine" => Some(Technology::ReciprocatingEngine),
        "fuel_cell" => Some(Technology::FuelCell),
        "solar_pv" => Some(Technology::SolarPv),
        "wind" => Some(Technology::Wind),
        "battery" => Some(Technology::Battery),
        _ => None,
    }
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "hyperscale", "off_grid"];

    /// Returns the baseline scenario: a grid-leaning mixed campus on a
    /// 500-acre parcel.
    pub fn baseline() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            site: SiteConfig::default(),
            racks: RackConfig::default(),
            load: LoadConfig::default(),
            reliability: ReliabilityConfig::default(),
            shares: SharesConfig::default(),
            mix: Vec::new(),
            accreditation: AccreditationConfig::default(),
            greedy: GreedyConfig::default(),
        }
    }

    /// Returns the hyperscale preset: a large multi-phase parcel sized
    /// from land at the 99.999 tier.
    pub fn hyperscale() -> Self {
        Self {
            site: SiteConfig {
                parcel_acres: 1800.0,
                buildable_fraction: 0.7,
                site_coverage_fraction: 0.4,
                stories: 2,
                substation_acres: 25.0,
                ..SiteConfig::default()
            },
            racks: RackConfig {
                area_per_rack_sqft: 50.0,
                power_per_rack_kw: 17.0,
            },
            load: LoadConfig {
                sizing_mode: "max-from-land".to_string(),
                cooling: "liquid".to_string(),
                pue: 1.15,
                phases: 4,
                ..LoadConfig::default()
            },
            reliability: ReliabilityConfig {
                tier: "99.999".to_string(),
                ..ReliabilityConfig::default()
            },
            shares: SharesConfig {
                grid_pct: 80.0,
                gas_turbine_pct: 20.0,
                solar_pv_pct: 10.0,
                battery_pct: 15.0,
                ..SharesConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the off-grid preset: zero grid share, thermal fleet plus
    /// PV, wind, and storage.
    pub fn off_grid() -> Self {
        Self {
            load: LoadConfig {
                target_it_mw: 90.0,
                ..LoadConfig::default()
            },
            shares: SharesConfig {
                grid_pct: 0.0,
                gas_turbine_pct: 50.0,
                recip_engine_pct: 30.0,
                fuel_cell_pct: 20.0,
                solar_pv_pct: 40.0,
                wind_pct: 10.0,
                battery_pct: 25.0,
            },
            accreditation: AccreditationConfig {
                bess_duration_hours: 6.0,
                ..AccreditationConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "hyperscale" => Ok(Self::hyperscale()),
            "off_grid" => Ok(Self::off_grid()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. The engine
    /// itself clamps rather than rejects; this is the form-layer check
    /// that reports nonsensical values back to the user.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.schema_version > SCHEMA_VERSION {
            errors.push(ConfigError {
                field: "schema_version".into(),
                message: format!(
                    "version {} is newer than supported version {SCHEMA_VERSION}",
                    self.schema_version
                ),
            });
        }

        if self.site.parcel_acres <= 0.0 {
            errors.push(ConfigError {
                field: "site.parcel_acres".into(),
                message: "must be > 0".into(),
            });
        }
        for (field, value) in [
            ("site.buildable_fraction", self.site.buildable_fraction),
            (
                "site.site_coverage_fraction",
                self.site.site_coverage_fraction,
            ),
            ("site.mep_yard_fraction", self.site.mep_yard_fraction),
            ("site.roads_fraction", self.site.roads_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be in [0.0, 1.0]".into(),
                });
            }
        }
        if !(0.0..=0.95).contains(&self.site.support_space_fraction) {
            errors.push(ConfigError {
                field: "site.support_space_fraction".into(),
                message: "must be in [0.0, 0.95]".into(),
            });
        }

        if self.racks.area_per_rack_sqft <= 0.0 {
            errors.push(ConfigError {
                field: "racks.area_per_rack_sqft".into(),
                message: "must be > 0".into(),
            });
        }
        if self.racks.power_per_rack_kw <= 0.0 {
            errors.push(ConfigError {
                field: "racks.power_per_rack_kw".into(),
                message: "must be > 0".into(),
            });
        }

        let l = &self.load;
        if l.sizing_mode != "target-it" && l.sizing_mode != "max-from-land" {
            errors.push(ConfigError {
                field: "load.sizing_mode".into(),
                message: format!(
                    "must be \"target-it\" or \"max-from-land\", got \"{}\"",
                    l.sizing_mode
                ),
            });
        }
        if !["air", "evaporative", "liquid"].contains(&l.cooling.as_str()) {
            errors.push(ConfigError {
                field: "load.cooling".into(),
                message: format!(
                    "must be \"air\", \"evaporative\", or \"liquid\", got \"{}\"",
                    l.cooling
                ),
            });
        }
        if l.target_it_mw < 0.0 {
            errors.push(ConfigError {
                field: "load.target_it_mw".into(),
                message: "must be >= 0".into(),
            });
        }
        if l.pue < 1.0 {
            errors.push(ConfigError {
                field: "load.pue".into(),
                message: "must be >= 1.0".into(),
            });
        }
        if l.phases == 0 {
            errors.push(ConfigError {
                field: "load.phases".into(),
                message: "must be > 0".into(),
            });
        }

        let r = &self.reliability;
        if !["99.9", "99.99", "99.999"].contains(&r.tier.as_str()) {
            errors.push(ConfigError {
                field: "reliability.tier".into(),
                message: format!(
                    "must be \"99.9\", \"99.99\", or \"99.999\", got \"{}\"",
                    r.tier
                ),
            });
        }
        if r.sizing_basis != "it" && r.sizing_basis != "facility" {
            errors.push(ConfigError {
                field: "reliability.sizing_basis".into(),
                message: format!("must be \"it\" or \"facility\", got \"{}\"", r.sizing_basis),
            });
        }
        if r.mix_mode != "share" && r.mix_mode != "manual" {
            errors.push(ConfigError {
                field: "reliability.mix_mode".into(),
                message: format!("must be \"share\" or \"manual\", got \"{}\"", r.mix_mode),
            });
        }
        if r.mix_mode == "manual" && self.mix.is_empty() {
            errors.push(ConfigError {
                field: "mix".into(),
                message: "manual mix mode requires at least one [[mix]] row".into(),
            });
        }

        let s = &self.shares;
        for (field, value) in [
            ("shares.grid_pct", s.grid_pct),
            ("shares.gas_turbine_pct", s.gas_turbine_pct),
            ("shares.recip_engine_pct", s.recip_engine_pct),
            ("shares.fuel_cell_pct", s.fuel_cell_pct),
            ("shares.solar_pv_pct", s.solar_pv_pct),
            ("shares.wind_pct", s.wind_pct),
            ("shares.battery_pct", s.battery_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be in [0.0, 100.0]".into(),
                });
            }
        }

        for (i, row) in self.mix.iter().enumerate() {
            if parse_technology(&row.technology).is_none() {
                errors.push(ConfigError {
                    field: format!("mix[{i}].technology"),
                    message: format!("unknown technology \"{}\"", row.technology),
                });
            }
            if row.unit_mw.is_some_and(|mw| mw <= 0.0) {
                errors.push(ConfigError {
                    field: format!("mix[{i}].unit_mw"),
                    message: "must be > 0".into(),
                });
            }
        }

        let a = &self.accreditation;
        for (field, value) in [
            ("accreditation.pv_elcc_pct", a.pv_elcc_pct),
            ("accreditation.wind_elcc_pct", a.wind_elcc_pct),
            ("accreditation.bess_elcc_pct", a.bess_elcc_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: "must be in [0.0, 100.0]".into(),
                });
            }
        }
        if a.bess_duration_hours <= 0.0 {
            errors.push(ConfigError {
                field: "accreditation.bess_duration_hours".into(),
                message: "must be > 0".into(),
            });
        }

        if self.greedy.max_iterations == 0 {
            errors.push(ConfigError {
                field: "greedy.max_iterations".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }

    /// Builds the engine input record. Unknown mode strings fall back to
    /// defaults here; [`ScenarioConfig::validate`] is where they are
    /// reported.
    pub fn planning_inputs(&self) -> PlanningInputs {
        let cooling = match self.load.cooling.as_str() {
            "air" => CoolingMode::Air,
            "liquid" => CoolingMode::Liquid,
            _ => CoolingMode::Evaporative,
        };
        PlanningInputs {
            parcel_acres: self.site.parcel_acres,
            buildable_fraction: self.site.buildable_fraction,
            site_coverage_fraction: self.site.site_coverage_fraction,
            stories: self.site.stories,
            support_space_fraction: self.site.support_space_fraction,
            mep_yard_fraction: self.site.mep_yard_fraction,
            roads_fraction: self.site.roads_fraction,
            substation_acres: self.site.substation_acres,
            area_per_rack_sqft: self.racks.area_per_rack_sqft,
            power_per_rack_kw: self.racks.power_per_rack_kw,
            cooling,
            pue: self.load.pue,
            wue: self.load.wue.unwrap_or_else(|| cooling.default_wue()),
            sizing_mode: match self.load.sizing_mode.as_str() {
                "max-from-land" => SizingMode::MaxFromLand,
                _ => SizingMode::TargetIt,
            },
            target_it_mw: self.load.target_it_mw,
            phases: self.load.phases,
            equalize_phases: self.load.equalize_phases,
            phase_targets_mw: self.load.phase_targets_mw.clone(),
            tier: match self.reliability.tier.as_str() {
                "99.9" => ReliabilityTier::ThreeNines,
                "99.999" => ReliabilityTier::FiveNines,
                _ => ReliabilityTier::FourNines,
            },
            sizing_basis: match self.reliability.sizing_basis.as_str() {
                "it" => SizingBasis::ItLoad,
                _ => SizingBasis::FacilityLoad,
            },
        }
    }

    /// Builds the portfolio strategy input. Manual rows with an unknown
    /// technology name are skipped (validation reports them).
    pub fn mix_input(&self) -> MixInput {
        if self.reliability.mix_mode == "manual" {
            let rows = self
                .mix
                .iter()
                .filter_map(|row| {
                    let tech = parse_technology(&row.technology)?;
                    let mut r = MixRow::for_technology(tech).with_units(row.units);
                    if let Some(mw) = row.unit_mw {
                        r.unit_mw = mw;
                    }
                    if let Some(a) = row.availability {
                        r.availability = a;
                    }
                    if let Some(hr) = row.heat_rate_btu_per_kwh {
                        r.heat_rate_btu_per_kwh = hr;
                    }
                    if let Some(w) = row.water_gal_per_mwh {
                        r.water_gal_per_mwh = w;
                    }
                    Some(r)
                })
                .collect();
            MixInput::Manual(rows)
        } else {
            let s = &self.shares;
            MixInput::Shares(
                ShareVector::zero()
                    .with(Technology::Grid, s.grid_pct)
                    .with(Technology::GasTurbine, s.gas_turbine_pct)
                    .with(Technology::ReciprocatingEngine, s.recip_engine_pct)
                    .with(Technology::FuelCell, s.fuel_cell_pct)
                    .with(Technology::SolarPv, s.solar_pv_pct)
                    .with(Technology::Wind, s.wind_pct)
                    .with(Technology::Battery, s.battery_pct),
            )
        }
    }

    /// Builds the accreditation parameters.
    pub fn accreditation_params(&self) -> AccreditationParams {
        let a = &self.accreditation;
        AccreditationParams {
            enabled: a.enabled,
            pv_elcc_pct: a.pv_elcc_pct,
            wind_elcc_pct: a.wind_elcc_pct,
            bess_elcc_pct: a.bess_elcc_pct,
            bess_duration_hours: a.bess_duration_hours,
        }
    }

    /// Builds the greedy loop parameters.
    pub fn greedy_params(&self) -> GreedyParams {
        GreedyParams {
            unit_size_penalty: self.greedy.unit_size_penalty,
            max_iterations: self.greedy.max_iterations,
        }
    }
}
