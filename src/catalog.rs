//! Static generation technology catalog.
//!
//! One [`TechnologySpec`] per technology, shared read-only by both sizing
//! strategies. The catalog is never mutated after initialization; per-row
//! overrides live in [`crate::plan::portfolio::MixRow`] instead.

use serde::Serialize;

/// Generation technology identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Technology {
    /// Utility grid import (per-feed blocks).
    Grid,
    /// Simple-cycle gas combustion turbine.
    GasTurbine,
    /// Gas reciprocating engine plant.
    ReciprocatingEngine,
    /// Natural-gas fuel cell.
    FuelCell,
    /// Utility-scale solar photovoltaics.
    SolarPv,
    /// Onshore wind.
    Wind,
    /// Battery energy storage system.
    Battery,
}

impl Technology {
    /// All catalog technologies, in display order.
    pub const ALL: [Technology; 7] = [
        Technology::Grid,
        Technology::GasTurbine,
        Technology::ReciprocatingEngine,
        Technology::FuelCell,
        Technology::SolarPv,
        Technology::Wind,
        Technology::Battery,
    ];

    /// Stable index into [`Technology::ALL`].
    pub fn index(self) -> usize {
        match self {
            Technology::Grid => 0,
            Technology::GasTurbine => 1,
            Technology::ReciprocatingEngine => 2,
            Technology::FuelCell => 3,
            Technology::SolarPv => 4,
            Technology::Wind => 5,
            Technology::Battery => 6,
        }
    }

    /// Human-readable name used in reports and CSV export.
    pub fn name(self) -> &'static str {
        match self {
            Technology::Grid => "Grid",
            Technology::GasTurbine => "Gas Turbine",
            Technology::ReciprocatingEngine => "Recip Engine",
            Technology::FuelCell => "Fuel Cell",
            Technology::SolarPv => "Solar PV",
            Technology::Wind => "Wind",
            Technology::Battery => "Battery",
        }
    }
}

/// Fuel consumed by a technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FuelKind {
    /// No fuel (grid import, renewables, storage).
    None,
    /// Pipeline natural gas.
    NaturalGas,
}

/// Land footprint scaling rule for one technology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Footprint {
    /// Acres per installed physical unit (firm plant, substation feeds).
    PerUnit(f64),
    /// Acres per installed MW (PV, wind).
    PerMw(f64),
    /// Acres per MW per hour of duration, plus fixed site overhead (BESS).
    PerMwHour {
        /// Acres per installed MW per hour of storage duration.
        acres_per_mw_hour: f64,
        /// Fixed acreage for inverters, collection, and access.
        overhead_acres: f64,
    },
}

/// Static parameters for one generation technology.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TechnologySpec {
    /// Technology identifier.
    pub technology: Technology,
    /// Size of one physical unit (MW).
    pub unit_mw: f64,
    /// Unit availability factor (0.0 to 1.0).
    pub availability: f64,
    /// Heat rate in Btu per kWh of electrical output (0 for non-thermal).
    pub heat_rate_btu_per_kwh: f64,
    /// Water intensity in gallons per MWh generated.
    pub water_gal_per_mwh: f64,
    /// Whether capacity is assumed available on demand.
    pub firm: bool,
    /// Fuel consumed.
    pub fuel: FuelKind,
    /// Land footprint scaling rule.
    pub footprint: Footprint,
}

/// The fixed technology catalog.
pub const CATALOG: [TechnologySpec; 7] = [
    TechnologySpec {
        technology: Technology::Grid,
        unit_mw: 100.0,
        availability: 0.999,
        heat_rate_btu_per_kwh: 0.0,
        water_gal_per_mwh: 0.0,
        firm: true,
        fuel: FuelKind::None,
        footprint: Footprint::PerUnit(8.0),
    },
    TechnologySpec {
        technology: Technology::GasTurbine,
        unit_mw: 50.0,
        availability: 0.97,
        heat_rate_btu_per_kwh: 9500.0,
        water_gal_per_mwh: 380.0,
        firm: true,
        fuel: FuelKind::NaturalGas,
        footprint: Footprint::PerUnit(3.0),
    },
    TechnologySpec {
        technology: Technology::ReciprocatingEngine,
        unit_mw: 18.0,
        availability: 0.97,
        heat_rate_btu_per_kwh: 8300.0,
        water_gal_per_mwh: 150.0,
        firm: true,
        fuel: FuelKind::NaturalGas,
        footprint: Footprint::PerUnit(1.5),
    },
    TechnologySpec {
        technology: Technology::FuelCell,
        unit_mw: 10.0,
        availability: 0.95,
        heat_rate_btu_per_kwh: 6700.0,
        water_gal_per_mwh: 20.0,
        firm: true,
        fuel: FuelKind::NaturalGas,
        footprint: Footprint::PerUnit(1.0),
    },
    TechnologySpec {
        technology: Technology::SolarPv,
        unit_mw: 5.0,
        availability: 0.25,
        heat_rate_btu_per_kwh: 0.0,
        water_gal_per_mwh: 0.0,
        firm: false,
        fuel: FuelKind::None,
        footprint: Footprint::PerMw(6.0),
    },
    TechnologySpec {
        technology: Technology::Wind,
        unit_mw: 3.0,
        availability: 0.35,
        heat_rate_btu_per_kwh: 0.0,
        water_gal_per_mwh: 0.0,
        firm: false,
        fuel: FuelKind::None,
        footprint: Footprint::PerMw(1.0),
    },
    TechnologySpec {
        technology: Technology::Battery,
        unit_mw: 10.0,
        availability: 0.98,
        heat_rate_btu_per_kwh: 0.0,
        water_gal_per_mwh: 0.0,
        firm: false,
        fuel: FuelKind::None,
        footprint: Footprint::PerMwHour {
            acres_per_mw_hour: 0.02,
            overhead_acres: 1.0,
        },
    },
];

/// Looks up the catalog entry for a technology.
pub fn spec_for(technology: Technology) -> &'static TechnologySpec {
    &CATALOG[technology.index()]
}
