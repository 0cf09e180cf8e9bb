//! Land/IT allocator: parcel geometry to achievable IT megawatts.

use serde::Serialize;

use super::inputs::{PlanningInputs, SizingMode};

/// Square feet per acre.
pub const SQFT_PER_ACRE: f64 = 43_560.0;

/// Liters per US gallon.
pub const LITERS_PER_GALLON: f64 = 3.78541;

const MINUTES_PER_HOUR: f64 = 60.0;

/// Output of the land/IT allocation stage.
///
/// All acreages in acres, areas in ft², power in MW, water in gallons per
/// minute. Recomputed in full on every call; holds no references.
#[derive(Debug, Clone, Serialize)]
pub struct LandResult {
    /// Developable land (acres).
    pub buildable_acres: f64,
    /// Building footprint (acres).
    pub building_footprint_acres: f64,
    /// Total building floor area across stories (ft²).
    pub building_sqft: f64,
    /// White space available for racks (ft²).
    pub white_space_sqft: f64,
    /// Whole racks that fit in the white space.
    pub racks: u64,
    /// IT capacity supported by the parcel (MW).
    pub it_mw_from_land: f64,
    /// MEP yard allocation (acres).
    pub mep_yard_acres: f64,
    /// Internal roads allocation (acres).
    pub roads_acres: f64,
    /// Substation allocation (acres).
    pub substation_acres: f64,
    /// Buildable land left after all allocations (acres, >= 0).
    pub open_acres: f64,
    /// IT target the rest of the pipeline plans against (MW).
    pub effective_it_target_mw: f64,
    /// IT MW per build phase, one entry per phase.
    pub phase_mw: Vec<f64>,
    /// Whether the parcel supports the effective target.
    pub feasible: bool,
    /// Data-center cooling water draw at the effective target (gpm).
    pub cooling_water_gpm: f64,
}

/// Converts parcel and building parameters into achievable IT capacity.
///
/// Pure and infallible: inputs are clamped, never rejected, and degenerate
/// values produce a zero-capacity result.
pub fn allocate(raw: &PlanningInputs) -> LandResult {
    let p = raw.clamped();

    let buildable_acres = p.parcel_acres * p.buildable_fraction;
    let building_footprint_acres = buildable_acres * p.site_coverage_fraction;
    // Stacking floors multiplies usable area without growing the footprint.
    let building_sqft = building_footprint_acres * SQFT_PER_ACRE * f64::from(p.stories.max(1));
    let white_space_sqft = (building_sqft * (1.0 - p.support_space_fraction)).max(0.0);

    let racks = (white_space_sqft / p.area_per_rack_sqft).floor() as u64;
    let it_mw_from_land = racks as f64 * p.power_per_rack_kw / 1000.0;

    let mep_yard_acres = buildable_acres * p.mep_yard_fraction;
    let roads_acres = buildable_acres * p.roads_fraction;
    let open_acres = (buildable_acres
        - (building_footprint_acres + mep_yard_acres + roads_acres + p.substation_acres))
        .max(0.0);

    let mode_target = match p.sizing_mode {
        SizingMode::TargetIt => p.target_it_mw,
        SizingMode::MaxFromLand => it_mw_from_land,
    };

    let phases = p.phases.max(1) as usize;
    let (phase_mw, effective_it_target_mw) = if p.equalize_phases {
        (vec![mode_target / phases as f64; phases], mode_target)
    } else {
        // Truncate or zero-pad the manual per-phase list; the effective
        // target becomes its sum.
        let mut per_phase: Vec<f64> = p
            .phase_targets_mw
            .iter()
            .take(phases)
            .map(|&mw| mw.max(0.0))
            .collect();
        per_phase.resize(phases, 0.0);
        let sum = per_phase.iter().sum();
        (per_phase, sum)
    };

    let feasible = match p.sizing_mode {
        SizingMode::TargetIt => it_mw_from_land >= effective_it_target_mw,
        SizingMode::MaxFromLand => it_mw_from_land > 0.0,
    };

    // WUE is liters per kWh; at steady state kW numerically equals kWh/h.
    let it_kw = effective_it_target_mw * 1000.0;
    let cooling_water_gpm = p.wue * it_kw / LITERS_PER_GALLON / MINUTES_PER_HOUR;

    LandResult {
        buildable_acres,
        building_footprint_acres,
        building_sqft,
        white_space_sqft,
        racks,
        it_mw_from_land,
        mep_yard_acres,
        roads_acres,
        substation_acres: p.substation_acres,
        open_acres,
        effective_it_target_mw,
        phase_mw,
        feasible,
        cooling_water_gpm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::inputs::{CoolingMode, ReliabilityTier, SizingBasis};

    fn example_inputs() -> PlanningInputs {
        PlanningInputs {
            parcel_acres: 500.0,
            buildable_fraction: 0.3,
            site_coverage_fraction: 0.5,
            stories: 1,
            support_space_fraction: 0.35,
            mep_yard_fraction: 0.0,
            roads_fraction: 0.0,
            substation_acres: 0.0,
            area_per_rack_sqft: 60.0,
            power_per_rack_kw: 10.0,
            cooling: CoolingMode::Evaporative,
            pue: 1.2,
            wue: 0.0,
            sizing_mode: SizingMode::MaxFromLand,
            target_it_mw: 0.0,
            phases: 1,
            equalize_phases: true,
            phase_targets_mw: Vec::new(),
            tier: ReliabilityTier::FourNines,
            sizing_basis: SizingBasis::ItLoad,
        }
    }

    #[test]
    fn worked_example_500_acre_parcel() {
        let r = allocate(&example_inputs());
        assert_eq!(r.buildable_acres, 150.0);
        assert_eq!(r.building_footprint_acres, 75.0);
        assert_eq!(r.building_sqft, 3_267_000.0);
        assert!((r.white_space_sqft - 2_123_550.0).abs() < 1.0);
        assert_eq!(r.racks, 35_392);
        assert!((r.it_mw_from_land - 353.92).abs() < 1e-9);
    }

    #[test]
    fn racks_are_exact_floor_division() {
        let mut inputs = example_inputs();
        inputs.support_space_fraction = 0.0;
        inputs.area_per_rack_sqft = 100.0;
        let r = allocate(&inputs);
        assert_eq!(r.racks, (r.white_space_sqft / 100.0).floor() as u64);
    }

    #[test]
    fn stacking_floors_multiplies_capacity_linearly() {
        // With no support space the white space divides evenly by the rack
        // area (3,267,000 / 60 = 54,450 racks per story), so the floor
        // division is exact and linearity holds exactly.
        let mut inputs = example_inputs();
        inputs.support_space_fraction = 0.0;
        let single = allocate(&inputs);
        assert_eq!(single.racks, 54_450);

        inputs.stories = 3;
        let stacked = allocate(&inputs);
        assert_eq!(stacked.racks, 3 * single.racks);
        assert!((stacked.it_mw_from_land - 3.0 * single.it_mw_from_land).abs() < 1e-9);
        // Land allocation below the building is unchanged.
        assert_eq!(stacked.building_footprint_acres, single.building_footprint_acres);
        assert_eq!(stacked.open_acres, single.open_acres);
    }

    #[test]
    fn stacking_with_fractional_racks_floors_per_total_area() {
        // 35,392.5 racks' worth of white space per story: flooring happens
        // after the story multiplication, so three stories recover the
        // fractional rack lost at one story.
        let single = allocate(&example_inputs());
        let mut stacked_inputs = example_inputs();
        stacked_inputs.stories = 3;
        let stacked = allocate(&stacked_inputs);
        assert_eq!(single.racks, 35_392);
        assert_eq!(stacked.racks, 106_177);
        assert_eq!(stacked.racks, (stacked.white_space_sqft / 60.0).floor() as u64);
    }

    #[test]
    fn zero_parcel_degrades_to_zero_capacity() {
        let mut inputs = example_inputs();
        inputs.parcel_acres = 0.0;
        let r = allocate(&inputs);
        assert_eq!(r.racks, 0);
        assert_eq!(r.it_mw_from_land, 0.0);
        assert!(!r.feasible);
    }

    #[test]
    fn open_acres_never_negative() {
        let mut inputs = example_inputs();
        inputs.substation_acres = 10_000.0;
        let r = allocate(&inputs);
        assert_eq!(r.open_acres, 0.0);
    }

    #[test]
    fn target_mode_feasibility() {
        let mut inputs = example_inputs();
        inputs.sizing_mode = SizingMode::TargetIt;
        inputs.target_it_mw = 300.0;
        assert!(allocate(&inputs).feasible);
        inputs.target_it_mw = 400.0;
        assert!(!allocate(&inputs).feasible);
    }

    #[test]
    fn equalized_phases_split_target_evenly() {
        let mut inputs = example_inputs();
        inputs.sizing_mode = SizingMode::TargetIt;
        inputs.target_it_mw = 120.0;
        inputs.phases = 3;
        let r = allocate(&inputs);
        assert_eq!(r.phase_mw, vec![40.0, 40.0, 40.0]);
        assert_eq!(r.effective_it_target_mw, 120.0);
    }

    #[test]
    fn manual_phases_truncate_pad_and_sum() {
        let mut inputs = example_inputs();
        inputs.sizing_mode = SizingMode::TargetIt;
        inputs.equalize_phases = false;
        inputs.phases = 3;
        inputs.phase_targets_mw = vec![50.0, -10.0, 30.0, 99.0];
        let r = allocate(&inputs);
        assert_eq!(r.phase_mw, vec![50.0, 0.0, 30.0]);
        assert_eq!(r.effective_it_target_mw, 80.0);

        inputs.phase_targets_mw = vec![25.0];
        let r = allocate(&inputs);
        assert_eq!(r.phase_mw, vec![25.0, 0.0, 0.0]);
        assert_eq!(r.effective_it_target_mw, 25.0);
    }

    #[test]
    fn cooling_water_conversion() {
        let mut inputs = example_inputs();
        inputs.sizing_mode = SizingMode::TargetIt;
        inputs.target_it_mw = 100.0;
        inputs.wue = 1.8;
        let r = allocate(&inputs);
        // 1.8 L/kWh * 100_000 kW = 180_000 L/h -> gallons -> per minute.
        let expected = 180_000.0 / LITERS_PER_GALLON / 60.0;
        assert!((r.cooling_water_gpm - expected).abs() < 1e-9);
    }

    #[test]
    fn it_mw_is_never_negative() {
        let mut inputs = example_inputs();
        inputs.support_space_fraction = 0.95;
        inputs.parcel_acres = 1.0;
        let r = allocate(&inputs);
        assert!(r.it_mw_from_land >= 0.0);
        assert!(r.white_space_sqft >= 0.0);
    }
}
