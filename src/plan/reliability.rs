//! Reliability-sizing engine: converts a required facility MW into a
//! discrete generation portfolio that survives the loss of the k largest
//! firm units (N+k), with ELCC credit for non-firm resources.
//!
//! Two interchangeable strategies feed the same evaluation path:
//! [`size_from_shares`] converts slider percentages into unit counts via a
//! bounded greedy loop, [`size_from_mix`] consumes user-declared counts
//! directly. Both produce the same [`SizingResult`] contract.

use std::cmp::Ordering;

use serde::Serialize;

use crate::catalog::{CATALOG, Technology, spec_for};

use super::inputs::ReliabilityTier;
use super::portfolio::{AccreditationParams, GreedyParams, MixRow, ShareVector};

/// Unit sizes at or below this are treated as zero to avoid unbounded unit
/// counts from a near-zero denominator.
const UNIT_MW_EPS: f64 = 1e-6;

/// Sized capacity for one technology row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechCapacity {
    /// Technology of this row.
    pub technology: Technology,
    /// Whether the row counts toward firm capacity.
    pub firm: bool,
    /// Number of physical units (display count for non-firm rows).
    pub units: u32,
    /// Size of one unit (MW).
    pub unit_mw: f64,
    /// Installed nameplate capacity (MW).
    pub installed_mw: f64,
    /// Pro-rata dispatch assignment (MW, firm rows only).
    pub dispatched_mw: f64,
    /// Heat rate carried for fuel derivation (Btu/kWh).
    pub heat_rate_btu_per_kwh: f64,
    /// Water intensity carried for water derivation (gal/MWh).
    pub water_gal_per_mwh: f64,
}

/// Output of one reliability-sizing call. Recomputed in full each time;
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    /// Facility MW the portfolio must cover.
    pub required_mw: f64,
    /// Contingency order k derived from the reliability tier.
    pub contingency_order: usize,
    /// Per-technology capacities, firm rows first.
    pub capacities: Vec<TechCapacity>,
    /// Total installed firm capacity (MW).
    pub firm_installed_mw: f64,
    /// Firm capacity remaining after the worst-case loss (MW).
    pub firm_after_loss_mw: f64,
    /// Accredited non-firm capacity (MW).
    pub accredited_mw: f64,
    /// Whether `firm_after_loss + accredited >= required`.
    pub meets_target: bool,
    /// Unit sizes dropped in the worst-case contingency, largest first.
    pub dropped_unit_mw: Vec<f64>,
}

/// Internal unit group shared by both strategies before assembly.
#[derive(Debug, Clone)]
struct Group {
    technology: Technology,
    firm: bool,
    units: u32,
    unit_mw: f64,
    /// Nameplate MW; equals `units * unit_mw` for firm rows but may be a
    /// continuous fraction of required MW for non-firm rows.
    installed_mw: f64,
    heat_rate_btu_per_kwh: f64,
    water_gal_per_mwh: f64,
}

/// Whole units needed to reach a continuous MW target, rounding up.
fn units_for_target(target_mw: f64, unit_mw: f64) -> u32 {
    if unit_mw <= UNIT_MW_EPS || target_mw <= 0.0 {
        return 0;
    }
    (target_mw / unit_mw).ceil() as u32
}

/// Worst-case N+k evaluation over the firm groups.
///
/// Flattens one entry per physical firm unit, sorts descending, and drops
/// the k largest. Returns `(dropped, firm_installed, firm_after_loss)`.
fn worst_case_loss(groups: &[Group], k: usize) -> (Vec<f64>, f64, f64) {
    let mut sizes: Vec<f64> = groups
        .iter()
        .filter(|g| g.firm)
        .flat_map(|g| std::iter::repeat_n(g.unit_mw, g.units as usize))
        .collect();
    sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let firm_installed: f64 = sizes.iter().sum();
    let dropped: Vec<f64> = sizes.iter().take(k).copied().collect();
    let loss: f64 = dropped.iter().sum();
    (dropped, firm_installed, (firm_installed - loss).max(0.0))
}

/// Pro-rata dispatch target for one firm group.
///
/// Dispatch never exceeds what is needed nor what is installed; non-firm
/// groups are never dispatched in this screening model.
fn dispatched_mw(group: &Group, firm_installed: f64, required_mw: f64) -> f64 {
    if !group.firm || firm_installed <= UNIT_MW_EPS {
        return 0.0;
    }
    let dispatch_total = required_mw.max(0.0).min(firm_installed);
    group.installed_mw / firm_installed * dispatch_total
}

/// Builds the final result from the current groups.
fn assemble(
    required_mw: f64,
    k: usize,
    groups: Vec<Group>,
    accreditation: &AccreditationParams,
) -> SizingResult {
    let (dropped_unit_mw, firm_installed_mw, firm_after_loss_mw) = worst_case_loss(&groups, k);

    let accredited_mw: f64 = groups
        .iter()
        .filter(|g| !g.firm)
        .map(|g| g.installed_mw * accreditation.credit_fraction(g.technology))
        .sum();

    let capacities: Vec<TechCapacity> = groups
        .iter()
        .map(|g| TechCapacity {
            technology: g.technology,
            firm: g.firm,
            units: g.units,
            unit_mw: g.unit_mw,
            installed_mw: g.installed_mw,
            dispatched_mw: dispatched_mw(g, firm_installed_mw, required_mw),
            heat_rate_btu_per_kwh: g.heat_rate_btu_per_kwh,
            water_gal_per_mwh: g.water_gal_per_mwh,
        })
        .collect();

    SizingResult {
        required_mw,
        contingency_order: k,
        capacities,
        firm_installed_mw,
        firm_after_loss_mw,
        accredited_mw,
        meets_target: firm_after_loss_mw + accredited_mw >= required_mw,
        dropped_unit_mw,
    }
}

/// Share-based strategy: percentages of required MW, converted to discrete
/// unit counts by ceiling seeding plus bounded greedy augmentation.
///
/// A zero firm share sum builds zero firm units; there is no hidden
/// fallback technology. If the iteration ceiling is reached, the last
/// evaluated state is returned and `meets_target` reads false.
pub fn size_from_shares(
    required_mw: f64,
    shares: &ShareVector,
    tier: ReliabilityTier,
    accreditation: &AccreditationParams,
    greedy: &GreedyParams,
) -> SizingResult {
    let required = required_mw.max(0.0);
    let k = tier.contingency_order();
    let firm_sum = shares.firm_sum();

    let mut groups = Vec::with_capacity(CATALOG.len());
    let mut normalized = Vec::new();

    for spec in &CATALOG {
        if spec.firm {
            let share = if firm_sum > 0.0 {
                shares.get(spec.technology) / firm_sum
            } else {
                0.0
            };
            normalized.push(share);
            let units = if share > 0.0 {
                units_for_target(share * required, spec.unit_mw)
            } else {
                0
            };
            groups.push(Group {
                technology: spec.technology,
                firm: true,
                units,
                unit_mw: spec.unit_mw,
                installed_mw: f64::from(units) * spec.unit_mw,
                heat_rate_btu_per_kwh: spec.heat_rate_btu_per_kwh,
                water_gal_per_mwh: spec.water_gal_per_mwh,
            });
        }
    }

    if firm_sum > 0.0 {
        for _ in 0..greedy.max_iterations {
            let (_, firm_installed, firm_after_loss) = worst_case_loss(&groups, k);
            if firm_after_loss >= required {
                break;
            }

            // Score every participating firm technology by how far its
            // dispatch sits below its requested share, with a small penalty
            // per MW of unit size so comparable shortfalls are closed with
            // the smaller unit.
            let mut best: Option<(usize, f64)> = None;
            for (i, group) in groups.iter().enumerate() {
                if normalized[i] <= 0.0 {
                    continue;
                }
                let dispatched = dispatched_mw(group, firm_installed, required);
                let shortfall = (normalized[i] * required - dispatched).max(0.0);
                let score = shortfall - greedy.unit_size_penalty * group.unit_mw;
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((i, score));
                }
            }

            match best {
                Some((i, _)) => {
                    groups[i].units += 1;
                    groups[i].installed_mw = f64::from(groups[i].units) * groups[i].unit_mw;
                }
                None => break,
            }
        }
    }

    // Non-firm nameplate is an independent fraction of required MW; the
    // unit count is display-only.
    for spec in &CATALOG {
        if !spec.firm {
            let nameplate = shares.get(spec.technology) / 100.0 * required;
            groups.push(Group {
                technology: spec.technology,
                firm: false,
                units: units_for_target(nameplate, spec.unit_mw),
                unit_mw: spec.unit_mw,
                installed_mw: nameplate,
                heat_rate_btu_per_kwh: spec.heat_rate_btu_per_kwh,
                water_gal_per_mwh: spec.water_gal_per_mwh,
            });
        }
    }

    assemble(required, k, groups, accreditation)
}

/// Manual strategy: one group per declared row, counts consumed directly.
pub fn size_from_mix(
    required_mw: f64,
    rows: &[MixRow],
    tier: ReliabilityTier,
    accreditation: &AccreditationParams,
) -> SizingResult {
    let required = required_mw.max(0.0);
    let k = tier.contingency_order();

    let groups: Vec<Group> = rows
        .iter()
        .map(|row| {
            let unit_mw = if row.unit_mw > UNIT_MW_EPS {
                row.unit_mw
            } else {
                0.0
            };
            Group {
                technology: row.technology,
                firm: spec_for(row.technology).firm,
                units: row.units,
                unit_mw,
                installed_mw: f64::from(row.units) * unit_mw,
                heat_rate_btu_per_kwh: row.heat_rate_btu_per_kwh.max(0.0),
                water_gal_per_mwh: row.water_gal_per_mwh.max(0.0),
            }
        })
        .collect();

    assemble(required, k, groups, accreditation)
}
