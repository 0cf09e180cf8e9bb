//! CSV export for plan results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::PlanReport;

/// Schema v1 column header for the per-technology CSV export.
const HEADER: &str = "technology,firm,units,unit_mw,installed_mw,dispatched_mw,\
                      fuel_mmbtu_per_hr,gas_mscf_per_hr,water_gpm,land_acres";

/// Exports a plan to a CSV file at the given path.
///
/// Writes a header row followed by one data row per technology using the
/// schema v1 column layout. Produces deterministic output for identical
/// inputs.
///
/// # Arguments
///
/// * `report` - Complete plan result
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(report: &PlanReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Writes a plan's per-technology table as CSV to any writer.
///
/// Sizing and derived rows are parallel by construction; each output row
/// joins one of each.
///
/// # Arguments
///
/// * `report` - Complete plan result
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(report: &PlanReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for (cap, draw) in report.sizing.capacities.iter().zip(&report.derived.rows) {
        wtr.write_record(&[
            cap.technology.name().to_string(),
            cap.firm.to_string(),
            cap.units.to_string(),
            format!("{:.4}", cap.unit_mw),
            format!("{:.4}", cap.installed_mw),
            format!("{:.4}", cap.dispatched_mw),
            format!("{:.4}", draw.fuel_mmbtu_per_hr),
            format!("{:.4}", draw.gas_mscf_per_hr),
            format!("{:.4}", draw.water_gpm),
            format!("{:.4}", draw.land_acres),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
