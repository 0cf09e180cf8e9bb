//! Screening-level capacity planner for data-center campuses.
//!
//! Converts parcel geometry into achievable IT MW, sizes a discrete
//! generation portfolio that survives an N+k contingency, and derives
//! fuel, water, and land draws for the result.

pub mod catalog;
pub mod config;
pub mod io;
/// Land allocation, reliability sizing, and derived-quantity stages.
pub mod plan;
pub mod report;

#[cfg(feature = "api")]
pub mod api;
