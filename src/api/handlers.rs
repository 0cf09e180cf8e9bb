//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::catalog::Technology;
use crate::report::PlanReport;

use super::AppState;
use super::types::{
    ErrorResponse, PhaseQuery, PhaseRecord, SummaryResponse, TechnologyInfo, TechnologyQuery,
};

/// Returns the full plan result.
///
/// `GET /plan` → 200 + `PlanReport` JSON
pub async fn get_plan(State(state): State<Arc<AppState>>) -> Json<PlanReport> {
    Json(state.report.clone())
}

/// Returns headline figures.
///
/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse::from(&state.report))
}

/// Returns catalog reference data, optionally filtered by firm flag.
///
/// `GET /technologies` → 200 + `Vec<TechnologyInfo>` JSON
/// `GET /technologies?firm=true` → firm entries only
pub async fn get_technologies(Query(query): Query<TechnologyQuery>) -> Json<Vec<TechnologyInfo>> {
    let infos: Vec<TechnologyInfo> = Technology::ALL
        .iter()
        .map(|t| TechnologyInfo::from(*t))
        .filter(|info| query.firm.is_none_or(|firm| info.firm == firm))
        .collect();
    Json(infos)
}

/// Returns per-phase IT MW, optionally a single phase.
///
/// `GET /phases` → 200 + `Vec<PhaseRecord>` JSON
/// `GET /phases?index=N` → 200 + single-element vec
/// `GET /phases?index=99` (out of range) → 400 + `ErrorResponse`
pub async fn get_phases(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhaseQuery>,
) -> impl IntoResponse {
    let phases = &state.report.land.phase_mw;

    if let Some(index) = query.index {
        if index >= phases.len() {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "phase index {index} out of range (plan has {} phase(s))",
                        phases.len()
                    ),
                }),
            ));
        }
        return Ok(Json(vec![PhaseRecord {
            index,
            it_mw: phases[index],
        }]));
    }

    let records: Vec<PhaseRecord> = phases
        .iter()
        .enumerate()
        .map(|(index, &it_mw)| PhaseRecord { index, it_mw })
        .collect();
    Ok(Json(records))
}
