//! REST API for plan results and catalog data.
//!
//! Provides four GET endpoints:
//! - `/plan` — full plan result (land, sizing, derived stages)
//! - `/summary` — headline figures for dashboards
//! - `/technologies` — catalog reference data, optionally filtered
//! - `/phases` — per-phase IT MW, optionally a single phase

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::report::PlanReport;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the plan is computed and wrapped in `Arc` — no
/// locks needed since all data is read-only.
pub struct AppState {
    /// Complete plan result served by every endpoint.
    pub report: PlanReport,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan", get(handlers::get_plan))
        .route("/summary", get(handlers::get_summary))
        .route("/technologies", get(handlers::get_technologies))
        .route("/phases", get(handlers::get_phases))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
