//! REST endpoints for onboarding status and gate evaluation.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::error;

use super::gate::SessionGate;

/// Shared state for session routes.
#[derive(Clone)]
pub struct SessionRouteState {
    pub gate: Arc<SessionGate>,
}

/// GET /api/onboarding/status
///
/// Whether the persisted completion flag reads as set.
async fn get_status(State(state): State<SessionRouteState>) -> impl IntoResponse {
    let completed = state.gate.completed().await;
    Json(serde_json::json!({"completed": completed}))
}

/// POST /api/onboarding/complete
///
/// Persist the completion flag. From here on the gate proceeds everywhere.
async fn complete(State(state): State<SessionRouteState>) -> impl IntoResponse {
    match state.gate.complete().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"completed": true})),
        ),
        Err(e) => {
            error!(error = %e, "Failed to persist onboarding completion");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to persist onboarding completion"})),
            )
        }
    }
}

#[derive(Deserialize)]
struct GateQuery {
    /// Navigation target path being attempted.
    to: String,
}

/// GET /api/gate?to=<path>
///
/// The client router calls this before each navigation and follows the
/// returned action.
async fn evaluate_gate(
    State(state): State<SessionRouteState>,
    Query(query): Query<GateQuery>,
) -> impl IntoResponse {
    let decision = state.gate.evaluate(&query.to).await;
    Json(decision)
}

/// Build the session REST routes.
pub fn session_routes(state: SessionRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/complete", post(complete))
        .route("/api/gate", get(evaluate_gate))
        .with_state(state)
}
