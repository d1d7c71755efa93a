//! REST endpoints for session state, rides, and client config.
//!
//! Mutations go through here (and only here); the WebSocket surface in
//! [`super::ws`] is push-only.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use super::container::StateContainer;
use super::model::{ProfileUpdate, RiderRole};

/// Shared state for the session/ride routes.
#[derive(Clone)]
pub struct StateRouteState {
    pub container: Arc<StateContainer>,
    /// Public Mapbox token handed to the UI, if configured.
    pub mapbox_token: Option<String>,
}

/// Build the session-state REST routes.
pub fn state_routes(state: StateRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/session", get(get_session))
        .route("/api/session/role", put(set_role))
        .route(
            "/api/session/availability/toggle",
            post(toggle_availability),
        )
        .route("/api/session/authenticated", put(set_authenticated))
        .route("/api/session/profile", patch(update_profile))
        .route("/api/rides", get(list_rides))
        .route("/api/config", get(client_config))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "autostop"
    }))
}

/// GET /api/session
///
/// Full snapshot of the mutable session fields.
async fn get_session(State(state): State<StateRouteState>) -> impl IntoResponse {
    let snapshot = state.container.snapshot().await;
    Json(snapshot)
}

#[derive(Deserialize)]
struct SetRoleRequest {
    role: RiderRole,
}

/// PUT /api/session/role
///
/// Unknown role strings never reach the handler; the closed enum rejects
/// them at deserialization.
async fn set_role(
    State(state): State<StateRouteState>,
    Json(body): Json<SetRoleRequest>,
) -> impl IntoResponse {
    state.container.set_role(body.role).await;
    Json(serde_json::json!({"role": body.role}))
}

/// POST /api/session/availability/toggle
async fn toggle_availability(State(state): State<StateRouteState>) -> impl IntoResponse {
    let availability = state.container.toggle_availability().await;
    Json(serde_json::json!({"availability": availability}))
}

#[derive(Deserialize)]
struct SetAuthenticatedRequest {
    authenticated: bool,
}

/// PUT /api/session/authenticated
async fn set_authenticated(
    State(state): State<StateRouteState>,
    Json(body): Json<SetAuthenticatedRequest>,
) -> impl IntoResponse {
    state.container.set_authenticated(body.authenticated).await;
    Json(serde_json::json!({"authenticated": body.authenticated}))
}

/// PATCH /api/session/profile
///
/// Shallow merge: fields absent from the body keep their prior values.
/// Responds with the merged profile.
async fn update_profile(
    State(state): State<StateRouteState>,
    Json(body): Json<ProfileUpdate>,
) -> impl IntoResponse {
    let profile = state.container.update_profile(body).await;
    Json(profile)
}

/// GET /api/rides
async fn list_rides(State(state): State<StateRouteState>) -> impl IntoResponse {
    Json(state.container.rides().to_vec())
}

/// GET /api/config
///
/// Public runtime configuration for the UI.
async fn client_config(State(state): State<StateRouteState>) -> impl IntoResponse {
    Json(serde_json::json!({"mapboxToken": state.mapbox_token}))
}
