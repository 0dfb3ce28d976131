use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Service identity for callers probing the root path.
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "email-service" }))
}

/// Liveness endpoint with crate name and version.
///
/// Always returns 200 while the process is running; this service has no
/// backing connections to probe.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "email-service",
        "name": state.app.name,
        "version": state.app.version,
    }))
}
