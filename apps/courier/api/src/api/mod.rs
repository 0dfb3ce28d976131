use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod error;
pub mod health;
pub mod notifications;
pub mod send;
pub mod templates;

/// Builds the full route tree with state applied.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/send", post(send::send_handler))
        .route("/send-template", post(templates::send_template_handler))
        .route("/notify/payment-created", post(notifications::payment_created))
        .route("/notify/payment-success", post(notifications::payment_success))
        .route("/notify/payment-failed", post(notifications::payment_failed))
        .route(
            "/notify/application-created",
            post(notifications::application_created),
        )
        .route(
            "/notify/application-approved",
            post(notifications::application_approved),
        )
        .route(
            "/notify/application-rejected",
            post(notifications::application_rejected),
        )
        .route(
            "/notify/application-deleted",
            post(notifications::application_deleted),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
