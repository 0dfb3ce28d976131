//! Ad-hoc send adapter.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::ApiError;
use crate::state::AppState;
use domain_mailer::{AddressList, OutgoingEmail};

/// Raw send request: caller supplies the finished bodies.
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub to: AddressList,
    pub subject: String,
    /// Plain-text body; doubles as the HTML content when `html_body` is absent.
    pub body: String,
    pub html_body: Option<String>,
    pub cc: Option<AddressList>,
    pub bcc: Option<AddressList>,
    pub sender: Option<String>,
    /// Originating service, recorded in the logs.
    pub source_service: String,
}

pub async fn send_handler(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<Value>, ApiError> {
    info!(
        source_service = %request.source_service,
        subject = %request.subject,
        "Received send request"
    );

    let html = request.html_body.unwrap_or_else(|| request.body.clone());
    let mut email = OutgoingEmail::new(request.to, request.subject, html).with_text(request.body);
    if let Some(cc) = request.cc {
        email = email.with_cc(cc);
    }
    if let Some(bcc) = request.bcc {
        email = email.with_bcc(bcc);
    }
    if let Some(sender) = request.sender {
        email = email.with_from(sender);
    }

    if state.sender.send(email).await {
        Ok(Json(json!({
            "status": "success",
            "message": "Email sent successfully"
        })))
    } else {
        Err(ApiError::internal("Failed to send email"))
    }
}
