//! Templated send adapter.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

use crate::api::error::ApiError;
use crate::state::AppState;
use domain_mailer::{substitute_subject, AddressList, OutgoingEmail};

/// Templated send request: the body comes from the catalog.
#[derive(Debug, Deserialize)]
pub struct TemplateEmailRequest {
    pub to: AddressList,
    pub template_id: String,
    /// Template variables, pre-stringified by the caller.
    #[serde(default)]
    pub template_data: HashMap<String, String>,
    /// Explicit subject override; used verbatim, no substitution.
    pub subject: Option<String>,
    pub cc: Option<AddressList>,
    pub bcc: Option<AddressList>,
    pub sender: Option<String>,
    pub source_service: String,
}

pub async fn send_template_handler(
    State(state): State<AppState>,
    Json(request): Json<TemplateEmailRequest>,
) -> Result<Json<Value>, ApiError> {
    info!(
        source_service = %request.source_service,
        template_id = %request.template_id,
        "Received template send request"
    );

    let (html, text) = state
        .engine
        .render(&request.template_id, &request.template_data)
        .map_err(|e| ApiError::internal(format!("Error processing template: {}", e)))?;

    let subject = match request.subject {
        Some(subject) => subject,
        None => substitute_subject(
            &state.engine.subject(&request.template_id),
            &request.template_data,
        ),
    };

    let mut email = OutgoingEmail::new(request.to, subject, html).with_text(text);
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
            "message": "Template email sent successfully"
        })))
    } else {
        Err(ApiError::internal("Failed to send template email"))
    }
}
