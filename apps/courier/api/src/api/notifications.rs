//! Typed event adapters for the notification catalog.
//!
//! Each endpoint maps one upstream event to its template id and data. The
//! subject always comes from the catalog pattern here; only `/send-template`
//! accepts an override.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::info;

use crate::api::error::ApiError;
use crate::state::AppState;
use domain_mailer::{substitute_subject, OutgoingEmail};

#[derive(Debug, Deserialize)]
pub struct PaymentCreatedRequest {
    pub recipient: String,
    pub payment_id: String,
    pub service_name: String,
    pub amount: f64,
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentSuccessRequest {
    pub recipient: String,
    pub payment_id: String,
    pub service_name: String,
    pub amount: f64,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentFailedRequest {
    pub recipient: String,
    pub payment_id: String,
    pub service_name: String,
    pub amount: f64,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationCreatedRequest {
    pub recipient: String,
    pub application_id: String,
    pub service_name: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationApprovedRequest {
    pub recipient: String,
    pub application_id: String,
    pub service_name: String,
    pub amount: f64,
    pub payment_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationRejectedRequest {
    pub recipient: String,
    pub application_id: String,
    pub service_name: String,
    pub amount: f64,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationDeletedRequest {
    pub recipient: String,
    pub application_id: String,
    pub service_name: String,
    pub amount: f64,
}

/// Render the template, resolve the subject from the catalog pattern and
/// dispatch to a single recipient.
async fn dispatch(
    state: &AppState,
    template_id: &str,
    recipient: String,
    data: HashMap<String, String>,
) -> Result<Json<Value>, ApiError> {
    info!(template_id = %template_id, "Dispatching notification");

    let (html, text) = state
        .engine
        .render(template_id, &data)
        .map_err(|e| ApiError::internal(format!("Error processing template: {}", e)))?;

    let subject = substitute_subject(&state.engine.subject(template_id), &data);
    let email = OutgoingEmail::new(recipient, subject, html).with_text(text);

    if state.sender.send(email).await {
        Ok(Json(json!({
            "status": "success",
            "message": "Notification sent successfully"
        })))
    } else {
        Err(ApiError::internal("Failed to send notification"))
    }
}

fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub async fn payment_created(
    State(state): State<AppState>,
    Json(request): Json<PaymentCreatedRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut data = HashMap::from([
        ("payment_id".to_string(), request.payment_id),
        ("service_name".to_string(), request.service_name),
        ("amount".to_string(), money(request.amount)),
    ]);
    if let Some(due_date) = request.due_date {
        data.insert("due_date".to_string(), due_date);
    }

    dispatch(&state, "payment_created", request.recipient, data).await
}

pub async fn payment_success(
    State(state): State<AppState>,
    Json(request): Json<PaymentSuccessRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut data = HashMap::from([
        ("payment_id".to_string(), request.payment_id),
        ("service_name".to_string(), request.service_name),
        ("amount".to_string(), money(request.amount)),
    ]);
    if let Some(transaction_id) = request.transaction_id {
        data.insert("transaction_id".to_string(), transaction_id);
    }

    dispatch(&state, "payment_success", request.recipient, data).await
}

pub async fn payment_failed(
    State(state): State<AppState>,
    Json(request): Json<PaymentFailedRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = HashMap::from([
        ("payment_id".to_string(), request.payment_id),
        ("service_name".to_string(), request.service_name),
        ("amount".to_string(), money(request.amount)),
        ("reason".to_string(), request.reason),
    ]);

    dispatch(&state, "payment_failed", request.recipient, data).await
}

pub async fn application_created(
    State(state): State<AppState>,
    Json(request): Json<ApplicationCreatedRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = HashMap::from([
        ("application_id".to_string(), request.application_id),
        ("service_name".to_string(), request.service_name),
        ("amount".to_string(), money(request.amount)),
    ]);

    dispatch(&state, "application_created", request.recipient, data).await
}

pub async fn application_approved(
    State(state): State<AppState>,
    Json(request): Json<ApplicationApprovedRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut data = HashMap::from([
        ("application_id".to_string(), request.application_id),
        ("service_name".to_string(), request.service_name),
        ("amount".to_string(), money(request.amount)),
    ]);
    if let Some(payment_id) = request.payment_id {
        data.insert("payment_id".to_string(), payment_id);
    }

    dispatch(&state, "application_approved", request.recipient, data).await
}

pub async fn application_rejected(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRejectedRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = HashMap::from([
        ("application_id".to_string(), request.application_id),
        ("service_name".to_string(), request.service_name),
        ("amount".to_string(), money(request.amount)),
        ("reason".to_string(), request.reason),
    ]);

    dispatch(&state, "application_rejected", request.recipient, data).await
}

pub async fn application_deleted(
    State(state): State<AppState>,
    Json(request): Json<ApplicationDeletedRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = HashMap::from([
        ("application_id".to_string(), request.application_id),
        ("service_name".to_string(), request.service_name),
        ("amount".to_string(), money(request.amount)),
    ]);

    dispatch(&state, "application_deleted", request.recipient, data).await
}
