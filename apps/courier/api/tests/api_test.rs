//! Handler tests for the courier API
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response shapes and status codes
//! - Error mapping to `{"detail": ...}` bodies
//!
//! The delivery engine runs in sandbox mode, so no network activity occurs
//! except in the explicit transport-failure test (which targets a port
//! that refuses connections).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use courier_api::api;
use courier_api::state::AppState;
use domain_mailer::{EmailSender, SmtpConfig, TemplateEngine};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

fn smtp_config(sandbox: bool, port: u16) -> SmtpConfig {
    SmtpConfig {
        host: "localhost".to_string(),
        port,
        username: String::new(),
        password: String::new(),
        default_sender: "noreply@example.com".to_string(),
        sandbox,
    }
}

fn app_with(config: SmtpConfig) -> Router {
    let state = AppState {
        app: core_config::app_info!(),
        engine: Arc::new(TemplateEngine::new().unwrap()),
        sender: Arc::new(EmailSender::new(config)),
    };
    api::routes(state)
}

/// App with a sandbox-mode sender: every valid send reports success.
fn sandbox_app() -> Router {
    app_with(smtp_config(true, 2525))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_returns_service_identity() {
    let app = sandbox_app();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "email-service");
}

#[tokio::test]
async fn test_health_reports_crate_identity() {
    let app = sandbox_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "courier_api");
}

#[tokio::test]
async fn test_send_returns_success() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/send",
            json!({
                "to": ["test@example.com"],
                "subject": "Test Subject",
                "body": "Test Body",
                "html_body": "<p>Test HTML</p>",
                "source_service": "test-service"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Email sent successfully");
}

#[tokio::test]
async fn test_send_accepts_single_address_string() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/send",
            json!({
                "to": "test@example.com",
                "subject": "Test Subject",
                "body": "Test Body",
                "cc": "cc@example.com",
                "source_service": "test-service"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_send_without_recipients_is_rejected() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/send",
            json!({
                "to": [],
                "subject": "Test Subject",
                "body": "Test Body",
                "source_service": "test-service"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["detail"], "Failed to send email");
}

#[tokio::test]
async fn test_send_template_returns_success() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/send-template",
            json!({
                "to": ["test@example.com"],
                "template_id": "payment_created",
                "template_data": {
                    "payment_id": "PAY123",
                    "service_name": "Test Service",
                    "amount": "100.00"
                },
                "source_service": "test-service"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Template email sent successfully");
}

#[tokio::test]
async fn test_send_template_with_custom_subject() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/send-template",
            json!({
                "to": ["test@example.com"],
                "template_id": "payment_created",
                "template_data": { "payment_id": "PAY123" },
                "subject": "Custom Subject",
                "source_service": "test-service"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_send_template_unknown_id_is_an_error() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/send-template",
            json!({
                "to": ["test@example.com"],
                "template_id": "non_existing",
                "template_data": {},
                "source_service": "test-service"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response.into_body()).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("Error processing template"));
    assert!(detail.contains("Template not found"));
}

#[tokio::test]
async fn test_payment_created_notification() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/notify/payment-created",
            json!({
                "recipient": "test@example.com",
                "payment_id": "PAY123",
                "service_name": "Test Service",
                "amount": 100.5,
                "due_date": "2024-12-31"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn test_application_rejected_notification() {
    let app = sandbox_app();

    let response = app
        .oneshot(post_json(
            "/notify/application-rejected",
            json!({
                "recipient": "test@example.com",
                "application_id": "APP123",
                "service_name": "Test Service",
                "amount": 100.5,
                "reason": "Insufficient funds"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_send_transport_failure_maps_to_500() {
    // Live mode against a port that refuses connections: the sender reports
    // false and the handler maps it to a 500, no error propagates.
    let app = app_with(smtp_config(false, 1));

    let response = app
        .oneshot(post_json(
            "/send",
            json!({
                "to": ["test@example.com"],
                "subject": "Test Subject",
                "body": "Test Body",
                "source_service": "test-service"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["detail"], "Failed to send email");
}
