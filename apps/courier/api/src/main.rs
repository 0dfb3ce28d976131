//! Courier API - Entry Point
//!
//! HTTP service that renders notification templates and dispatches them
//! over SMTP.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    courier_api::run().await
}
