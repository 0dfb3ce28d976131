//! Courier API
//!
//! Thin HTTP adapters over the mailer domain: inbound requests are mapped
//! to template ids and data, rendered, and handed to the delivery engine.

use core_config::tracing::{init_tracing, install_color_eyre};
use domain_mailer::{EmailSender, TemplateEngine};
use std::sync::Arc;
use tracing::info;

pub mod api;
pub mod config;
pub mod shutdown;
pub mod state;

use config::Config;
use state::AppState;

/// Load configuration, build the engines and serve until shutdown.
pub async fn run() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    if config.smtp.sandbox {
        info!("TESTING is set: SMTP delivery disabled, sends report success without network activity");
    }

    // The template registry loads once; a broken template is fatal here,
    // not at send time.
    let engine = TemplateEngine::new()
        .map_err(|e| eyre::eyre!("Failed to initialize template registry: {}", e))?;
    let sender = EmailSender::new(config.smtp.clone());

    let state = AppState {
        app: config.app,
        engine: Arc::new(engine),
        sender: Arc::new(sender),
    };

    let app = api::routes(state);

    let addr = config.server.address();
    info!(%addr, smtp_host = %config.smtp.host, smtp_port = config.smtp.port, "Starting courier API");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    info!("Courier API shutdown complete");
    Ok(())
}
