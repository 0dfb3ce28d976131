//! Application state management.
//!
//! Both engines are read-only after startup, so handlers share them through
//! plain `Arc` clones without locking.

use core_config::AppInfo;
use domain_mailer::{EmailSender, TemplateEngine};
use std::sync::Arc;

/// Shared application state, cloned per handler (cheap Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Crate name and version for the health endpoints
    pub app: AppInfo,
    /// Template rendering engine with the notification catalog
    pub engine: Arc<TemplateEngine>,
    /// SMTP delivery engine
    pub sender: Arc<EmailSender>,
}
