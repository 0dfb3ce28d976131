//! Mailer Domain
//!
//! Template rendering and SMTP delivery for transactional notifications.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   API Handler   │  ← Maps inbound events to template ids + data
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ TemplateEngine  │  ← Renders subject/HTML/text from the catalog
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │   EmailSender   │  ← One SMTP delivery attempt, boolean result
//! └─────────────────┘
//! ```
//!
//! Both engines are read-only after construction and hold no per-request
//! state, so they are shared across request handlers behind `Arc` without
//! locking. Template resolution failures are raised to the caller;
//! transport failures are logged and reported as a `false` send result.

pub mod config;
pub mod error;
pub mod models;
pub mod sender;
pub mod templates;

// Re-export commonly used types
pub use config::SmtpConfig;
pub use error::{MailerError, MailerResult};
pub use models::{AddressList, OutgoingEmail};
pub use sender::EmailSender;
pub use templates::{substitute_subject, TemplateEngine};
