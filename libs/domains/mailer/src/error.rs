//! Error types for the mailer domain.

use thiserror::Error;

/// Result type for mailer operations.
pub type MailerResult<T> = Result<T, MailerError>;

/// Errors that can occur in the mailer domain.
///
/// Template errors are raised to callers; transport and address errors are
/// caught at the `EmailSender::send` boundary and surface as a `false`
/// send result instead.
#[derive(Debug, Error)]
pub enum MailerError {
    /// No catalog entry for the requested template id.
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// A template body failed to register or render.
    #[error("Template rendering error: {0}")]
    TemplateRender(String),

    /// An address could not be parsed into a mailbox.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Connection, authentication or protocol-level SMTP failure.
    #[error("SMTP transport error: {0}")]
    Transport(String),
}

impl From<handlebars::RenderError> for MailerError {
    fn from(err: handlebars::RenderError) -> Self {
        MailerError::TemplateRender(err.to_string())
    }
}

impl From<handlebars::TemplateError> for MailerError {
    fn from(err: handlebars::TemplateError) -> Self {
        MailerError::TemplateRender(err.to_string())
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        MailerError::Transport(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailerError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailerError::Transport(err.to_string())
    }
}
