//! SMTP delivery engine.
//!
//! One synchronous delivery attempt per call over a fresh STARTTLS
//! connection. Transport failures are logged and reported as a `false`
//! result; they never propagate to the caller as errors.

use crate::config::SmtpConfig;
use crate::error::{MailerError, MailerResult};
use crate::models::OutgoingEmail;
use lettre::address::Envelope;
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Bound on the whole handshake/send sequence, enforced by the transport.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP delivery engine.
///
/// Holds only the immutable transport configuration; every call operates on
/// request-scoped data, so a single instance is shared across handlers.
pub struct EmailSender {
    config: SmtpConfig,
}

impl EmailSender {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Deliver one message.
    ///
    /// Returns `false` without any network activity when `to` is empty, and
    /// `true` without any network activity in sandbox mode. Otherwise one
    /// delivery attempt is made; any failure (connection, auth, protocol)
    /// is logged and reported as `false`.
    pub async fn send(&self, email: OutgoingEmail) -> bool {
        if email.to.is_empty() {
            warn!("Refusing to send email without recipients");
            return false;
        }

        if self.config.sandbox {
            info!(
                to = ?email.to,
                subject = %email.subject,
                "Sandbox mode enabled, skipping SMTP delivery"
            );
            return true;
        }

        let recipient_count = email.to.len() + email.cc.len() + email.bcc.len();
        match self.deliver(&email).await {
            Ok(()) => true,
            Err(err) => {
                error!(
                    host = %self.config.host,
                    port = self.config.port,
                    recipient_count,
                    error = %err,
                    "Failed to send email"
                );
                false
            }
        }
    }

    async fn deliver(&self, email: &OutgoingEmail) -> MailerResult<()> {
        let sender = email
            .from
            .clone()
            .unwrap_or_else(|| self.config.default_sender.clone());

        let message = build_message(&sender, email)?;
        let envelope = build_envelope(&sender, email)?;

        debug!(
            host = %self.config.host,
            port = self.config.port,
            recipients = envelope.to().len(),
            "Opening SMTP session"
        );

        let transport = self.transport()?;
        transport.send_raw(&envelope, &message.formatted()).await?;

        info!(
            subject = %email.subject,
            recipients = envelope.to().len(),
            "Email accepted by SMTP server"
        );
        Ok(())
    }

    /// Build a fresh transport for this call: STARTTLS, fixed timeout, AUTH
    /// only when a username is configured. No pooling or session reuse; the
    /// connection is dropped when the transport goes out of scope.
    fn transport(&self) -> MailerResult<AsyncSmtpTransport<Tokio1Executor>> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .timeout(Some(SEND_TIMEOUT));

        if self.config.requires_auth() {
            builder = builder.credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ));
        }

        Ok(builder.build())
    }
}

fn parse_mailbox(addr: &str) -> MailerResult<Mailbox> {
    addr.parse()
        .map_err(|_| MailerError::InvalidAddress(addr.to_string()))
}

fn parse_address(addr: &str) -> MailerResult<Address> {
    addr.parse()
        .map_err(|_| MailerError::InvalidAddress(addr.to_string()))
}

/// Build the wire-format message.
///
/// Headers carry `From`/`To`/`Cc`/`Subject` only; a `Bcc` header would leak
/// those recipients to everyone else. The body is multipart/alternative
/// with the plain-text part first, so the HTML part, listed last, is the
/// preferred rendering while text-only clients still degrade gracefully.
fn build_message(sender: &str, email: &OutgoingEmail) -> MailerResult<Message> {
    let mut builder = Message::builder()
        .from(parse_mailbox(sender)?)
        .subject(&email.subject);

    for to in &email.to {
        builder = builder.to(parse_mailbox(to)?);
    }
    for cc in &email.cc {
        builder = builder.cc(parse_mailbox(cc)?);
    }

    let message = match &email.text_body {
        Some(text) => builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text.clone()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(email.html_body.clone()),
                ),
        )?,
        None => builder
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())?,
    };

    Ok(message)
}

/// Build the SMTP envelope: sender plus the union of to, cc and bcc.
fn build_envelope(sender: &str, email: &OutgoingEmail) -> MailerResult<Envelope> {
    let from = parse_address(sender)?;

    let mut recipients = Vec::with_capacity(email.to.len() + email.cc.len() + email.bcc.len());
    for addr in email.to.iter().chain(&email.cc).chain(&email.bcc) {
        recipients.push(parse_address(addr)?);
    }

    Ok(Envelope::new(Some(from), recipients)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox_config() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            username: String::new(),
            password: String::new(),
            default_sender: "noreply@example.com".to_string(),
            sandbox: true,
        }
    }

    /// Port 1 refuses connections, so a live send fails fast.
    fn unreachable_config() -> SmtpConfig {
        SmtpConfig {
            sandbox: false,
            port: 1,
            ..sandbox_config()
        }
    }

    #[tokio::test]
    async fn test_send_no_recipients_returns_false() {
        let sender = EmailSender::new(sandbox_config());
        let email = OutgoingEmail::new(Vec::<String>::new(), "Subject", "<p>Body</p>");
        assert!(!sender.send(email).await);
    }

    #[tokio::test]
    async fn test_send_no_recipients_returns_false_outside_sandbox() {
        let sender = EmailSender::new(unreachable_config());
        let email = OutgoingEmail::new(Vec::<String>::new(), "Subject", "<p>Body</p>");
        assert!(!sender.send(email).await);
    }

    #[tokio::test]
    async fn test_send_sandbox_mode_returns_true() {
        let sender = EmailSender::new(sandbox_config());
        let email = OutgoingEmail::new("test@example.com", "Subject", "<p>Body</p>");
        assert!(sender.send(email).await);
    }

    #[tokio::test]
    async fn test_send_transport_failure_returns_false() {
        let sender = EmailSender::new(unreachable_config());
        let email = OutgoingEmail::new("test@example.com", "Subject", "<p>Body</p>")
            .with_text("Body");
        assert!(!sender.send(email).await);
    }

    #[tokio::test]
    async fn test_send_invalid_address_returns_false() {
        let sender = EmailSender::new(unreachable_config());
        let email = OutgoingEmail::new("not-an-address", "Subject", "<p>Body</p>");
        assert!(!sender.send(email).await);
    }

    #[test]
    fn test_message_headers_exclude_bcc() {
        let email = OutgoingEmail::new("a@example.com", "Subject", "<p>Hello</p>")
            .with_text("Hello")
            .with_cc("b@example.com")
            .with_bcc("c@example.com");

        let message = build_message("noreply@example.com", &email).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("a@example.com"));
        assert!(formatted.contains("b@example.com"));
        assert!(!formatted.contains("c@example.com"));
    }

    #[test]
    fn test_envelope_includes_all_recipients() {
        let email = OutgoingEmail::new("a@example.com", "Subject", "<p>Hello</p>")
            .with_cc("b@example.com")
            .with_bcc("c@example.com");

        let envelope = build_envelope("noreply@example.com", &email).unwrap();
        let recipients: Vec<String> = envelope.to().iter().map(|a| a.to_string()).collect();

        assert_eq!(recipients, vec!["a@example.com", "b@example.com", "c@example.com"]);
    }

    #[test]
    fn test_message_text_part_precedes_html_part() {
        let email = OutgoingEmail::new("a@example.com", "Subject", "<p>html-marker</p>")
            .with_text("text-marker");

        let message = build_message("noreply@example.com", &email).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        let text_at = formatted.find("text-marker").unwrap();
        let html_at = formatted.find("html-marker").unwrap();
        assert!(text_at < html_at, "plain text part must come first");
    }

    #[test]
    fn test_message_without_text_is_single_html_part() {
        let email = OutgoingEmail::new("a@example.com", "Subject", "<p>Hello</p>");

        let message = build_message("noreply@example.com", &email).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("text/html"));
        assert!(!formatted.contains("multipart/alternative"));
    }

    #[test]
    fn test_build_message_rejects_bad_sender() {
        let email = OutgoingEmail::new("a@example.com", "Subject", "<p>Hello</p>");
        let err = build_message("not an address", &email).unwrap_err();
        assert!(matches!(err, MailerError::InvalidAddress(_)));
    }
}
