//! SMTP transport configuration.
//!
//! Read once from the environment at startup and injected into the sender;
//! never mutated afterwards.

use std::env;

/// SMTP transport settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server host.
    pub host: String,
    /// SMTP server port.
    pub port: u16,
    /// SMTP username. Empty means the server accepts unauthenticated
    /// connections (Mailtrap-style sandboxes) and AUTH is skipped.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Sender address used when a message does not carry its own.
    pub default_sender: String,
    /// When set, `send` short-circuits to success without touching the
    /// network. Driven by the `TESTING` environment variable so upstream
    /// integration suites can run without a live mail transport.
    pub sandbox: bool,
}

impl SmtpConfig {
    /// Load the configuration from environment variables.
    ///
    /// - `SMTP_SERVER` (default `sandbox.smtp.mailtrap.io`)
    /// - `SMTP_PORT` (default `2525`)
    /// - `SMTP_USERNAME` / `SMTP_PASSWORD` (default empty, meaning no auth)
    /// - `DEFAULT_SENDER` (default `payment@example.com`)
    /// - `TESTING` (`true`/`1` enables sandbox mode)
    pub fn from_env() -> Self {
        Self {
            host: env_unquoted("SMTP_SERVER", "sandbox.smtp.mailtrap.io"),
            port: env_unquoted("SMTP_PORT", "2525").parse().unwrap_or(2525),
            username: env_unquoted("SMTP_USERNAME", ""),
            password: env_unquoted("SMTP_PASSWORD", ""),
            default_sender: env_unquoted("DEFAULT_SENDER", "payment@example.com"),
            sandbox: env::var("TESTING")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        }
    }

    /// Whether AUTH should be performed during the SMTP handshake.
    pub fn requires_auth(&self) -> bool {
        !self.username.is_empty()
    }
}

fn env_unquoted(key: &str, default: &str) -> String {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    unquote(&value).to_string()
}

/// Strip one matching pair of single quotes wrapping a value.
///
/// Deployments sometimes quote env values defensively ("'smtp.host.com'");
/// the quotes are not part of the value.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("SMTP_SERVER", None::<&str>),
                ("SMTP_PORT", None),
                ("SMTP_USERNAME", None),
                ("SMTP_PASSWORD", None),
                ("DEFAULT_SENDER", None),
                ("TESTING", None),
            ],
            || {
                let config = SmtpConfig::from_env();
                assert_eq!(config.host, "sandbox.smtp.mailtrap.io");
                assert_eq!(config.port, 2525);
                assert_eq!(config.username, "");
                assert_eq!(config.password, "");
                assert_eq!(config.default_sender, "payment@example.com");
                assert!(!config.sandbox);
                assert!(!config.requires_auth());
            },
        );
    }

    #[test]
    fn test_custom_values() {
        temp_env::with_vars(
            [
                ("SMTP_SERVER", Some("'custom.smtp.com'")),
                ("SMTP_PORT", Some("587")),
                ("SMTP_USERNAME", Some("'mail_user'")),
                ("SMTP_PASSWORD", Some("'mail_pass'")),
                ("DEFAULT_SENDER", Some("billing@example.com")),
            ],
            || {
                let config = SmtpConfig::from_env();
                assert_eq!(config.host, "custom.smtp.com");
                assert_eq!(config.port, 587);
                assert_eq!(config.username, "mail_user");
                assert_eq!(config.password, "mail_pass");
                assert_eq!(config.default_sender, "billing@example.com");
                assert!(config.requires_auth());
            },
        );
    }

    #[test]
    fn test_sandbox_flag_parsing() {
        for (value, expected) in [("true", true), ("True", true), ("1", true), ("0", false), ("no", false)] {
            temp_env::with_var("TESTING", Some(value), || {
                assert_eq!(SmtpConfig::from_env().sandbox, expected, "TESTING={}", value);
            });
        }
    }

    #[test]
    fn test_unquote_only_strips_matching_pairs() {
        assert_eq!(unquote("'quoted.server.com'"), "quoted.server.com");
        assert_eq!(unquote("plain.server.com"), "plain.server.com");
        assert_eq!(unquote("'unbalanced"), "'unbalanced");
        assert_eq!(unquote("unbalanced'"), "unbalanced'");
        assert_eq!(unquote("'"), "'");
        assert_eq!(unquote(""), "");
    }
}
