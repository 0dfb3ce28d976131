//! Data models for outbound mail.

use serde::{Deserialize, Serialize};

/// A single address or a list of addresses.
///
/// Callers may submit either shape on the wire; `into_vec` normalizes to a
/// list at the engine boundary before any delivery logic runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressList {
    One(String),
    Many(Vec<String>),
}

impl AddressList {
    /// Normalize to a canonical list of addresses.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            AddressList::One(addr) => vec![addr],
            AddressList::Many(addrs) => addrs,
        }
    }
}

impl From<&str> for AddressList {
    fn from(addr: &str) -> Self {
        AddressList::One(addr.to_string())
    }
}

impl From<String> for AddressList {
    fn from(addr: String) -> Self {
        AddressList::One(addr)
    }
}

impl From<Vec<String>> for AddressList {
    fn from(addrs: Vec<String>) -> Self {
        AddressList::Many(addrs)
    }
}

/// A message ready for delivery.
///
/// `to`/`cc`/`bcc` are already normalized to lists. The visible headers are
/// built from `to` and `cc` only; `bcc` recipients are added to the SMTP
/// envelope without ever appearing in the message itself.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub text_body: Option<String>,
    /// Sender address; the configured default applies when absent.
    pub from: Option<String>,
}

impl OutgoingEmail {
    /// Create a new message with required fields.
    pub fn new(
        to: impl Into<AddressList>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into().into_vec(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: subject.into(),
            html_body: html_body.into(),
            text_body: None,
            from: None,
        }
    }

    /// Set the plain-text body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_body = Some(text.into());
        self
    }

    /// Set CC recipients.
    pub fn with_cc(mut self, cc: impl Into<AddressList>) -> Self {
        self.cc = cc.into().into_vec();
        self
    }

    /// Set BCC recipients.
    pub fn with_bcc(mut self, bcc: impl Into<AddressList>) -> Self {
        self.bcc = bcc.into().into_vec();
        self
    }

    /// Override the sender address.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}
