//! Template rendering engine.
//!
//! Handlebars-based rendering over a fixed catalog of transactional
//! templates. The catalog is registered once at construction; a broken
//! template source is an error at startup, not at send time.

use crate::error::{MailerError, MailerResult};
use handlebars::Handlebars;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Subject returned for template ids that have no catalog entry.
const FALLBACK_SUBJECT: &str = "Notification";

/// Body substituted when a plain-text source is missing or fails to render.
const TEXT_FALLBACK_NOTICE: &str =
    "Please view this message in an HTML-compatible email client.";

struct TemplateSpec {
    id: &'static str,
    subject: &'static str,
    html: &'static str,
    text: &'static str,
}

/// Template engine for the notification catalog.
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    subjects: HashMap<&'static str, &'static str>,
}

impl TemplateEngine {
    /// Create a new engine with the full catalog registered.
    ///
    /// Any registration failure is returned to the caller; process startup
    /// should treat it as fatal.
    pub fn new() -> MailerResult<Self> {
        let mut handlebars = Handlebars::new();
        let mut subjects = HashMap::new();

        for spec in CATALOG {
            handlebars.register_template_string(&format!("{}_html", spec.id), spec.html)?;
            handlebars.register_template_string(&format!("{}_text", spec.id), spec.text)?;
            subjects.insert(spec.id, spec.subject);
        }

        Ok(Self {
            handlebars,
            subjects,
        })
    }

    /// Render both bodies for a template.
    ///
    /// Unknown ids and HTML render failures are errors. A failing text body
    /// falls back to a fixed notice instead, so the call either yields both
    /// bodies or errors before producing anything.
    pub fn render(
        &self,
        template_id: &str,
        data: &HashMap<String, String>,
    ) -> MailerResult<(String, String)> {
        if !self.subjects.contains_key(template_id) {
            return Err(MailerError::TemplateNotFound(template_id.to_string()));
        }

        debug!(template_id = %template_id, "Rendering template");

        let html = self.handlebars.render(&format!("{}_html", template_id), data)?;
        let text = self.render_text(template_id, data);

        Ok((html, text))
    }

    fn render_text(&self, template_id: &str, data: &HashMap<String, String>) -> String {
        match self.handlebars.render(&format!("{}_text", template_id), data) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    template_id = %template_id,
                    error = %err,
                    "Plain-text body failed to render, using fallback notice"
                );
                TEXT_FALLBACK_NOTICE.to_string()
            }
        }
    }

    /// The raw subject pattern for a template, or `"Notification"` for
    /// unknown ids. A display fallback, never an error.
    pub fn subject(&self, template_id: &str) -> String {
        self.subjects
            .get(template_id)
            .map(|s| s.to_string())
            .unwrap_or_else(|| FALLBACK_SUBJECT.to_string())
    }
}

/// Replace every `{{key}}` token in a subject pattern with its value.
///
/// Callers apply this only when no explicit subject override was supplied;
/// an override is always used verbatim.
pub fn substitute_subject(pattern: &str, data: &HashMap<String, String>) -> String {
    let mut subject = pattern.to_string();
    for (key, value) in data {
        let token = format!("{{{{{}}}}}", key);
        subject = subject.replace(&token, value);
    }
    subject
}

// ============================================================================
// Notification Catalog
// ============================================================================

const CATALOG: &[TemplateSpec] = &[
    TemplateSpec {
        id: "payment_created",
        subject: "Payment Created - {{payment_id}}",
        html: PAYMENT_CREATED_HTML,
        text: PAYMENT_CREATED_TEXT,
    },
    TemplateSpec {
        id: "payment_success",
        subject: "Payment Successful - {{payment_id}}",
        html: PAYMENT_SUCCESS_HTML,
        text: PAYMENT_SUCCESS_TEXT,
    },
    TemplateSpec {
        id: "payment_failed",
        subject: "Payment Failed - {{payment_id}}",
        html: PAYMENT_FAILED_HTML,
        text: PAYMENT_FAILED_TEXT,
    },
    TemplateSpec {
        id: "application_created",
        subject: "Application Received - {{application_id}}",
        html: APPLICATION_CREATED_HTML,
        text: APPLICATION_CREATED_TEXT,
    },
    TemplateSpec {
        id: "application_approved",
        subject: "Application Approved - {{application_id}}",
        html: APPLICATION_APPROVED_HTML,
        text: APPLICATION_APPROVED_TEXT,
    },
    TemplateSpec {
        id: "application_rejected",
        subject: "Application Rejected - {{application_id}}",
        html: APPLICATION_REJECTED_HTML,
        text: APPLICATION_REJECTED_TEXT,
    },
    TemplateSpec {
        id: "application_deleted",
        subject: "Application Deleted - {{application_id}}",
        html: APPLICATION_DELETED_HTML,
        text: APPLICATION_DELETED_TEXT,
    },
];

const PAYMENT_CREATED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Payment Created</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #18181b; font-size: 24px; font-weight: 600; margin: 0 0 16px 0; text-align: center;">
          Payment Created
        </h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; margin: 0 0 24px 0; text-align: center;">
          A payment for {{service_name}} has been created and is awaiting completion.
        </p>
        <table width="100%" cellspacing="0" cellpadding="0" style="margin-bottom: 24px;">
          <tr>
            <td style="background-color: #f4f4f5; border-radius: 6px; padding: 16px;">
              <p style="color: #52525b; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Payment ID:</strong> {{payment_id}}
              </p>
              <p style="color: #52525b; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Service:</strong> {{service_name}}
              </p>
              <p style="color: #52525b; font-size: 14px; margin: 0;">
                <strong>Amount:</strong> {{amount}}
              </p>
            </td>
          </tr>
        </table>
        {{#if due_date}}
        <table width="100%" cellspacing="0" cellpadding="0">
          <tr>
            <td style="background-color: #fef3c7; border-radius: 6px; padding: 16px; border-left: 4px solid #f59e0b;">
              <p style="color: #92400e; font-size: 14px; margin: 0;">
                <strong>Due date:</strong> {{due_date}}
              </p>
            </td>
          </tr>
        </table>
        {{/if}}
      </td>
    </tr>
  </table>
</body>
</html>"#;

const PAYMENT_CREATED_TEXT: &str = r#"Payment Created

A payment for {{service_name}} has been created and is awaiting completion.

Payment ID: {{payment_id}}
Service: {{service_name}}
Amount: {{amount}}
{{#if due_date}}
Due date: {{due_date}}
{{/if}}"#;

const PAYMENT_SUCCESS_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Payment Successful</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #166534; font-size: 24px; font-weight: 600; margin: 0 0 16px 0; text-align: center;">
          Payment Successful
        </h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; margin: 0 0 24px 0; text-align: center;">
          Your payment for {{service_name}} has been processed.
        </p>
        <table width="100%" cellspacing="0" cellpadding="0" style="margin-bottom: 24px;">
          <tr>
            <td style="background-color: #f0fdf4; border-radius: 6px; padding: 16px; border-left: 4px solid #22c55e;">
              <p style="color: #166534; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Payment ID:</strong> {{payment_id}}
              </p>
              <p style="color: #166534; font-size: 14px; margin: 0;">
                <strong>Amount:</strong> {{amount}}
              </p>
            </td>
          </tr>
        </table>
        {{#if transaction_id}}
        <p style="color: #71717a; font-size: 13px; margin: 0; text-align: center;">
          Transaction reference: {{transaction_id}}
        </p>
        {{/if}}
      </td>
    </tr>
  </table>
</body>
</html>"#;

const PAYMENT_SUCCESS_TEXT: &str = r#"Payment Successful

Your payment for {{service_name}} has been processed.

Payment ID: {{payment_id}}
Amount: {{amount}}
{{#if transaction_id}}
Transaction reference: {{transaction_id}}
{{/if}}"#;

const PAYMENT_FAILED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Payment Failed</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #991b1b; font-size: 24px; font-weight: 600; margin: 0 0 16px 0; text-align: center;">
          Payment Failed
        </h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; margin: 0 0 24px 0; text-align: center;">
          Your payment for {{service_name}} could not be processed.
        </p>
        <table width="100%" cellspacing="0" cellpadding="0" style="margin-bottom: 24px;">
          <tr>
            <td style="background-color: #f4f4f5; border-radius: 6px; padding: 16px;">
              <p style="color: #52525b; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Payment ID:</strong> {{payment_id}}
              </p>
              <p style="color: #52525b; font-size: 14px; margin: 0;">
                <strong>Amount:</strong> {{amount}}
              </p>
            </td>
          </tr>
        </table>
        {{#if reason}}
        <table width="100%" cellspacing="0" cellpadding="0">
          <tr>
            <td style="background-color: #fef2f2; border-radius: 6px; padding: 16px; border-left: 4px solid #dc2626;">
              <p style="color: #991b1b; font-size: 14px; margin: 0;">
                <strong>Reason:</strong> {{reason}}
              </p>
            </td>
          </tr>
        </table>
        {{/if}}
      </td>
    </tr>
  </table>
</body>
</html>"#;

const PAYMENT_FAILED_TEXT: &str = r#"Payment Failed

Your payment for {{service_name}} could not be processed.

Payment ID: {{payment_id}}
Amount: {{amount}}
{{#if reason}}
Reason: {{reason}}
{{/if}}"#;

const APPLICATION_CREATED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Application Received</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #18181b; font-size: 24px; font-weight: 600; margin: 0 0 16px 0; text-align: center;">
          Application Received
        </h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; margin: 0 0 24px 0; text-align: center;">
          Your application for {{service_name}} has been received and is under review.
        </p>
        <table width="100%" cellspacing="0" cellpadding="0">
          <tr>
            <td style="background-color: #f4f4f5; border-radius: 6px; padding: 16px;">
              <p style="color: #52525b; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Application ID:</strong> {{application_id}}
              </p>
              <p style="color: #52525b; font-size: 14px; margin: 0;">
                <strong>Amount:</strong> {{amount}}
              </p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#;

const APPLICATION_CREATED_TEXT: &str = r#"Application Received

Your application for {{service_name}} has been received and is under review.

Application ID: {{application_id}}
Amount: {{amount}}"#;

const APPLICATION_APPROVED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Application Approved</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #166534; font-size: 24px; font-weight: 600; margin: 0 0 16px 0; text-align: center;">
          Application Approved
        </h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; margin: 0 0 24px 0; text-align: center;">
          Your application for {{service_name}} has been approved.
        </p>
        <table width="100%" cellspacing="0" cellpadding="0" style="margin-bottom: 24px;">
          <tr>
            <td style="background-color: #f0fdf4; border-radius: 6px; padding: 16px; border-left: 4px solid #22c55e;">
              <p style="color: #166534; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Application ID:</strong> {{application_id}}
              </p>
              <p style="color: #166534; font-size: 14px; margin: 0;">
                <strong>Amount:</strong> {{amount}}
              </p>
            </td>
          </tr>
        </table>
        {{#if payment_id}}
        <p style="color: #71717a; font-size: 13px; margin: 0; text-align: center;">
          A payment has been created for this application: {{payment_id}}
        </p>
        {{/if}}
      </td>
    </tr>
  </table>
</body>
</html>"#;

const APPLICATION_APPROVED_TEXT: &str = r#"Application Approved

Your application for {{service_name}} has been approved.

Application ID: {{application_id}}
Amount: {{amount}}
{{#if payment_id}}
A payment has been created for this application: {{payment_id}}
{{/if}}"#;

const APPLICATION_REJECTED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Application Rejected</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #991b1b; font-size: 24px; font-weight: 600; margin: 0 0 16px 0; text-align: center;">
          Application Rejected
        </h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; margin: 0 0 24px 0; text-align: center;">
          Your application for {{service_name}} was not approved.
        </p>
        <table width="100%" cellspacing="0" cellpadding="0" style="margin-bottom: 24px;">
          <tr>
            <td style="background-color: #f4f4f5; border-radius: 6px; padding: 16px;">
              <p style="color: #52525b; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Application ID:</strong> {{application_id}}
              </p>
              <p style="color: #52525b; font-size: 14px; margin: 0;">
                <strong>Amount:</strong> {{amount}}
              </p>
            </td>
          </tr>
        </table>
        {{#if reason}}
        <table width="100%" cellspacing="0" cellpadding="0">
          <tr>
            <td style="background-color: #fef2f2; border-radius: 6px; padding: 16px; border-left: 4px solid #dc2626;">
              <p style="color: #991b1b; font-size: 14px; margin: 0;">
                <strong>Reason:</strong> {{reason}}
              </p>
            </td>
          </tr>
        </table>
        {{/if}}
      </td>
    </tr>
  </table>
</body>
</html>"#;

const APPLICATION_REJECTED_TEXT: &str = r#"Application Rejected

Your application for {{service_name}} was not approved.

Application ID: {{application_id}}
Amount: {{amount}}
{{#if reason}}
Reason: {{reason}}
{{/if}}"#;

const APPLICATION_DELETED_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Application Deleted</title>
</head>
<body style="margin: 0; padding: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f4f4f5;">
  <table role="presentation" width="100%" cellspacing="0" cellpadding="0" style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <tr>
      <td style="background-color: #ffffff; border-radius: 8px; padding: 40px; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="color: #18181b; font-size: 24px; font-weight: 600; margin: 0 0 16px 0; text-align: center;">
          Application Deleted
        </h1>
        <p style="color: #52525b; font-size: 16px; line-height: 24px; margin: 0 0 24px 0; text-align: center;">
          Your application for {{service_name}} has been deleted. No further action will be taken.
        </p>
        <table width="100%" cellspacing="0" cellpadding="0">
          <tr>
            <td style="background-color: #f4f4f5; border-radius: 6px; padding: 16px;">
              <p style="color: #52525b; font-size: 14px; margin: 0 0 8px 0;">
                <strong>Application ID:</strong> {{application_id}}
              </p>
              <p style="color: #52525b; font-size: 14px; margin: 0;">
                <strong>Amount:</strong> {{amount}}
              </p>
            </td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>"#;

const APPLICATION_DELETED_TEXT: &str = r#"Application Deleted

Your application for {{service_name}} has been deleted. No further action will be taken.

Application ID: {{application_id}}
Amount: {{amount}}"#;
