//! The transport seam: one message out, one receipt back.

use async_trait::async_trait;

use crate::error::MailerError;

/// A fully-assembled report mail for a single recipient.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body_text: String,
    /// Attachment filename, e.g. `report_12-06-2024.csv`.
    pub attachment_name: String,
    /// CSV payload attached as `text/csv`.
    pub attachment_csv: String,
}

/// Proof of a completed send.
#[derive(Debug, Clone, Default)]
pub struct SendReceipt {
    /// Where the message can be inspected. Sandbox sends produce a
    /// `sandbox://outbox/<id>` locator; live SMTP has nothing to point at.
    pub preview_url: Option<String>,
}

/// Delivers one message to one recipient.
///
/// Implementations must not share failure state between calls: the
/// dispatcher relies on each send being independently judged.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailerError>;
}
