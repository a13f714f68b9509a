//! Simulation transport: an in-memory outbox.
//!
//! Every send is captured instead of delivered and yields a
//! `sandbox://outbox/<id>` locator, so operators can exercise the whole
//! dispatch path (rendering, attachment naming, per-recipient outcomes)
//! without mailing anyone.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::MailerError;
use crate::transport::{MailTransport, OutgoingEmail, SendReceipt};

/// A message held in the sandbox outbox.
#[derive(Debug, Clone)]
pub struct SandboxMessage {
    pub id: Uuid,
    pub to: String,
    pub subject: String,
    pub body_text: String,
    pub attachment_name: String,
    pub attachment_csv: String,
    pub preview_url: String,
}

/// Captures outgoing mail in memory.
#[derive(Default)]
pub struct SandboxMailer {
    outbox: Mutex<Vec<SandboxMessage>>,
}

impl SandboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, in send order.
    pub async fn messages(&self) -> Vec<SandboxMessage> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl MailTransport for SandboxMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailerError> {
        let id = Uuid::new_v4();
        let preview_url = format!("sandbox://outbox/{id}");

        let message = SandboxMessage {
            id,
            to: email.to.clone(),
            subject: email.subject.clone(),
            body_text: email.body_text.clone(),
            attachment_name: email.attachment_name.clone(),
            attachment_csv: email.attachment_csv.clone(),
            preview_url: preview_url.clone(),
        };
        self.outbox.lock().await.push(message);

        tracing::info!(to = %email.to, %preview_url, "Report email captured in sandbox");
        Ok(SendReceipt {
            preview_url: Some(preview_url),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
