//! Per-recipient report fan-out.
//!
//! The dispatcher renders a report once, then sends it to every configured
//! recipient independently. One failed mailbox never stops the others; the
//! caller gets a per-recipient outcome list and decides what to surface.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use cantina_core::render;
use cantina_core::report::Report;

use crate::config::{MailMode, MailerConfig};
use crate::error::MailerError;
use crate::sandbox::SandboxMailer;
use crate::smtp::SmtpMailer;
use crate::transport::{MailTransport, OutgoingEmail};

/// Upper bound on concurrent sends during fan-out.
const MAX_CONCURRENT_SENDS: usize = 4;

/// Deadline for a single recipient's send.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Subject prefix marking sandbox traffic.
const SIMULATION_PREFIX: &str = "[SIMULATION] ";

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// What happened to one recipient.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub recipient: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// Tally of a whole dispatch run. Partial failure is data here, not an
/// error: the run itself always completes.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchSummary {
    pub fn all_delivered(&self) -> bool {
        self.failed == 0
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Fans a rendered report out to a recipient list over one transport.
pub struct ReportDispatcher {
    transport: Arc<dyn MailTransport>,
    mode: MailMode,
    csv_separator: char,
    send_timeout: Duration,
}

impl ReportDispatcher {
    /// Select and construct the transport for the configured mode.
    pub fn from_config(config: &MailerConfig) -> Result<Self, MailerError> {
        let transport: Arc<dyn MailTransport> = match config.mode {
            MailMode::Live => {
                let settings = config.smtp.as_ref().ok_or_else(|| {
                    MailerError::Configuration(
                        "live mail mode without SMTP settings".to_string(),
                    )
                })?;
                Arc::new(SmtpMailer::new(settings)?)
            }
            MailMode::Sandbox => Arc::new(SandboxMailer::new()),
        };
        Ok(Self::new(transport, config.mode, config.csv_separator))
    }

    pub fn new(transport: Arc<dyn MailTransport>, mode: MailMode, csv_separator: char) -> Self {
        Self {
            transport,
            mode,
            csv_separator,
            send_timeout: SEND_TIMEOUT,
        }
    }

    /// Override the per-recipient deadline (tests use short deadlines).
    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    pub fn mode(&self) -> MailMode {
        self.mode
    }

    /// Render `report` once and send it to every recipient.
    ///
    /// Outcomes keep the order of the recipient list. Sends run with
    /// bounded concurrency and an individual deadline each; a timeout or
    /// transport failure becomes a failed outcome for that recipient only.
    pub async fn dispatch(&self, report: &Report, recipients: &[String]) -> DispatchSummary {
        let mut subject = render::subject(report);
        if self.mode == MailMode::Sandbox {
            subject = format!("{SIMULATION_PREFIX}{subject}");
        }
        let body_text = render::render_summary(report);
        let attachment_csv = render::render_csv(report, self.csv_separator);
        let attachment_name = render::export_filename(report.date);

        let emails: Vec<OutgoingEmail> = recipients
            .iter()
            .map(|recipient| OutgoingEmail {
                to: recipient.clone(),
                subject: subject.clone(),
                body_text: body_text.clone(),
                attachment_name: attachment_name.clone(),
                attachment_csv: attachment_csv.clone(),
            })
            .collect();

        let outcomes: Vec<DispatchOutcome> = stream::iter(emails)
            .map(|email| self.send_one(email))
            .buffered(MAX_CONCURRENT_SENDS)
            .collect()
            .await;

        let delivered = outcomes.iter().filter(|o| o.success).count();
        DispatchSummary {
            attempted: outcomes.len(),
            delivered,
            failed: outcomes.len() - delivered,
            outcomes,
        }
    }

    async fn send_one(&self, email: OutgoingEmail) -> DispatchOutcome {
        let result = match tokio::time::timeout(self.send_timeout, self.transport.send(&email))
            .await
        {
            Ok(sent) => sent,
            Err(_) => Err(MailerError::Timeout(self.send_timeout.as_secs())),
        };

        match result {
            Ok(receipt) => DispatchOutcome {
                recipient: email.to,
                success: true,
                error: None,
                preview_url: receipt.preview_url,
            },
            Err(err) => {
                tracing::warn!(to = %email.to, error = %err, "Report email failed");
                DispatchOutcome {
                    recipient: email.to,
                    success: false,
                    error: Some(err.to_string()),
                    preview_url: None,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
