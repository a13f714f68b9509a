//! Live SMTP delivery via `lettre`.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpSettings;
use crate::error::MailerError;
use crate::transport::{MailTransport, OutgoingEmail, SendReceipt};

/// Sends report mail through a real SMTP relay (STARTTLS).
#[derive(Debug)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the relay connection from validated settings.
    ///
    /// Fails when the host cannot be used as a relay or the `From` address
    /// does not parse, so a broken configuration stops the process at
    /// startup instead of at dispatch time.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailerError> {
        let from: Mailbox = settings
            .from_address
            .parse()
            .map_err(|e| MailerError::Configuration(format!("MAIL_FROM: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailerError> {
        let csv_type = ContentType::parse("text/csv; charset=utf-8")
            .map_err(|e| MailerError::Build(e.to_string()))?;
        let attachment = Attachment::new(email.attachment_name.clone())
            .body(email.attachment_csv.clone().into_bytes(), csv_type);

        Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(&email.subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(email.body_text.clone()))
                    .singlepart(attachment),
            )
            .map_err(|e| MailerError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailerError> {
        let message = self.build_message(email)?;
        self.transport.send(message).await?;
        tracing::info!(to = %email.to, subject = %email.subject, "Report email sent");
        Ok(SendReceipt::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.school.example".to_string(),
            port: 587,
            user: "reports".to_string(),
            password: "secret".to_string(),
            from_address: "reports@school.example".to_string(),
        }
    }

    #[test]
    fn construction_rejects_an_unparseable_from_address() {
        let mut bad = settings();
        bad.from_address = "not an address".to_string();
        let err = SmtpMailer::new(&bad).unwrap_err();
        assert!(err.to_string().contains("MAIL_FROM"));
    }

    #[test]
    fn message_assembly_produces_a_multipart_mail() {
        let mailer = SmtpMailer::new(&settings()).unwrap();
        let email = OutgoingEmail {
            to: "kitchen@school.example".to_string(),
            subject: "Daily Meal Report - 12/06/2024".to_string(),
            body_text: "Total students: 2".to_string(),
            attachment_name: "report_12-06-2024.csv".to_string(),
            attachment_csv: "Summary;1\r\n".to_string(),
        };
        let message = mailer.build_message(&email).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();
        assert!(rendered.contains("Daily Meal Report - 12/06/2024"));
        assert!(rendered.contains("report_12-06-2024.csv"));
    }

    #[test]
    fn message_assembly_rejects_a_bad_recipient() {
        let mailer = SmtpMailer::new(&settings()).unwrap();
        let email = OutgoingEmail {
            to: "not an address".to_string(),
            subject: "s".to_string(),
            body_text: "b".to_string(),
            attachment_name: "a.csv".to_string(),
            attachment_csv: String::new(),
        };
        assert!(matches!(
            mailer.build_message(&email),
            Err(MailerError::Address(_))
        ));
    }
}
