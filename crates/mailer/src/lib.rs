//! Mail delivery for attendance reports.
//!
//! The [`MailTransport`] trait is the seam between report dispatch and the
//! outside world. Two implementations exist: [`SmtpMailer`] talks to a real
//! SMTP relay via `lettre`, and [`SandboxMailer`] captures messages in an
//! in-memory outbox and hands back preview locators. Which one runs is a
//! process-start decision made by [`MailerConfig::from_env`], never per
//! request.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod sandbox;
pub mod smtp;
pub mod transport;

pub use config::{MailMode, MailerConfig};
pub use dispatch::{DispatchOutcome, DispatchSummary, ReportDispatcher};
pub use error::MailerError;
pub use sandbox::SandboxMailer;
pub use smtp::SmtpMailer;
pub use transport::{MailTransport, OutgoingEmail, SendReceipt};
