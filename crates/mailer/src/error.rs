//! Error type for mail configuration and delivery failures.

/// Error type for mail configuration and delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    /// The environment does not describe a usable transport. Fatal at
    /// process start; never raised during a send.
    #[error("Mailer configuration error: {0}")]
    Configuration(String),

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// A single send exceeded the per-recipient deadline.
    #[error("Send timed out after {0} seconds")]
    Timeout(u64),
}
