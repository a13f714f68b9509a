//! Mailer configuration loaded from environment variables.

use cantina_core::render::DEFAULT_CSV_SEPARATOR;

use crate::error::MailerError;

/// Which transport the process runs with. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailMode {
    /// Real SMTP delivery.
    Live,
    /// In-memory outbox with preview locators; nothing leaves the process.
    Sandbox,
}

impl MailMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MailMode::Live => "live",
            MailMode::Sandbox => "sandbox",
        }
    }
}

/// SMTP connection settings, present only in live mode.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// RFC 5322 "From" address.
    pub from_address: String,
}

/// Configuration for report mail delivery.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub mode: MailMode,
    /// `Some` exactly when `mode` is [`MailMode::Live`].
    pub smtp: Option<SmtpSettings>,
    /// Field separator for the CSV attachment.
    pub csv_separator: char,
}

impl MailerConfig {
    /// Load configuration from environment variables.
    ///
    /// Live mode is opt-in and validated eagerly: a missing credential must
    /// surface at startup, not as a partial dispatch failure at 07:30.
    ///
    /// | Env Var         | Default   |
    /// |-----------------|-----------|
    /// | `MAIL_MODE`     | `sandbox` |
    /// | `CSV_SEPARATOR` | `;`       |
    ///
    /// Live mode additionally requires `SMTP_HOST`, `SMTP_PORT`,
    /// `SMTP_USER`, `SMTP_PASSWORD` and `MAIL_FROM`.
    pub fn from_env() -> Result<Self, MailerError> {
        let mode = match std::env::var("MAIL_MODE").as_deref() {
            Ok("live") => MailMode::Live,
            Ok("sandbox") | Err(_) => MailMode::Sandbox,
            Ok(other) => {
                return Err(MailerError::Configuration(format!(
                    "unknown MAIL_MODE '{other}' (expected 'live' or 'sandbox')"
                )))
            }
        };

        let smtp = match mode {
            MailMode::Live => Some(Self::smtp_settings_from_env()?),
            MailMode::Sandbox => None,
        };

        let csv_separator = match std::env::var("CSV_SEPARATOR") {
            Ok(s) if s.chars().count() == 1 => s.chars().next().unwrap_or(DEFAULT_CSV_SEPARATOR),
            Ok(s) => {
                return Err(MailerError::Configuration(format!(
                    "CSV_SEPARATOR must be a single character, got '{s}'"
                )))
            }
            Err(_) => DEFAULT_CSV_SEPARATOR,
        };

        Ok(Self {
            mode,
            smtp,
            csv_separator,
        })
    }

    fn smtp_settings_from_env() -> Result<SmtpSettings, MailerError> {
        let mut missing: Vec<&str> = Vec::new();
        let mut require = |name: &'static str| -> String {
            match std::env::var(name) {
                Ok(value) if !value.trim().is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let host = require("SMTP_HOST");
        let port_raw = require("SMTP_PORT");
        let user = require("SMTP_USER");
        let password = require("SMTP_PASSWORD");
        let from_address = require("MAIL_FROM");

        if !missing.is_empty() {
            return Err(MailerError::Configuration(format!(
                "live mail mode requires {}",
                missing.join(", ")
            )));
        }

        let port: u16 = port_raw.parse().map_err(|_| {
            MailerError::Configuration(format!("SMTP_PORT must be a port number, got '{port_raw}'"))
        })?;

        Ok(SmtpSettings {
            host,
            port,
            user,
            password,
            from_address,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
