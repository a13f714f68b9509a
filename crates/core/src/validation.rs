//! Input validation for the report configuration document.
//!
//! Server-side validation runs on every save regardless of what the client
//! already checked.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Pragmatic email shape check: one `@`, no whitespace, dotted domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// Scheduled-time shape: zero-padded 24h `HH:MM`.
static SCHEDULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("valid regex"));

/// Whether `email` looks like a deliverable address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether `time` is a valid `HH:MM` schedule string.
pub fn is_valid_schedule_time(time: &str) -> bool {
    SCHEDULE_RE.is_match(time)
}

/// Validate a recipient list: non-empty, every entry a valid address.
pub fn validate_recipients(emails: &[String]) -> Result<(), CoreError> {
    if emails.is_empty() {
        return Err(CoreError::Validation(
            "At least one recipient email is required".to_string(),
        ));
    }
    for email in emails {
        if !is_valid_email(email) {
            return Err(CoreError::Validation(format!(
                "Invalid recipient email: '{email}'"
            )));
        }
    }
    Ok(())
}

/// Validate a schedule string against the `HH:MM` pattern.
pub fn validate_schedule_time(time: &str) -> Result<(), CoreError> {
    if !is_valid_schedule_time(time) {
        return Err(CoreError::Validation(format!(
            "Invalid scheduled time: '{time}' (want HH:MM, 00:00-23:59)"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Email pattern
    // -----------------------------------------------------------------------

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("kitchen@school.edu"));
        assert!(is_valid_email("first.last+tag@sub.domain.com.br"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@signs.com"));
        assert!(!is_valid_email("spaces in@addr.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    // -----------------------------------------------------------------------
    // Schedule pattern
    // -----------------------------------------------------------------------

    #[test]
    fn accepts_zero_padded_times() {
        assert!(is_valid_schedule_time("00:00"));
        assert!(is_valid_schedule_time("07:30"));
        assert!(is_valid_schedule_time("19:05"));
        assert!(is_valid_schedule_time("23:59"));
    }

    #[test]
    fn rejects_out_of_range_times() {
        assert!(!is_valid_schedule_time("24:00"));
        assert!(!is_valid_schedule_time("12:60"));
    }

    #[test]
    fn rejects_unpadded_and_garbage_times() {
        assert!(!is_valid_schedule_time("7:30"));
        assert!(!is_valid_schedule_time("0730"));
        assert!(!is_valid_schedule_time("noon"));
        assert!(!is_valid_schedule_time(""));
    }

    // -----------------------------------------------------------------------
    // Recipient list
    // -----------------------------------------------------------------------

    #[test]
    fn empty_recipient_list_is_rejected() {
        let err = validate_recipients(&[]).unwrap_err();
        assert!(err.to_string().contains("At least one"));
    }

    #[test]
    fn one_bad_recipient_fails_the_list() {
        let emails = vec!["good@x.com".to_string(), "bad".to_string()];
        let err = validate_recipients(&emails).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn all_valid_recipients_pass() {
        let emails = vec!["a@x.com".to_string(), "b@x.com".to_string()];
        assert!(validate_recipients(&emails).is_ok());
    }
}
