//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Wraps any serializable payload in the project's standard response format.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: records }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Envelope for scheduler-driven and administrative jobs.
///
/// A job responds with 200 whether it ran or skipped; `success` tells the
/// caller which happened and `message` says why. `data` carries the job
/// outcome when one exists.
#[derive(Debug, Serialize)]
pub struct JobResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> JobResponse<T> {
    /// The job ran; `data` holds its outcome.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// The job did not run (preconditions unmet). Not an error.
    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
