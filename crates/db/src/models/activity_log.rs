//! Activity log entity models.
//!
//! Append-only trail of who did what. Entries have no `updated_at`
//! (immutable records). Actor identity comes from the outer auth layer via
//! request headers and may be absent for system-initiated actions.

use cantina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single activity log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub actor_id: Option<String>,
    pub actor_email: Option<String>,
    pub action: String,
    pub module: String,
    pub description: String,
    pub details: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for appending an activity log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityLog {
    pub actor_id: Option<String>,
    pub actor_email: Option<String>,
    pub action: String,
    pub module: String,
    pub description: String,
    pub details: Option<serde_json::Value>,
}

/// Filter parameters for listing activity log entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub module: Option<String>,
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
