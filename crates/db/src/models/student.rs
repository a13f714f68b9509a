//! Student roster entity models.
//!
//! The roster is owned by an external enrollment system; this service reads
//! it for registration and reporting, and writes to it only when the
//! deduplication job deactivates a duplicate row.

use cantina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A roster row. `plan` holds a consumption plan storage string
/// (`unlimited`, `weekly_5` .. `weekly_2`, `adhoc`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    pub name: String,
    pub group_name: String,
    /// Enrollment identifier; the deduplication key.
    pub enrollment_code: String,
    pub plan: String,
    pub is_active: bool,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a roster row (test fixtures and imports).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub name: String,
    pub group_name: String,
    pub enrollment_code: String,
    pub plan: String,
    pub note: Option<String>,
}
