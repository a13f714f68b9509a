//! Report configuration entity models.
//!
//! Singleton row (`id = 1`). The wire format keeps the legacy field names
//! `emails`, `horario` and `ativo` that the scheduler and admin UI were
//! built against; the serde renames below are the compatibility seam.

use cantina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The dispatch configuration: who receives the daily report and when.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportConfig {
    #[serde(skip_serializing)]
    pub id: DbId,
    #[serde(rename = "emails")]
    pub recipient_emails: Vec<String>,
    /// `HH:MM`, 24-hour clock, business timezone.
    #[serde(rename = "horario")]
    pub scheduled_time: String,
    #[serde(rename = "ativo")]
    pub is_active: bool,
    pub updated_at: Timestamp,
}

/// Full-document replacement DTO for `PUT`. Validation happens server-side
/// before this reaches the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateReportConfig {
    #[serde(rename = "emails")]
    pub recipient_emails: Vec<String>,
    #[serde(rename = "horario")]
    pub scheduled_time: String,
    #[serde(rename = "ativo")]
    pub is_active: bool,
}
