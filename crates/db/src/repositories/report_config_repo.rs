//! Repository for the `report_configs` singleton.

use sqlx::PgPool;

use crate::models::report_config::{ReportConfig, UpdateReportConfig};

/// Column list for `report_configs` SELECT queries.
const COLUMNS: &str = "id, recipient_emails, scheduled_time, is_active, updated_at";

/// The singleton row id. Migrations seed it, so reads normally succeed.
const SINGLETON_ID: i64 = 1;

/// Provides access to the dispatch configuration.
pub struct ReportConfigRepo;

impl ReportConfigRepo {
    /// Fetch the configuration row.
    pub async fn get(pool: &PgPool) -> Result<Option<ReportConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM report_configs WHERE id = $1");
        sqlx::query_as::<_, ReportConfig>(&query)
            .bind(SINGLETON_ID)
            .fetch_optional(pool)
            .await
    }

    /// Replace the configuration document, creating the row if the seed is
    /// missing.
    pub async fn upsert(
        pool: &PgPool,
        dto: &UpdateReportConfig,
    ) -> Result<ReportConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO report_configs (id, recipient_emails, scheduled_time, is_active) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
                recipient_emails = EXCLUDED.recipient_emails, \
                scheduled_time = EXCLUDED.scheduled_time, \
                is_active = EXCLUDED.is_active, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReportConfig>(&query)
            .bind(SINGLETON_ID)
            .bind(&dto.recipient_emails)
            .bind(&dto.scheduled_time)
            .bind(dto.is_active)
            .fetch_one(pool)
            .await
    }
}
