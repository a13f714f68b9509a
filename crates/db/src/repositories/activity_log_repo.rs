//! Repository for the `activity_logs` table.

use sqlx::PgPool;

use crate::models::activity_log::{ActivityLog, ActivityQuery, CreateActivityLog};

/// Column list for `activity_logs` SELECT queries.
const COLUMNS: &str = "\
    id, actor_id, actor_email, action, module, description, details, created_at";

/// Provides append and query operations for the activity trail.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append an entry.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs \
                (actor_id, actor_email, action, module, description, details) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(&dto.actor_id)
            .bind(&dto.actor_email)
            .bind(&dto.action)
            .bind(&dto.module)
            .bind(&dto.description)
            .bind(&dto.details)
            .fetch_one(pool)
            .await
    }

    /// List entries, newest first, with filtering and pagination.
    pub async fn query(
        pool: &PgPool,
        params: &ActivityQuery,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let limit = params.limit.unwrap_or(50).min(500);
        let offset = params.offset.unwrap_or(0);

        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;
        let mut bind_values: Vec<String> = Vec::new();

        if let Some(ref module) = params.module {
            conditions.push(format!("module = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(module.clone());
        }

        if let Some(ref action) = params.action {
            conditions.push(format!("action = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(action.clone());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs {where_clause}\
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, ActivityLog>(&query);
        for val in &bind_values {
            q = q.bind(val.as_str());
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }
}
