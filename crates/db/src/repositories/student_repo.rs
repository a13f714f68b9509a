//! Repository for the `students` table.

use sqlx::PgPool;

use cantina_core::types::DbId;

use crate::models::student::{CreateStudent, Student};

/// Column list for `students` SELECT queries.
const COLUMNS: &str = "\
    id, name, group_name, enrollment_code, plan, is_active, note, \
    created_at, updated_at";

/// Provides read access to the roster plus the deduplication write path.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a roster row.
    pub async fn create(pool: &PgPool, dto: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (name, group_name, enrollment_code, plan, note) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&dto.name)
            .bind(&dto.group_name)
            .bind(&dto.enrollment_code)
            .bind(&dto.plan)
            .bind(&dto.note)
            .fetch_one(pool)
            .await
    }

    /// Find a student by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the active roster ordered by group then name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM students \
             WHERE is_active = TRUE \
             ORDER BY group_name, name"
        );
        sqlx::query_as::<_, Student>(&query).fetch_all(pool).await
    }

    /// Deactivate a student, appending an explanatory note.
    ///
    /// The `is_active` guard makes repeated deactivation a no-op, so a
    /// rerun of the deduplication job touches nothing. Returns `true` if a
    /// row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId, note: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET \
                is_active = FALSE, \
                note = CASE WHEN note IS NULL OR note = '' \
                            THEN $2 \
                            ELSE note || E'\\n' || $2 END, \
                updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .bind(note)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
