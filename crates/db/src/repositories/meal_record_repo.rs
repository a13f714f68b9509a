//! Repository for the `meal_records` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use cantina_core::types::DbId;

use crate::models::meal_record::{
    CreateMealRecord, MealRecord, MealRecordQuery, UpdateMealRecord,
};

/// Column list for `meal_records` SELECT queries.
const COLUMNS: &str = "\
    id, student_id, student_name, group_name, plan, meal_type, served_on, \
    attended, note, created_at, updated_at";

/// Provides data access for meal registrations.
pub struct MealRecordRepo;

impl MealRecordRepo {
    /// Conditionally insert a meal record against the identity index.
    ///
    /// Returns `None` when a record for `(student_id, meal_type, served_on)`
    /// already exists: the insert is a no-op and the absence of a returned
    /// row is the duplicate signal. Concurrent submissions race at the
    /// index, so exactly one of them gets a row back.
    pub async fn try_insert(
        pool: &PgPool,
        dto: &CreateMealRecord,
    ) -> Result<Option<MealRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO meal_records \
                (student_id, student_name, group_name, plan, meal_type, served_on, attended, note) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (student_id, meal_type, served_on) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MealRecord>(&query)
            .bind(dto.student_id)
            .bind(&dto.student_name)
            .bind(&dto.group_name)
            .bind(&dto.plan)
            .bind(&dto.meal_type)
            .bind(dto.served_on)
            .bind(dto.attended)
            .bind(&dto.note)
            .fetch_optional(pool)
            .await
    }

    /// Find a meal record by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MealRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meal_records WHERE id = $1");
        sqlx::query_as::<_, MealRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count a student's records inside an inclusive day range.
    ///
    /// Backs the weekly quota check; counts every record regardless of the
    /// `attended` flag, since a registered meal holds its slot either way.
    pub async fn count_for_student(
        pool: &PgPool,
        student_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM meal_records \
             WHERE student_id = $1 AND served_on >= $2 AND served_on <= $3",
        )
        .bind(student_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await
    }

    /// List records inside an inclusive day range with optional filters.
    pub async fn list_range(
        pool: &PgPool,
        from: NaiveDate,
        to: NaiveDate,
        params: &MealRecordQuery,
    ) -> Result<Vec<MealRecord>, sqlx::Error> {
        let mut conditions = vec![
            "served_on >= $1".to_string(),
            "served_on <= $2".to_string(),
        ];
        let mut bind_idx = 3u32;
        let mut bind_values: Vec<BindValue> = Vec::new();

        if let Some(student_id) = params.student_id {
            conditions.push(format!("student_id = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::BigInt(student_id));
        }

        if let Some(ref group) = params.group {
            conditions.push(format!("group_name = ${bind_idx}"));
            bind_idx += 1;
            bind_values.push(BindValue::Text(group.clone()));
        }

        if let Some(ref meal_type) = params.meal_type {
            conditions.push(format!("meal_type = ${bind_idx}"));
            let _ = bind_idx;
            bind_values.push(BindValue::Text(meal_type.clone()));
        }

        let query = format!(
            "SELECT {COLUMNS} FROM meal_records \
             WHERE {} \
             ORDER BY created_at ASC, student_name ASC",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, MealRecord>(&query).bind(from).bind(to);
        for val in &bind_values {
            match val {
                BindValue::BigInt(v) => q = q.bind(*v),
                BindValue::Text(v) => q = q.bind(v.as_str()),
            }
        }
        q.fetch_all(pool).await
    }

    /// Rewrite the provided fields of a record and bump `updated_at`.
    ///
    /// Unset DTO fields keep their stored value via COALESCE. An update
    /// that moves the record onto an occupied identity violates
    /// `uq_meal_records_identity` and surfaces as a database error for the
    /// caller to classify.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateMealRecord,
    ) -> Result<Option<MealRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE meal_records SET \
                meal_type = COALESCE($2, meal_type), \
                served_on = COALESCE($3, served_on), \
                attended = COALESCE($4, attended), \
                note = COALESCE($5, note), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MealRecord>(&query)
            .bind(id)
            .bind(&dto.meal_type)
            .bind(dto.served_on)
            .bind(dto.attended)
            .bind(&dto.note)
            .fetch_optional(pool)
            .await
    }
}

/// Typed bind value for dynamically-built meal record queries.
enum BindValue {
    BigInt(i64),
    Text(String),
}
