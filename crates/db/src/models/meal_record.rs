//! Meal record entity models and DTOs.

use cantina_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Meal record entity
// ---------------------------------------------------------------------------

/// One registered meal. Identity is `(student_id, meal_type, served_on)`,
/// enforced by the `uq_meal_records_identity` unique index.
///
/// `student_name`, `group_name` and `plan` are snapshots taken at
/// registration time; reports and quota accounting read these, not the
/// current roster row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MealRecord {
    pub id: DbId,
    pub student_id: DbId,
    pub student_name: String,
    pub group_name: String,
    pub plan: String,
    pub meal_type: String,
    /// Calendar day in the business timezone.
    pub served_on: NaiveDate,
    pub attended: bool,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create / update DTOs
// ---------------------------------------------------------------------------

/// DTO for the conditional insert. Built by the registration handler after
/// validation; every field is already normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMealRecord {
    pub student_id: DbId,
    pub student_name: String,
    pub group_name: String,
    pub plan: String,
    pub meal_type: String,
    pub served_on: NaiveDate,
    pub attended: bool,
    pub note: Option<String>,
}

/// DTO for administrator corrections. Only provided fields are rewritten.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMealRecord {
    pub meal_type: Option<String>,
    pub served_on: Option<NaiveDate>,
    pub attended: Option<bool>,
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Optional narrowing filters for range queries over meal records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealRecordQuery {
    pub student_id: Option<DbId>,
    pub group: Option<String>,
    pub meal_type: Option<String>,
}
