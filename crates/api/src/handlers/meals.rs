//! Handlers for meal registration, correction and listing.
//!
//! Registration is the kiosk's hot path: one conditional insert closes the
//! duplicate race at the store, then a quota count turns into an advisory
//! warning that never blocks the write.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use cantina_core::error::CoreError;
use cantina_core::types::DbId;
use cantina_core::{calendar, ConsumptionPlan, MealType};
use cantina_db::models::meal_record::{
    CreateMealRecord, MealRecord, MealRecordQuery, UpdateMealRecord,
};
use cantina_db::repositories::{MealRecordRepo, StudentRepo};

use crate::audit;
use crate::auth::{Actor, RequireAdmin};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Marker appended to a record's note whenever an administrator rewrites it.
const CORRECTION_MARKER: &str = "[CORRECTED BY ADMIN]";

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Request body for registering a meal.
///
/// `student_name`, `group` and `plan` are snapshots the kiosk already holds;
/// they are stored on the record so reports reflect the roster as it stood
/// at registration time. The day comes from `date` (YYYY-MM-DD), else from
/// `served_at` (RFC 3339) resolved in the business timezone, else today.
#[derive(Debug, Deserialize)]
pub struct RegisterMealRequest {
    pub student_id: DbId,
    pub student_name: String,
    pub group: String,
    pub plan: String,
    pub meal_type: String,
    pub date: Option<String>,
    pub served_at: Option<String>,
    pub attended: Option<bool>,
    pub note: Option<String>,
}

/// Request body for an administrative correction. Unset fields keep their
/// stored value.
#[derive(Debug, Deserialize)]
pub struct CorrectMealRequest {
    pub meal_type: Option<String>,
    pub date: Option<String>,
    pub attended: Option<bool>,
    pub note: Option<String>,
}

/// Query parameters for listing a day's records.
#[derive(Debug, Deserialize)]
pub struct ListMealsParams {
    pub date: Option<String>,
    pub group: Option<String>,
    pub meal_type: Option<String>,
    pub student_id: Option<DbId>,
}

/// Payload returned by a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterMealResponse {
    pub record: MealRecord,
    pub quota_exceeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_warning: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /meals
///
/// Register a meal for a student. Responds 409 when the student already has
/// a record for the same meal type and day; responds 201 with an advisory
/// quota warning when the write pushes the student over the weekly ceiling.
pub async fn register_meal(
    actor: Actor,
    State(state): State<AppState>,
    Json(input): Json<RegisterMealRequest>,
) -> AppResult<impl IntoResponse> {
    let meal_type = MealType::from_str(&input.meal_type)?;
    let plan = ConsumptionPlan::from_str(&input.plan)?;

    let student_name = input.student_name.trim();
    if student_name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "student_name must not be empty".into(),
        )));
    }
    let group = input.group.trim();
    if group.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "group must not be empty".into(),
        )));
    }

    let served_on = match (&input.date, &input.served_at) {
        (Some(day), _) => calendar::parse_day(day)?,
        (None, Some(instant)) => {
            calendar::local_day(calendar::parse_instant(instant)?, state.config.time_zone)
        }
        (None, None) => calendar::today(state.config.time_zone),
    };

    StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: input.student_id,
        }))?;

    let dto = CreateMealRecord {
        student_id: input.student_id,
        student_name: student_name.to_string(),
        group_name: group.to_string(),
        plan: plan.as_str().to_string(),
        meal_type: meal_type.as_str().to_string(),
        served_on,
        attended: input.attended.unwrap_or(true),
        note: input.note.clone(),
    };

    // The conditional insert returns no row when the (student, meal type,
    // day) identity is already taken. That absence is the duplicate signal.
    let record = MealRecordRepo::try_insert(&state.pool, &dto)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::DuplicateMeal {
                student_name: student_name.to_string(),
                meal_type: meal_type.label().to_string(),
            })
        })?;

    // Quota check runs after the insert so the count includes this record.
    let window = calendar::week_window(served_on);
    let week_count =
        MealRecordRepo::count_for_student(&state.pool, input.student_id, window.start, window.end)
            .await?;
    let quota_exceeded = plan.exceeds_quota(week_count.max(0) as u32);
    let quota_warning = quota_exceeded.then(|| {
        format!(
            "{student_name} has {week_count} meals registered this week, over the {} limit",
            plan.label()
        )
    });

    audit::record(
        &state.pool,
        audit::entry(
            &actor,
            "meals",
            "register",
            format!("Registered {} for {student_name}", meal_type.label()),
            json!({
                "record_id": record.id,
                "student_id": record.student_id,
                "meal_type": record.meal_type,
                "served_on": record.served_on,
                "quota_exceeded": quota_exceeded,
            }),
        ),
    );

    tracing::info!(
        record_id = record.id,
        student_id = record.student_id,
        meal_type = %record.meal_type,
        served_on = %record.served_on,
        quota_exceeded,
        "Meal registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: RegisterMealResponse {
                record,
                quota_exceeded,
                quota_warning,
            },
        }),
    ))
}

/// PATCH /meals/{id}
///
/// Administrative correction of a record. Only the provided fields are
/// rewritten; the note gains a correction marker. Moving the record onto an
/// occupied (student, meal type, day) identity responds 409.
pub async fn correct_meal(
    RequireAdmin(actor): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CorrectMealRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = MealRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MealRecord",
            id,
        }))?;

    let meal_type = input
        .meal_type
        .as_deref()
        .map(MealType::from_str)
        .transpose()?;
    let served_on = input
        .date
        .as_deref()
        .map(calendar::parse_day)
        .transpose()?;

    let base_note = input
        .note
        .clone()
        .or_else(|| existing.note.clone())
        .unwrap_or_default();
    let note = if base_note.is_empty() {
        CORRECTION_MARKER.to_string()
    } else {
        format!("{base_note} {CORRECTION_MARKER}")
    };

    let dto = UpdateMealRecord {
        meal_type: meal_type.map(|m| m.as_str().to_string()),
        served_on,
        attended: input.attended,
        note: Some(note),
    };

    let updated = MealRecordRepo::update(&state.pool, id, &dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MealRecord",
            id,
        }))?;

    audit::record(
        &state.pool,
        audit::entry(
            &actor,
            "meals",
            "correct",
            format!("Corrected record {id} for {}", updated.student_name),
            json!({
                "record_id": id,
                "changes": {
                    "meal_type": input.meal_type,
                    "date": input.date,
                    "attended": input.attended,
                    "note": input.note,
                },
            }),
        ),
    );

    tracing::info!(record_id = id, "Meal record corrected");

    Ok(Json(DataResponse { data: updated }))
}

/// GET /meals?date=&group=&meal_type=&student_id=
///
/// List one day's records, newest submissions last. Defaults to today in
/// the business timezone.
pub async fn list_meals(
    State(state): State<AppState>,
    Query(params): Query<ListMealsParams>,
) -> AppResult<impl IntoResponse> {
    let day = match &params.date {
        Some(s) => calendar::parse_day(s)?,
        None => calendar::today(state.config.time_zone),
    };
    let meal_type = params
        .meal_type
        .as_deref()
        .map(MealType::from_str)
        .transpose()?;

    let query = MealRecordQuery {
        student_id: params.student_id,
        group: params.group.clone(),
        meal_type: meal_type.map(|m| m.as_str().to_string()),
    };
    let records = MealRecordRepo::list_range(&state.pool, day, day, &query).await?;

    Ok(Json(DataResponse { data: records }))
}
