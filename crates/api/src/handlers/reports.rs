//! Handlers for report preview, dispatch and configuration.
//!
//! The dispatch endpoint is the scheduler's entrypoint: an external cron
//! calls it at the configured time and reads `success`/`message` to tell a
//! skipped run from a dispatched one. Both outcomes are HTTP 200.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use cantina_core::error::CoreError;
use cantina_core::report::{MealObservation, Report, ReportFilters, RosterEntry};
use cantina_core::types::DbId;
use cantina_core::{calendar, validation, ConsumptionPlan, MealType};
use cantina_db::models::meal_record::MealRecordQuery;
use cantina_db::models::report_config::UpdateReportConfig;
use cantina_db::repositories::{MealRecordRepo, ReportConfigRepo, StudentRepo};
use cantina_mailer::DispatchSummary;

use crate::audit;
use crate::auth::{Actor, RequireAdmin};
use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, JobResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Query parameters for the report preview.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub group: Option<String>,
    pub student_id: Option<DbId>,
    pub meal_type: Option<String>,
}

/// Request body for the manual test-send.
#[derive(Debug, Default, Deserialize)]
pub struct TestSendRequest {
    /// Overrides the configured recipient list with a single address.
    pub recipient: Option<String>,
}

/// Payload carried by a successful dispatch run.
#[derive(Debug, Serialize)]
pub struct DispatchData {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub summary: DispatchSummary,
}

// ---------------------------------------------------------------------------
// Shared report assembly
// ---------------------------------------------------------------------------

/// Fetch roster and records for the range and run the pure aggregation.
async fn load_report(
    state: &AppState,
    date: NaiveDate,
    end_date: NaiveDate,
    filters: &ReportFilters,
) -> AppResult<Report> {
    let students = StudentRepo::list_active(&state.pool).await?;
    let mut roster = Vec::with_capacity(students.len());
    for student in students {
        let plan = ConsumptionPlan::from_str(&student.plan).map_err(|_| {
            AppError::InternalError(format!(
                "Student {} has unknown plan '{}'",
                student.id, student.plan
            ))
        })?;
        roster.push(RosterEntry {
            id: student.id,
            name: student.name,
            group: student.group_name,
            plan,
        });
    }

    let query = MealRecordQuery {
        student_id: filters.student_id,
        group: filters.group.clone(),
        meal_type: filters.meal_type.map(|m| m.as_str().to_string()),
    };
    let rows = MealRecordRepo::list_range(&state.pool, date, end_date, &query).await?;
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let meal_type = MealType::from_str(&row.meal_type).map_err(|_| {
            AppError::InternalError(format!(
                "Record {} has unknown meal type '{}'",
                row.id, row.meal_type
            ))
        })?;
        records.push(MealObservation {
            student_id: row.student_id,
            student_name: row.student_name,
            group: row.group_name,
            meal_type,
            attended: row.attended,
            registered_at: row.created_at,
        });
    }

    Ok(cantina_core::report::build_report(
        date,
        end_date,
        &roster,
        &records,
        filters,
        Utc::now(),
        state.config.time_zone,
    ))
}

fn parse_filters(params: &ReportParams) -> AppResult<ReportFilters> {
    let meal_type = params
        .meal_type
        .as_deref()
        .map(MealType::from_str)
        .transpose()?;
    Ok(ReportFilters {
        group: params.group.clone(),
        student_id: params.student_id,
        meal_type,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /reports/daily?date=&end_date=&group=&student_id=&meal_type=
///
/// Build and return the report for a day or an inclusive day range.
/// Defaults to today in the business timezone.
pub async fn daily_report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<impl IntoResponse> {
    let date = match &params.date {
        Some(s) => calendar::parse_day(s)?,
        None => calendar::today(state.config.time_zone),
    };
    let end_date = match &params.end_date {
        Some(s) => calendar::parse_day(s)?,
        None => date,
    };
    if end_date < date {
        return Err(AppError::Core(CoreError::Validation(
            "end_date must not precede date".into(),
        )));
    }

    let filters = parse_filters(&params)?;
    let report = load_report(&state, date, end_date, &filters).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /reports/dispatch
///
/// Scheduler entrypoint. Skips (success:false, HTTP 200) when sending is
/// disabled or no recipients are configured; otherwise dispatches today's
/// report to every configured recipient and reports per-recipient outcomes.
pub async fn dispatch_reports(
    State(state): State<AppState>,
) -> AppResult<Json<JobResponse<DispatchData>>> {
    let Some(config) = ReportConfigRepo::get(&state.pool).await? else {
        return Ok(Json(JobResponse::skipped("Report configuration not found")));
    };
    if !config.is_active {
        return Ok(Json(JobResponse::skipped("Report sending is disabled")));
    }
    if config.recipient_emails.is_empty() {
        return Ok(Json(JobResponse::skipped("No recipients configured")));
    }

    let day = calendar::today(state.config.time_zone);
    let report = load_report(&state, day, day, &ReportFilters::default()).await?;
    let summary = state
        .dispatcher
        .dispatch(&report, &config.recipient_emails)
        .await;

    tracing::info!(
        date = %day,
        attempted = summary.attempted,
        delivered = summary.delivered,
        failed = summary.failed,
        mode = state.dispatcher.mode().as_str(),
        "Report dispatch run finished"
    );

    // Scheduler runs arrive without actor headers.
    audit::record(
        &state.pool,
        audit::entry(
            &Actor::default(),
            "reports",
            "dispatch",
            format!("Dispatched report for {day}"),
            json!({
                "date": day,
                "attempted": summary.attempted,
                "delivered": summary.delivered,
                "failed": summary.failed,
            }),
        ),
    );

    let message = if summary.all_delivered() {
        format!("Report sent to {} recipient(s)", summary.delivered)
    } else {
        format!(
            "Report sent to {} of {} recipient(s)",
            summary.delivered, summary.attempted
        )
    };
    Ok(Json(JobResponse::ok(message, DispatchData { date: day, summary })))
}

/// POST /reports/test-send
///
/// Send today's report once, to the configured recipients or to a single
/// override address. Meant for operators verifying mail settings; in
/// sandbox mode the outcomes carry preview locators instead of real sends.
pub async fn test_send(
    RequireAdmin(actor): RequireAdmin,
    State(state): State<AppState>,
    body: Option<Json<TestSendRequest>>,
) -> AppResult<Json<JobResponse<DispatchData>>> {
    let input = body.map(|Json(b)| b).unwrap_or_default();

    let recipients = match input.recipient {
        Some(recipient) => {
            validation::validate_recipients(std::slice::from_ref(&recipient))?;
            vec![recipient]
        }
        None => {
            let config = ReportConfigRepo::get(&state.pool)
                .await?
                .ok_or_else(|| AppError::InternalError("Report configuration missing".into()))?;
            if config.recipient_emails.is_empty() {
                return Ok(Json(JobResponse::skipped("No recipients configured")));
            }
            config.recipient_emails
        }
    };

    let day = calendar::today(state.config.time_zone);
    let report = load_report(&state, day, day, &ReportFilters::default()).await?;
    let summary = state.dispatcher.dispatch(&report, &recipients).await;

    audit::record(
        &state.pool,
        audit::entry(
            &actor,
            "reports",
            "test_send",
            format!("Test-sent report for {day}"),
            json!({
                "date": day,
                "recipients": recipients,
                "delivered": summary.delivered,
                "failed": summary.failed,
            }),
        ),
    );

    let message = format!(
        "Test send finished: {} delivered, {} failed ({} mode)",
        summary.delivered,
        summary.failed,
        state.dispatcher.mode().as_str()
    );
    Ok(Json(JobResponse::ok(message, DispatchData { date: day, summary })))
}

/// GET /reports/config
///
/// Return the scheduling document in its legacy wire shape.
pub async fn get_config(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let config = ReportConfigRepo::get(&state.pool)
        .await?
        .ok_or_else(|| AppError::InternalError("Report configuration missing".into()))?;
    Ok(Json(DataResponse { data: config }))
}

/// PUT /reports/config
///
/// Replace the scheduling document. Validated server-side regardless of
/// client checks; admin capability required; the save is audited.
pub async fn update_config(
    RequireAdmin(actor): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateReportConfig>,
) -> AppResult<impl IntoResponse> {
    validation::validate_recipients(&input.recipient_emails)?;
    validation::validate_schedule_time(&input.scheduled_time)?;

    let saved = ReportConfigRepo::upsert(&state.pool, &input).await?;

    audit::record(
        &state.pool,
        audit::entry(
            &actor,
            "reports",
            "update_config",
            "Updated report configuration",
            json!({
                "emails": saved.recipient_emails,
                "horario": saved.scheduled_time,
                "ativo": saved.is_active,
            }),
        ),
    );

    tracing::info!(
        recipients = saved.recipient_emails.len(),
        scheduled_time = %saved.scheduled_time,
        is_active = saved.is_active,
        "Report configuration updated"
    );

    Ok(Json(DataResponse { data: saved }))
}
