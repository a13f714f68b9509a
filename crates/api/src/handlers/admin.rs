//! Handlers for the `/admin` surface.

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::audit;
use crate::auth::RequireAdmin;
use crate::error::AppResult;
use crate::jobs::reconciliation::{self, ReconciliationOutcome};
use crate::response::JobResponse;
use crate::state::AppState;

/// POST /admin/reconciliation/run
///
/// Run one duplicate-enrollment reconciliation pass. Always responds 200;
/// the outcome says how many duplicates were found and processed.
pub async fn run_reconciliation(
    RequireAdmin(actor): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<JobResponse<ReconciliationOutcome>>> {
    let outcome = reconciliation::run_deduplication(&state.pool).await?;

    audit::record(
        &state.pool,
        audit::entry(
            &actor,
            "admin",
            "reconciliation",
            format!(
                "Reconciliation pass deactivated {} duplicate(s)",
                outcome.records_processed
            ),
            json!({
                "duplicates_found": outcome.duplicates_found,
                "records_processed": outcome.records_processed,
                "failures": outcome.failures,
            }),
        ),
    );

    let message = if outcome.duplicates_found == 0 {
        "No duplicate enrollments found".to_string()
    } else {
        format!(
            "Deactivated {} duplicate row(s) across {} enrollment code(s)",
            outcome.records_processed, outcome.duplicates_found
        )
    };
    Ok(Json(JobResponse::ok(message, outcome)))
}
