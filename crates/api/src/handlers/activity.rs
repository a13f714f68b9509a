//! Handler for browsing the activity trail.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use cantina_db::models::activity_log::ActivityQuery;
use cantina_db::repositories::ActivityLogRepo;

use crate::auth::RequireAdmin;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing activity entries.
#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub module: Option<String>,
    pub action: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /admin/activity?module=&action=&limit=&offset=
///
/// List recent activity entries, newest first.
pub async fn list_activity(
    RequireAdmin(_actor): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ActivityParams>,
) -> AppResult<impl IntoResponse> {
    let query = ActivityQuery {
        module: params.module,
        action: params.action,
        limit: params.limit,
        offset: params.offset,
    };
    let entries = ActivityLogRepo::query(&state.pool, &query).await?;
    Ok(Json(DataResponse { data: entries }))
}
