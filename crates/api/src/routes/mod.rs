pub mod admin;
pub mod health;
pub mod meals;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /meals                        register (POST), list a day (GET)
/// /meals/{id}                   correct a record (PATCH, admin)
///
/// /reports/daily                report preview (GET)
/// /reports/dispatch             scheduler entrypoint (GET)
/// /reports/test-send            manual test send (POST, admin)
/// /reports/config               get, replace scheduling document (GET, PUT)
///
/// /admin/reconciliation/run     deduplication pass (POST, admin)
/// /admin/activity               activity trail (GET, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Kiosk registration plus the admin correction path.
        .nest("/meals", meals::router())
        // Report preview, dispatch and scheduling configuration.
        .nest("/reports", reports::router())
        // Administrative jobs and the activity trail.
        .nest("/admin", admin::router())
}
