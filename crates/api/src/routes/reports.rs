//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// The dispatch endpoint is a GET because the external cron that drives it
/// only speaks simple HTTP probes.
///
/// ```text
/// GET    /daily         -> build a report for a day or range
/// GET    /dispatch      -> scheduler entrypoint, send today's report
/// POST   /test-send     -> one-off send for verifying mail settings (admin)
/// GET    /config        -> current scheduling document
/// PUT    /config        -> replace scheduling document (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily", get(reports::daily_report))
        .route("/dispatch", get(reports::dispatch_reports))
        .route("/test-send", post(reports::test_send))
        .route(
            "/config",
            get(reports::get_config).put(reports::update_config),
        )
}
