//! Route definitions for the `/admin` surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{activity, admin};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the admin token (enforced by handler extractors).
///
/// ```text
/// POST   /reconciliation/run    -> deduplicate enrollment codes
/// GET    /activity              -> list recent activity entries
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reconciliation/run", post(admin::run_reconciliation))
        .route("/activity", get(activity::list_activity))
}
