//! Route definitions for the `/meals` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::meals;
use crate::state::AppState;

/// Routes mounted at `/meals`.
///
/// Registration and listing are open to the kiosk; correction requires the
/// admin token (enforced by the handler extractor).
///
/// ```text
/// POST   /          -> register a meal
/// GET    /          -> list a day's records
/// PATCH  /{id}      -> correct a record (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meals::list_meals).post(meals::register_meal))
        .route("/{id}", patch(meals::correct_meal))
}
