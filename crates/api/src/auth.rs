//! Shared-token authorization extractors for Axum handlers.
//!
//! The kiosk endpoints are open inside the school network; administrative
//! endpoints require the shared token configured through `ADMIN_TOKEN`. Use
//! [`RequireAdmin`] in route handlers to enforce this at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use cantina_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Best-effort identity of the person operating the client, for activity
/// logging. Read from the `X-Actor-Id` / `X-Actor-Email` headers; extraction
/// never fails, absent headers simply yield `None` fields.
#[derive(Debug, Clone, Default)]
pub struct Actor {
    pub id: Option<String>,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Ok(Actor {
            id: header("x-actor-id"),
            email: header("x-actor-email"),
        })
    }
}

/// Requires the shared admin token in the `X-Admin-Token` header.
/// Rejects with 401 Unauthorized otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(actor): RequireAdmin) -> AppResult<Json<()>> {
///     // the caller presented the configured token
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Actor);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An unset ADMIN_TOKEN keeps the admin surface locked rather than open.
        let expected = state.config.admin_token.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::NotAuthorized(
                "Administrative access is not configured".into(),
            ))
        })?;

        let presented = parts
            .headers
            .get("x-admin-token")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::NotAuthorized(
                    "Missing X-Admin-Token header".into(),
                ))
            })?;

        if presented != expected {
            return Err(AppError::Core(CoreError::NotAuthorized(
                "Invalid admin token".into(),
            )));
        }

        let actor = Actor::from_request_parts(parts, state)
            .await
            .unwrap_or_default();
        Ok(RequireAdmin(actor))
    }
}
