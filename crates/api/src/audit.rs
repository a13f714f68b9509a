//! Best-effort activity logging.
//!
//! Activity entries are an operational trail, not part of any request's
//! contract. Recording happens on a spawned task so a slow or failing insert
//! never delays or fails the request that triggered it.

use cantina_db::models::activity_log::CreateActivityLog;
use cantina_db::repositories::ActivityLogRepo;
use cantina_db::DbPool;

use crate::auth::Actor;

/// Record an activity entry without blocking the caller.
///
/// Failures are logged and swallowed.
pub fn record(pool: &DbPool, entry: CreateActivityLog) {
    let pool = pool.clone();
    tokio::spawn(async move {
        if let Err(err) = ActivityLogRepo::insert(&pool, &entry).await {
            tracing::warn!(
                module = %entry.module,
                action = %entry.action,
                error = %err,
                "Failed to record activity entry"
            );
        }
    });
}

/// Build an activity entry from the acting user's headers.
pub fn entry(
    actor: &Actor,
    module: &str,
    action: &str,
    description: impl Into<String>,
    details: serde_json::Value,
) -> CreateActivityLog {
    CreateActivityLog {
        actor_id: actor.id.clone(),
        actor_email: actor.email.clone(),
        action: action.to_string(),
        module: module.to_string(),
        description: description.into(),
        details: Some(details),
    }
}
