//! HTTP-level integration tests for the reconciliation job and the
//! activity trail.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_admin, post, post_admin, seed_student};
use cantina_db::models::activity_log::CreateActivityLog;
use cantina_db::repositories::{ActivityLogRepo, StudentRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reconciliation_requires_the_admin_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post(app, "/api/v1/admin/reconciliation/run").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reconciliation_deactivates_all_but_the_newest_duplicate(pool: PgPool) {
    // Three students sharing one enrollment code; created in order, so the
    // third carries the newest updated_at and must be the one kept.
    let first = seed_student(&pool, "Ana Souza", "3A", "EN-DUP", "weekly_5").await;
    let second = seed_student(&pool, "Ana S. Souza", "3A", "EN-DUP", "weekly_5").await;
    let kept = seed_student(&pool, "Ana Silva Souza", "3A", "EN-DUP", "weekly_5").await;
    seed_student(&pool, "Beto Cruz", "3B", "EN-201", "weekly_5").await;

    let app = common::build_test_app(pool.clone());
    let response = post_admin(app, "/api/v1/admin/reconciliation/run").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["duplicates_found"], 1);
    assert_eq!(json["data"]["records_processed"], 2);
    assert_eq!(json["data"]["failures"].as_array().unwrap().len(), 0);

    // The losers are out of the active roster; the note explains why.
    let active = StudentRepo::list_active(&pool).await.unwrap();
    let active_ids: Vec<i64> = active.iter().map(|s| s.id).collect();
    assert!(active_ids.contains(&kept.id));
    assert!(!active_ids.contains(&first.id));
    assert!(!active_ids.contains(&second.id));

    let loser = StudentRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert!(!loser.is_active);
    let note = loser.note.unwrap();
    assert!(
        note.contains("Duplicate enrollment") && note.contains(&kept.id.to_string()),
        "note should name the kept student, got: {note}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_reconciliation_run_is_a_no_op(pool: PgPool) {
    seed_student(&pool, "Ana Souza", "3A", "EN-DUP", "weekly_5").await;
    seed_student(&pool, "Ana S. Souza", "3A", "EN-DUP", "weekly_5").await;

    let app = common::build_test_app(pool.clone());
    let first_run = body_json(post_admin(app, "/api/v1/admin/reconciliation/run").await).await;
    assert_eq!(first_run["data"]["records_processed"], 1);

    let app = common::build_test_app(pool);
    let second_run = body_json(post_admin(app, "/api/v1/admin/reconciliation/run").await).await;
    assert_eq!(second_run["success"], true);
    assert_eq!(second_run["data"]["duplicates_found"], 0);
    assert_eq!(second_run["data"]["records_processed"], 0);
    assert_eq!(second_run["message"], "No duplicate enrollments found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reconciliation_with_unique_codes_finds_nothing(pool: PgPool) {
    seed_student(&pool, "Ana Souza", "3A", "EN-301", "weekly_5").await;
    seed_student(&pool, "Beto Cruz", "3B", "EN-302", "weekly_5").await;

    let app = common::build_test_app(pool);
    let json = body_json(post_admin(app, "/api/v1/admin/reconciliation/run").await).await;
    assert_eq!(json["data"]["duplicates_found"], 0);
    assert_eq!(json["data"]["records_processed"], 0);
}

// ---------------------------------------------------------------------------
// Activity trail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn activity_lists_entries_newest_first_with_filters(pool: PgPool) {
    for (module, action, description) in [
        ("meals", "register", "Registered Lunch for Ana"),
        ("reports", "update_config", "Updated report configuration"),
        ("meals", "correct", "Corrected record 7 for Ana"),
    ] {
        ActivityLogRepo::insert(
            &pool,
            &CreateActivityLog {
                actor_id: Some("u-1".to_string()),
                actor_email: Some("staff@school.example".to_string()),
                action: action.to_string(),
                module: module.to_string(),
                description: description.to_string(),
                details: None,
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_admin(app, "/api/v1/admin/activity").await).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["action"], "correct");

    let app = common::build_test_app(pool);
    let json = body_json(get_admin(app, "/api/v1/admin/activity?module=meals").await).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["module"] == "meals"));
}
