//! CRUD contracts for roster, configuration and activity log tables.

use sqlx::PgPool;

use cantina_db::models::activity_log::{ActivityQuery, CreateActivityLog};
use cantina_db::models::report_config::UpdateReportConfig;
use cantina_db::models::student::CreateStudent;
use cantina_db::repositories::{ActivityLogRepo, ReportConfigRepo, StudentRepo};

fn student(name: &str, code: &str) -> CreateStudent {
    CreateStudent {
        name: name.to_string(),
        group_name: "A".to_string(),
        enrollment_code: code.to_string(),
        plan: "weekly_5".to_string(),
        note: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivation_appends_note_and_is_idempotent(pool: PgPool) {
    let created = StudentRepo::create(&pool, &student("Ana", "X-100"))
        .await
        .unwrap();

    let first = StudentRepo::deactivate(&pool, created.id, "duplicate of 2")
        .await
        .unwrap();
    assert!(first);

    // Already inactive: the second pass writes nothing.
    let second = StudentRepo::deactivate(&pool, created.id, "duplicate of 2")
        .await
        .unwrap();
    assert!(!second);

    let row = StudentRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!row.is_active);
    assert_eq!(row.note.as_deref(), Some("duplicate of 2"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_roster_excludes_deactivated_students(pool: PgPool) {
    let keep = StudentRepo::create(&pool, &student("Ana", "X-100"))
        .await
        .unwrap();
    let drop = StudentRepo::create(&pool, &student("Bruno", "X-101"))
        .await
        .unwrap();
    StudentRepo::deactivate(&pool, drop.id, "left the school")
        .await
        .unwrap();

    let roster = StudentRepo::list_active(&pool).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].id, keep.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn config_singleton_is_seeded_inactive(pool: PgPool) {
    let config = ReportConfigRepo::get(&pool).await.unwrap().unwrap();
    assert!(!config.is_active);
    assert!(config.recipient_emails.is_empty());
    assert_eq!(config.scheduled_time, "07:30");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn config_upsert_replaces_the_document(pool: PgPool) {
    let dto = UpdateReportConfig {
        recipient_emails: vec!["kitchen@school.example".to_string()],
        scheduled_time: "06:45".to_string(),
        is_active: true,
    };
    let saved = ReportConfigRepo::upsert(&pool, &dto).await.unwrap();
    assert_eq!(saved.recipient_emails, dto.recipient_emails);
    assert_eq!(saved.scheduled_time, "06:45");
    assert!(saved.is_active);

    let reread = ReportConfigRepo::get(&pool).await.unwrap().unwrap();
    assert_eq!(reread.recipient_emails, dto.recipient_emails);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activity_entries_list_newest_first(pool: PgPool) {
    for action in ["register", "correct"] {
        ActivityLogRepo::insert(
            &pool,
            &CreateActivityLog {
                actor_id: Some("7".to_string()),
                actor_email: None,
                action: action.to_string(),
                module: "meals".to_string(),
                description: format!("{action} something"),
                details: Some(serde_json::json!({ "record_id": 1 })),
            },
        )
        .await
        .unwrap();
    }

    let entries = ActivityLogRepo::query(&pool, &ActivityQuery::default())
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "correct");

    let filtered = ActivityLogRepo::query(
        &pool,
        &ActivityQuery {
            action: Some("register".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
}
