//! Duplicate-enrollment reconciliation.
//!
//! Enrollment imports occasionally land the same student twice under one
//! enrollment code. The job keeps the most recently updated row per code and
//! deactivates the rest, leaving an explanatory note on each loser. Planning
//! is pure (`cantina_core::dedup`); this module executes the plan.

use serde::Serialize;

use cantina_core::dedup::{plan_deduplication, StudentSnapshot};
use cantina_db::repositories::StudentRepo;
use cantina_db::DbPool;

use crate::error::AppResult;

/// Tally of one reconciliation run.
#[derive(Debug, Serialize)]
pub struct ReconciliationOutcome {
    /// Enrollment codes held by more than one active student.
    pub duplicates_found: usize,
    /// Duplicate rows deactivated by this run.
    pub records_processed: usize,
    /// Per-row failures. The batch keeps going past them.
    pub failures: Vec<String>,
}

/// Plan and execute one deduplication pass over the active roster.
///
/// Idempotent: a second run sees no multi-member active groups and performs
/// zero writes. A row that another run deactivated between planning and
/// execution is skipped silently; the deactivation guard makes the write a
/// no-op rather than a double-append.
pub async fn run_deduplication(pool: &DbPool) -> AppResult<ReconciliationOutcome> {
    let students = StudentRepo::list_active(pool).await?;
    let snapshots: Vec<StudentSnapshot> = students
        .into_iter()
        .map(|s| StudentSnapshot {
            id: s.id,
            enrollment_code: s.enrollment_code,
            name: s.name,
            is_active: s.is_active,
            updated_at: s.updated_at,
        })
        .collect();

    let plan = plan_deduplication(&snapshots);
    tracing::info!(
        groups_examined = plan.groups_examined,
        duplicate_groups = plan.duplicate_groups,
        planned = plan.deactivations.len(),
        "Reconciliation plan built"
    );

    let mut records_processed = 0usize;
    let mut failures = Vec::new();
    for deactivation in &plan.deactivations {
        match StudentRepo::deactivate(pool, deactivation.student_id, &deactivation.note).await {
            Ok(true) => records_processed += 1,
            Ok(false) => {
                tracing::debug!(
                    student_id = deactivation.student_id,
                    "Duplicate already inactive, skipping"
                );
            }
            Err(err) => {
                tracing::warn!(
                    student_id = deactivation.student_id,
                    error = %err,
                    "Failed to deactivate duplicate student"
                );
                failures.push(format!(
                    "student {}: deactivation failed: {err}",
                    deactivation.student_id
                ));
            }
        }
    }

    Ok(ReconciliationOutcome {
        duplicates_found: plan.duplicate_groups,
        records_processed,
        failures,
    })
}
