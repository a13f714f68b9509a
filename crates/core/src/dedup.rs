//! Planning for the student deduplication job.
//!
//! The plan is computed here from a roster snapshot; executing it (writing
//! deactivations) belongs to the job runner. Only active students are
//! considered, which makes a second run over the same roster a no-op.

use std::collections::BTreeMap;

use crate::types::{DbId, Timestamp};

/// Roster fields the planner needs.
#[derive(Debug, Clone)]
pub struct StudentSnapshot {
    pub id: DbId,
    pub enrollment_code: String,
    pub name: String,
    pub is_active: bool,
    pub updated_at: Timestamp,
}

/// One deactivation the job should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDeactivation {
    pub student_id: DbId,
    pub kept_student_id: DbId,
    /// Written into the student's note so the deactivation is explainable.
    pub note: String,
}

/// Outcome of planning a deduplication pass.
#[derive(Debug, Clone, Default)]
pub struct DedupPlan {
    pub deactivations: Vec<PlannedDeactivation>,
    /// Enrollment codes examined (active students with a usable code).
    pub groups_examined: usize,
    /// Codes held by more than one active student.
    pub duplicate_groups: usize,
}

/// Group active students by enrollment code and plan the deactivation of
/// every duplicate, keeping the most recently updated row per code.
///
/// Ties on `updated_at` keep the higher id. Students with a blank code are
/// skipped; there is nothing to match them on. Output order is
/// deterministic: codes ascending, then student id ascending.
pub fn plan_deduplication(students: &[StudentSnapshot]) -> DedupPlan {
    let mut by_code: BTreeMap<&str, Vec<&StudentSnapshot>> = BTreeMap::new();
    for student in students {
        if !student.is_active {
            continue;
        }
        let code = student.enrollment_code.trim();
        if code.is_empty() {
            continue;
        }
        by_code.entry(code).or_default().push(student);
    }

    let mut plan = DedupPlan {
        groups_examined: by_code.len(),
        ..Default::default()
    };

    for (code, mut members) in by_code {
        if members.len() < 2 {
            continue;
        }
        plan.duplicate_groups += 1;
        members.sort_by_key(|s| (s.updated_at, s.id));
        // Sorted ascending, so the keeper is the last element.
        let kept = members[members.len() - 1];
        for duplicate in &members[..members.len() - 1] {
            plan.deactivations.push(PlannedDeactivation {
                student_id: duplicate.id,
                kept_student_id: kept.id,
                note: format!(
                    "Duplicate enrollment {code}: kept student {} ({})",
                    kept.id, kept.name
                ),
            });
        }
    }

    plan.deactivations.sort_by_key(|d| d.student_id);
    plan
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn student(id: DbId, code: &str, active: bool, updated_minute: u32) -> StudentSnapshot {
        StudentSnapshot {
            id,
            enrollment_code: code.to_string(),
            name: format!("Student {id}"),
            is_active: active,
            updated_at: Utc
                .with_ymd_and_hms(2024, 6, 12, 10, updated_minute, 0)
                .unwrap(),
        }
    }

    #[test]
    fn keeps_most_recently_updated_and_deactivates_the_rest() {
        let roster = vec![
            student(1, "X-100", true, 5),
            student(2, "X-100", true, 30),
            student(3, "X-100", true, 10),
        ];
        let plan = plan_deduplication(&roster);

        assert_eq!(plan.duplicate_groups, 1);
        let deactivated: Vec<DbId> = plan.deactivations.iter().map(|d| d.student_id).collect();
        assert_eq!(deactivated, vec![1, 3]);
        assert!(plan.deactivations.iter().all(|d| d.kept_student_id == 2));
    }

    #[test]
    fn tie_on_updated_at_keeps_higher_id() {
        let roster = vec![student(7, "X-200", true, 0), student(9, "X-200", true, 0)];
        let plan = plan_deduplication(&roster);

        assert_eq!(plan.deactivations.len(), 1);
        assert_eq!(plan.deactivations[0].student_id, 7);
        assert_eq!(plan.deactivations[0].kept_student_id, 9);
    }

    #[test]
    fn inactive_students_are_ignored() {
        // A previous run already deactivated student 1. Running again plans
        // nothing, which is the idempotency contract.
        let roster = vec![student(1, "X-300", false, 0), student(2, "X-300", true, 5)];
        let plan = plan_deduplication(&roster);

        assert!(plan.deactivations.is_empty());
        assert_eq!(plan.duplicate_groups, 0);
        assert_eq!(plan.groups_examined, 1);
    }

    #[test]
    fn blank_enrollment_codes_are_skipped() {
        let roster = vec![student(1, "", true, 0), student(2, "   ", true, 0)];
        let plan = plan_deduplication(&roster);

        assert!(plan.deactivations.is_empty());
        assert_eq!(plan.groups_examined, 0);
    }

    #[test]
    fn distinct_codes_plan_nothing() {
        let roster = vec![student(1, "X-400", true, 0), student(2, "X-401", true, 0)];
        let plan = plan_deduplication(&roster);

        assert!(plan.deactivations.is_empty());
        assert_eq!(plan.groups_examined, 2);
    }

    #[test]
    fn note_names_the_kept_student() {
        let roster = vec![student(1, "X-500", true, 0), student(2, "X-500", true, 5)];
        let plan = plan_deduplication(&roster);

        assert!(plan.deactivations[0].note.contains("X-500"));
        assert!(plan.deactivations[0].note.contains("kept student 2"));
    }
}
