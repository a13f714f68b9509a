//! Attendance report aggregation.
//!
//! [`build_report`] is a pure function over an already-fetched roster and
//! meal-record set; the API layer owns the queries. Keeping the aggregation
//! free of I/O lets the ordering and counting contracts be tested without a
//! database.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use crate::calendar;
use crate::meal::MealType;
use crate::plan::ConsumptionPlan;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One active roster row, as the aggregation sees it.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub id: DbId,
    pub name: String,
    pub group: String,
    pub plan: ConsumptionPlan,
}

/// One meal record in the requested range, as the aggregation sees it.
///
/// Name/group/plan are the snapshots taken at registration time; reports
/// deliberately reflect historical truth, not the current roster.
#[derive(Debug, Clone)]
pub struct MealObservation {
    pub student_id: DbId,
    pub student_name: String,
    pub group: String,
    pub meal_type: MealType,
    pub attended: bool,
    pub registered_at: Timestamp,
}

/// Conjunctive narrowing filters for a report run.
#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    pub group: Option<String>,
    pub student_id: Option<DbId>,
    pub meal_type: Option<MealType>,
}

impl ReportFilters {
    fn roster_matches(&self, entry: &RosterEntry) -> bool {
        if let Some(group) = &self.group {
            if &entry.group != group {
                return false;
            }
        }
        if let Some(id) = self.student_id {
            if entry.id != id {
                return false;
            }
        }
        true
    }

    fn record_matches(&self, record: &MealObservation) -> bool {
        if let Some(group) = &self.group {
            if &record.group != group {
                return false;
            }
        }
        if let Some(id) = self.student_id {
            if record.student_id != id {
                return false;
            }
        }
        if let Some(meal_type) = self.meal_type {
            if record.meal_type != meal_type {
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Report value
// ---------------------------------------------------------------------------

/// One `{name, group, plan}` attendance line. Plan is the human label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceEntry {
    pub name: String,
    pub group: String,
    pub plan: String,
}

/// One detail line per meal record in the range.
#[derive(Debug, Clone, Serialize)]
pub struct DetailRecord {
    pub student_id: DbId,
    pub name: String,
    pub group: String,
    pub meal_type: String,
    pub time_of_day: String,
}

/// Aggregated attendance for a date range. Built fresh on every run; never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Report day (start of the requested range).
    pub date: NaiveDate,
    /// End of the requested range; equals `date` for the daily report.
    pub end_date: NaiveDate,
    pub generated_at: Timestamp,
    /// Business timezone the report was resolved in.
    pub timezone: Tz,
    pub total_students: i64,
    pub ate_count: i64,
    pub not_ate_count: i64,
    /// Record count per human-readable meal-type label. Every known label
    /// is present, zero-valued when unused, so the export's per-type block
    /// round-trips exactly.
    pub counts_by_meal_type: BTreeMap<String, i64>,
    /// Students with at least one attended record, sorted by group then name.
    pub ate_list: Vec<AttendanceEntry>,
    /// The rest of the roster, same ordering contract.
    pub not_ate_list: Vec<AttendanceEntry>,
    /// One line per record, in registration order.
    pub detail_records: Vec<DetailRecord>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Sort key for the attendance lists: group then name, case-insensitive.
/// The `(group, name)` ordering is a published contract.
fn list_sort_key(entry: &AttendanceEntry) -> (String, String) {
    (entry.group.to_lowercase(), entry.name.to_lowercase())
}

/// Build a [`Report`] for `[date, end_date]` from the fetched roster and
/// records.
///
/// Filters are applied here as well as in the repository queries, so the
/// aggregation is correct even when handed an unfiltered data set. Empty
/// roster and empty record sets are valid inputs.
pub fn build_report(
    date: NaiveDate,
    end_date: NaiveDate,
    roster: &[RosterEntry],
    records: &[MealObservation],
    filters: &ReportFilters,
    generated_at: Timestamp,
    tz: Tz,
) -> Report {
    let roster: Vec<&RosterEntry> = roster
        .iter()
        .filter(|entry| filters.roster_matches(entry))
        .collect();
    let mut records: Vec<&MealObservation> = records
        .iter()
        .filter(|record| filters.record_matches(record))
        .collect();
    records.sort_by(|a, b| {
        a.registered_at
            .cmp(&b.registered_at)
            .then_with(|| a.student_name.cmp(&b.student_name))
    });

    let attended_ids: HashSet<DbId> = records
        .iter()
        .filter(|record| record.attended)
        .map(|record| record.student_id)
        .collect();

    let mut counts_by_meal_type: BTreeMap<String, i64> = MealType::all()
        .iter()
        .map(|meal_type| (meal_type.label().to_string(), 0))
        .collect();
    for record in &records {
        *counts_by_meal_type
            .entry(record.meal_type.label().to_string())
            .or_insert(0) += 1;
    }

    let mut ate_list = Vec::new();
    let mut not_ate_list = Vec::new();
    for entry in &roster {
        let line = AttendanceEntry {
            name: entry.name.clone(),
            group: entry.group.clone(),
            plan: entry.plan.label().to_string(),
        };
        if attended_ids.contains(&entry.id) {
            ate_list.push(line);
        } else {
            not_ate_list.push(line);
        }
    }
    ate_list.sort_by_key(list_sort_key);
    not_ate_list.sort_by_key(list_sort_key);

    let detail_records = records
        .iter()
        .map(|record| DetailRecord {
            student_id: record.student_id,
            name: record.student_name.clone(),
            group: record.group.clone(),
            meal_type: record.meal_type.label().to_string(),
            time_of_day: calendar::time_of_day(record.registered_at, tz),
        })
        .collect();

    let total_students = roster.len() as i64;
    let ate_count = ate_list.len() as i64;

    Report {
        date,
        end_date,
        generated_at,
        timezone: tz,
        total_students,
        ate_count,
        not_ate_count: total_students - ate_count,
        counts_by_meal_type,
        ate_list,
        not_ate_list,
        detail_records,
    }
}

/// Percentage of `part` in `total`, rounded to one decimal.
///
/// A zero total reports `0.0` instead of dividing by zero.
pub fn percent(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 * 1000.0 / total as f64).round() / 10.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
