//! Plain-text and CSV renderings of a [`Report`].
//!
//! Both renderings are derived views; the [`Report`] value stays the single
//! source of truth. The CSV is assembled by hand so the section layout and
//! separator stay under our control.

use chrono::NaiveDate;

use crate::report::{percent, AttendanceEntry, Report};

/// Title used by the summary header, the CSV header and the mail subject.
pub const REPORT_TITLE: &str = "Daily Meal Report";

/// Default field separator for exports. Overridable per config so sheets
/// localized to comma-decimal locales import cleanly.
pub const DEFAULT_CSV_SEPARATOR: char = ';';

// ---------------------------------------------------------------------------
// Shared formatting
// ---------------------------------------------------------------------------

/// `DD/MM/YYYY` rendering used everywhere a day is shown to a person.
pub fn format_day(day: NaiveDate) -> String {
    day.format("%d/%m/%Y").to_string()
}

/// Human label for the report period: one day, or `start - end` for ranges.
pub fn period_label(report: &Report) -> String {
    if report.date == report.end_date {
        format_day(report.date)
    } else {
        format!("{} - {}", format_day(report.date), format_day(report.end_date))
    }
}

/// Mail subject for a dispatched report.
pub fn subject(report: &Report) -> String {
    format!("{} - {}", REPORT_TITLE, period_label(report))
}

/// Attachment filename: `report_DD-MM-YYYY.csv`, keyed on the report day.
pub fn export_filename(day: NaiveDate) -> String {
    format!("report_{}.csv", day.format("%d-%m-%Y"))
}

fn generated_at_label(report: &Report) -> String {
    report
        .generated_at
        .with_timezone(&report.timezone)
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

fn percent_label(part: i64, total: i64) -> String {
    format!("{:.1}%", percent(part, total))
}

// ---------------------------------------------------------------------------
// Summary rendering
// ---------------------------------------------------------------------------

/// Render the plain-text summary used as the mail body and the API preview.
pub fn render_summary(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n", REPORT_TITLE, period_label(report)));
    out.push_str(&format!("Generated at {}\n", generated_at_label(report)));
    out.push('\n');
    out.push_str(&format!("Total students: {}\n", report.total_students));
    out.push_str(&format!(
        "Ate: {} ({})\n",
        report.ate_count,
        percent_label(report.ate_count, report.total_students)
    ));
    out.push_str(&format!(
        "Did not eat: {} ({})\n",
        report.not_ate_count,
        percent_label(report.not_ate_count, report.total_students)
    ));
    out.push('\n');
    out.push_str("Meals by type:\n");
    for (label, count) in &report.counts_by_meal_type {
        out.push_str(&format!("- {label}: {count}\n"));
    }
    out.push('\n');
    out.push_str("Ate:\n");
    push_summary_list(&mut out, &report.ate_list);
    out.push('\n');
    out.push_str("Did not eat:\n");
    push_summary_list(&mut out, &report.not_ate_list);
    out
}

fn push_summary_list(out: &mut String, entries: &[AttendanceEntry]) {
    if entries.is_empty() {
        out.push_str("- (none)\n");
        return;
    }
    for entry in entries {
        out.push_str(&format!("- {} ({})\n", entry.name, entry.group));
    }
}

// ---------------------------------------------------------------------------
// CSV rendering
// ---------------------------------------------------------------------------

/// Quote a field when it contains the separator, a quote or a line break.
fn escape_csv_field(field: &str, separator: char) -> String {
    if field.contains(separator)
        || field.contains('"')
        || field.contains('\r')
        || field.contains('\n')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(out: &mut String, separator: char, fields: &[&str]) {
    let row: Vec<String> = fields
        .iter()
        .map(|field| escape_csv_field(field, separator))
        .collect();
    out.push_str(&row.join(&separator.to_string()));
    out.push_str("\r\n");
}

/// Render the sectioned CSV export.
///
/// Layout, in order: header block, summary block, per-type counts, the
/// ate table and the did-not-eat table, separated by blank lines. Rows end
/// with CRLF for spreadsheet compatibility.
pub fn render_csv(report: &Report, separator: char) -> String {
    let mut out = String::new();

    push_row(&mut out, separator, &[REPORT_TITLE, &period_label(report)]);
    push_row(&mut out, separator, &["Generated at", &generated_at_label(report)]);
    out.push_str("\r\n");

    push_row(&mut out, separator, &["Summary"]);
    push_row(
        &mut out,
        separator,
        &["Total students", &report.total_students.to_string()],
    );
    push_row(
        &mut out,
        separator,
        &[
            "Ate",
            &report.ate_count.to_string(),
            &percent_label(report.ate_count, report.total_students),
        ],
    );
    push_row(
        &mut out,
        separator,
        &[
            "Did not eat",
            &report.not_ate_count.to_string(),
            &percent_label(report.not_ate_count, report.total_students),
        ],
    );
    out.push_str("\r\n");

    push_row(&mut out, separator, &["Meals by type"]);
    for (label, count) in &report.counts_by_meal_type {
        push_row(&mut out, separator, &[label, &count.to_string()]);
    }
    out.push_str("\r\n");

    push_row(&mut out, separator, &["Ate"]);
    push_attendance_table(&mut out, separator, &report.ate_list);
    out.push_str("\r\n");

    push_row(&mut out, separator, &["Did not eat"]);
    push_attendance_table(&mut out, separator, &report.not_ate_list);

    out
}

fn push_attendance_table(out: &mut String, separator: char, entries: &[AttendanceEntry]) {
    push_row(out, separator, &["Name", "Group", "Plan"]);
    for entry in entries {
        push_row(out, separator, &[&entry.name, &entry.group, &entry.plan]);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
