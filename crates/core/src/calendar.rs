//! Business-timezone calendar math.
//!
//! Meal records are compared by the calendar day they were served on in the
//! configured business timezone, never by UTC instant. All timestamp-to-day
//! conversion happens here, at the service boundary; storage and repositories
//! only ever see the resolved [`NaiveDate`].

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::CoreError;

/// Inclusive quota week window: Sunday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Whether `day` falls inside this window.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

/// Resolve a UTC instant to its calendar day in the business timezone.
pub fn local_day(at: DateTime<Utc>, tz: Tz) -> NaiveDate {
    at.with_timezone(&tz).date_naive()
}

/// Today's calendar day in the business timezone.
pub fn today(tz: Tz) -> NaiveDate {
    local_day(Utc::now(), tz)
}

/// Local wall-clock time of a UTC instant, formatted `HH:MM`.
pub fn time_of_day(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%H:%M").to_string()
}

/// The quota week containing `day`: starts Sunday, ends Saturday.
///
/// A meal served Saturday 23:59:59 local and one served the following
/// Sunday 00:00:01 local belong to different windows.
pub fn week_window(day: NaiveDate) -> WeekWindow {
    let days_from_sunday = day.weekday().num_days_from_sunday() as i64;
    let start = day - Duration::days(days_from_sunday);
    WeekWindow {
        start,
        end: start + Duration::days(6),
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_day(s: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("Invalid date format: '{s}' (want YYYY-MM-DD)")))
}

/// Parse an RFC 3339 timestamp string into a UTC instant.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            CoreError::Validation(format!("Invalid timestamp: '{s}' (want RFC 3339)"))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};
    use chrono_tz::America::Sao_Paulo;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -----------------------------------------------------------------------
    // Week windows
    // -----------------------------------------------------------------------

    #[test]
    fn week_of_a_wednesday_runs_sunday_to_saturday() {
        // 2024-06-12 is a Wednesday.
        let window = week_window(day(2024, 6, 12));
        assert_eq!(window.start, day(2024, 6, 9)); // Sunday
        assert_eq!(window.end, day(2024, 6, 15)); // Saturday
    }

    #[test]
    fn sunday_starts_its_own_week() {
        let window = week_window(day(2024, 6, 9));
        assert_eq!(window.start, day(2024, 6, 9));
        assert_eq!(window.end, day(2024, 6, 15));
    }

    #[test]
    fn saturday_ends_its_week() {
        let window = week_window(day(2024, 6, 15));
        assert_eq!(window.start, day(2024, 6, 9));
        assert_eq!(window.end, day(2024, 6, 15));
    }

    #[test]
    fn window_contains_is_inclusive_on_both_ends() {
        let window = week_window(day(2024, 6, 12));
        assert!(window.contains(day(2024, 6, 9)));
        assert!(window.contains(day(2024, 6, 15)));
        assert!(!window.contains(day(2024, 6, 16)));
        assert!(!window.contains(day(2024, 6, 8)));
    }

    #[test]
    fn saturday_night_and_sunday_morning_fall_in_different_windows() {
        // 2024-06-15 is a Saturday. Build both instants as business-local
        // wall clock times, then resolve back through the UTC path the
        // service uses.
        let tz = Sao_Paulo;
        let saturday_night = tz
            .from_local_datetime(
                &day(2024, 6, 15).and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 900).unwrap()),
            )
            .unwrap()
            .with_timezone(&Utc);
        let sunday_morning = tz
            .from_local_datetime(
                &day(2024, 6, 16).and_time(NaiveTime::from_hms_opt(0, 0, 1).unwrap()),
            )
            .unwrap()
            .with_timezone(&Utc);

        let w1 = week_window(local_day(saturday_night, tz));
        let w2 = week_window(local_day(sunday_morning, tz));
        assert_ne!(w1, w2);
        assert_eq!(w1.end + Duration::days(1), w2.start);
    }

    // -----------------------------------------------------------------------
    // Day resolution
    // -----------------------------------------------------------------------

    #[test]
    fn utc_evening_is_already_next_day_east_of_greenwich() {
        // 23:30 UTC on the 10th is 08:30 on the 11th in Tokyo.
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 23, 30, 0).unwrap();
        assert_eq!(local_day(at, chrono_tz::Asia::Tokyo), day(2024, 6, 11));
    }

    #[test]
    fn utc_morning_is_previous_day_in_sao_paulo() {
        // 02:00 UTC on the 11th is 23:00 on the 10th in São Paulo (UTC-3).
        let at = Utc.with_ymd_and_hms(2024, 6, 11, 2, 0, 0).unwrap();
        assert_eq!(local_day(at, Sao_Paulo), day(2024, 6, 10));
    }

    #[test]
    fn time_of_day_uses_business_wall_clock() {
        let at = Utc.with_ymd_and_hms(2024, 6, 11, 14, 5, 0).unwrap();
        assert_eq!(time_of_day(at, Sao_Paulo), "11:05");
    }

    // -----------------------------------------------------------------------
    // Parsing
    // -----------------------------------------------------------------------

    #[test]
    fn parse_day_accepts_iso_dates() {
        assert_eq!(parse_day("2024-06-12").unwrap(), day(2024, 6, 12));
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(parse_day("12/06/2024").is_err());
        assert!(parse_day("2024-13-01").is_err());
        assert!(parse_day("").is_err());
    }

    #[test]
    fn parse_instant_accepts_rfc3339() {
        let at = parse_instant("2024-06-12T11:30:00-03:00").unwrap();
        assert_eq!(local_day(at, Sao_Paulo), day(2024, 6, 12));
    }

    #[test]
    fn parse_instant_rejects_bare_dates() {
        assert!(parse_instant("2024-06-12").is_err());
    }
}
