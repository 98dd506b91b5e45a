//! Calendar-grid primitives for the timeline
//!
//! Everything here works on `NaiveDate` - plain local wall-clock calendar
//! dates with no time-of-day and no timezone. Dates that cross a boundary
//! (storage, UI text fields) do so as `YYYY-MM-DD` strings and are parsed
//! component-wise, never through a datetime parser that could shift the day.

use chrono::{Datelike, Duration, NaiveDate};

pub fn add_days(d: NaiveDate, n: i64) -> NaiveDate {
    d + Duration::days(n)
}

/// Monday-start week (Sunday rolls back 6 days to the previous Monday)
pub fn start_of_week(d: NaiveDate) -> NaiveDate {
    let days_from_monday = d.weekday().num_days_from_monday();
    d - Duration::days(days_from_monday as i64)
}

pub fn start_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// Add `n` calendar months, landing on day 1 of the resulting month.
/// Columns built from this always align to month boundaries.
pub fn add_months(d: NaiveDate, n: i32) -> NaiveDate {
    let total = d.year() * 12 + d.month0() as i32 + n;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(d)
}

/// Parse an ISO calendar date string like "2025-01-15"
pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn format_iso(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2025-01-15 is a Wednesday
        assert_eq!(start_of_week(d(2025, 1, 15)), d(2025, 1, 13));
        // Monday maps to itself
        assert_eq!(start_of_week(d(2025, 1, 13)), d(2025, 1, 13));
        // Sunday belongs to the week that started 6 days earlier
        assert_eq!(start_of_week(d(2025, 1, 19)), d(2025, 1, 13));
    }

    #[test]
    fn month_addition_normalizes_to_day_one() {
        assert_eq!(add_months(d(2025, 1, 17), 1), d(2025, 2, 1));
        assert_eq!(add_months(d(2024, 12, 31), 3), d(2025, 3, 1));
        assert_eq!(add_months(d(2025, 2, 1), -2), d(2024, 12, 1));
        assert_eq!(add_months(d(2025, 6, 15), 0), d(2025, 6, 1));
    }

    #[test]
    fn iso_round_trip() {
        assert_eq!(parse_iso("2025-01-05"), Some(d(2025, 1, 5)));
        assert_eq!(parse_iso(" 2025-01-05 "), Some(d(2025, 1, 5)));
        assert_eq!(parse_iso("2025-13-05"), None);
        assert_eq!(parse_iso("not a date"), None);
        assert_eq!(format_iso(d(2025, 1, 5)), "2025-01-05");
    }
}
