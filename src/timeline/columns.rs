//! Column generation: bucketing a date range by the active timescale

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::{add_days, add_months, start_of_month, start_of_week};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    #[default]
    Day,
    Week,
    Month,
}

impl TimeScale {
    pub const ALL: [TimeScale; 3] = [TimeScale::Day, TimeScale::Week, TimeScale::Month];

    pub fn label(&self) -> &'static str {
        match self {
            TimeScale::Day => "Day",
            TimeScale::Week => "Week",
            TimeScale::Month => "Month",
        }
    }
}

/// One header bucket of the timeline. `start` is inclusive, `end` exclusive;
/// a generated sequence is contiguous: each column's `end` is the next
/// column's `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

/// Round `d` down to the scale's natural boundary.
pub fn align_to_scale(d: NaiveDate, scale: TimeScale) -> NaiveDate {
    match scale {
        TimeScale::Day => d,
        TimeScale::Week => start_of_week(d),
        TimeScale::Month => start_of_month(d),
    }
}

/// Advance `d` by `n` scale units. `d` is assumed aligned; the result stays
/// aligned (month stepping always lands on day 1).
pub fn step(d: NaiveDate, scale: TimeScale, n: i64) -> NaiveDate {
    match scale {
        TimeScale::Day => add_days(d, n),
        TimeScale::Week => add_days(d, n * 7),
        TimeScale::Month => add_months(d, n as i32),
    }
}

/// Build the ordered column sequence covering `[start, end)`.
/// `start` is aligned down to the scale boundary first; an empty range
/// (start >= end) yields an empty sequence.
pub fn build_columns(start: NaiveDate, end: NaiveDate, scale: TimeScale) -> Vec<Column> {
    let mut cols = Vec::new();
    let mut d = align_to_scale(start, scale);

    while d < end {
        let next = step(d, scale, 1);
        cols.push(Column {
            start: d,
            end: next,
            label: column_label(d, scale),
        });
        d = next;
    }
    cols
}

fn column_label(start: NaiveDate, scale: TimeScale) -> String {
    match scale {
        TimeScale::Day => start.format("%b %d").to_string(),
        TimeScale::Week => format!("Wk of {}", start.format("%b %d")),
        TimeScale::Month => start.format("%b %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn assert_contiguous(cols: &[Column]) {
        for pair in cols.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "columns must be contiguous");
            assert!(pair[0].start < pair[1].start, "columns must be ordered");
        }
        for col in cols {
            assert!(col.start < col.end);
        }
    }

    #[test]
    fn three_day_range() {
        let cols = build_columns(d(2025, 1, 1), d(2025, 1, 4), TimeScale::Day);
        assert_eq!(cols.len(), 3);
        assert_contiguous(&cols);
        assert_eq!(cols[0].start, d(2025, 1, 1));
        assert_eq!(cols[2].end, d(2025, 1, 4));
        let labels: Vec<&str> = cols.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Jan 01", "Jan 02", "Jan 03"]);
    }

    #[test]
    fn week_columns_align_to_monday() {
        // 2025-01-15 is a Wednesday; the first column starts the 13th
        let cols = build_columns(d(2025, 1, 15), d(2025, 2, 10), TimeScale::Week);
        assert_contiguous(&cols);
        assert_eq!(cols[0].start, d(2025, 1, 13));
        assert_eq!(cols[0].end, d(2025, 1, 20));
        assert_eq!(cols[0].label, "Wk of Jan 13");
        assert!(cols.first().unwrap().start <= d(2025, 1, 15));
        assert!(cols.last().unwrap().end >= d(2025, 2, 10));
    }

    #[test]
    fn month_columns_dec_to_march_exclusive() {
        let cols = build_columns(d(2024, 12, 15), d(2025, 3, 1), TimeScale::Month);
        assert_eq!(cols.len(), 3);
        assert_contiguous(&cols);
        assert_eq!(cols[0].label, "Dec 2024");
        assert_eq!(cols[1].label, "Jan 2025");
        assert_eq!(cols[2].label, "Feb 2025");
        assert_eq!(cols[2].end, d(2025, 3, 1));
    }

    #[test]
    fn degenerate_range_is_empty_not_an_error() {
        assert!(build_columns(d(2025, 1, 4), d(2025, 1, 4), TimeScale::Day).is_empty());
        assert!(build_columns(d(2025, 1, 8), d(2025, 1, 4), TimeScale::Week).is_empty());
    }

    #[test]
    fn contiguous_for_all_scales() {
        for scale in TimeScale::ALL {
            let cols = build_columns(d(2024, 11, 3), d(2025, 4, 20), scale);
            assert!(!cols.is_empty());
            assert_contiguous(&cols);
        }
    }
}
