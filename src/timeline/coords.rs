//! Date <-> pixel transforms over a rendered column sequence
//!
//! Both directions take the columns and the fixed per-column pixel width as
//! parameters; the engine never measures rendered output itself. Lookup is a
//! linear scan - the materialized window is at most a few hundred columns.

use chrono::{Local, NaiveDate};

use super::calendar::add_days;
use super::columns::Column;

/// Pixel offset of `date` along the column sequence. Dates before the first
/// column clamp to 0, dates at or past the end of the last column clamp to
/// the total content width. Inside a column the offset interpolates linearly
/// by day fraction of the column span.
pub fn date_to_x(date: NaiveDate, columns: &[Column], col_width: f32) -> f32 {
    let (Some(first), Some(last)) = (columns.first(), columns.last()) else {
        return 0.0;
    };

    if date <= first.start {
        return 0.0;
    }
    if date >= last.end {
        return columns.len() as f32 * col_width;
    }

    for (i, col) in columns.iter().enumerate() {
        if date >= col.start && date < col.end {
            let span_days = (col.end - col.start).num_days() as f32;
            let into_days = (date - col.start).num_days() as f32;
            return i as f32 * col_width + into_days / span_days * col_width;
        }
    }

    0.0
}

/// Inverse of [`date_to_x`]: the calendar date under pixel offset `x`.
/// The offset is clamped into the content range; the fractional position
/// within the hit column is floored to a whole day (the board deals in
/// calendar dates). Empty columns fall back to today.
pub fn x_to_date(x: f32, columns: &[Column], col_width: f32) -> NaiveDate {
    if columns.is_empty() {
        return Local::now().date_naive();
    }

    let total_width = columns.len() as f32 * col_width;
    let clamped = x.clamp(0.0, total_width - 1.0);

    let index = ((clamped / col_width) as usize).min(columns.len() - 1);
    let col = &columns[index];

    let within = clamped - index as f32 * col_width;
    let ratio = within / col_width;
    let span_days = (col.end - col.start).num_days() as f32;

    add_days(col.start, (ratio * span_days).floor() as i64)
}

/// Bar geometry for an inclusive `[start_date, end_date]` work-order span:
/// `(left, width)` in pixels. Width never drops below half a column so very
/// short orders stay visible and clickable.
pub fn bar_placement(
    start_date: NaiveDate,
    end_date: NaiveDate,
    columns: &[Column],
    col_width: f32,
) -> (f32, f32) {
    let left = date_to_x(start_date, columns, col_width);
    let right = date_to_x(end_date, columns, col_width);
    (left, (right - left).max(col_width * 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::columns::{build_columns, TimeScale};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn clamps_outside_the_window() {
        let cols = build_columns(d(2025, 1, 10), d(2025, 1, 20), TimeScale::Day);
        assert_eq!(date_to_x(d(2024, 12, 1), &cols, 80.0), 0.0);
        assert_eq!(date_to_x(d(2025, 1, 10), &cols, 80.0), 0.0);
        assert_eq!(
            date_to_x(d(2025, 1, 20), &cols, 80.0),
            cols.len() as f32 * 80.0
        );
        assert_eq!(
            date_to_x(d(2025, 6, 1), &cols, 80.0),
            cols.len() as f32 * 80.0
        );
    }

    #[test]
    fn empty_columns_map_to_zero() {
        assert_eq!(date_to_x(d(2025, 1, 1), &[], 80.0), 0.0);
    }

    #[test]
    fn day_window_places_order_at_column_boundary() {
        // Window starts Jan 10; an order starting Jan 15 sits 5 columns in.
        let cols = build_columns(d(2025, 1, 10), d(2025, 2, 10), TimeScale::Day);
        let (left, width) = bar_placement(d(2025, 1, 15), d(2025, 1, 20), &cols, 80.0);
        assert_eq!(left, 400.0);
        assert_eq!(width, 400.0);
    }

    #[test]
    fn width_has_a_floor_for_zero_span_orders() {
        let cols = build_columns(d(2025, 1, 10), d(2025, 2, 10), TimeScale::Day);
        let (_, width) = bar_placement(d(2025, 1, 15), d(2025, 1, 15), &cols, 80.0);
        assert_eq!(width, 40.0);
    }

    #[test]
    fn round_trip_lands_in_the_same_column() {
        for scale in TimeScale::ALL {
            let cols = build_columns(d(2025, 1, 1), d(2025, 6, 1), scale);
            for date in [d(2025, 2, 14), d(2025, 3, 1), d(2025, 4, 27)] {
                let x = date_to_x(date, &cols, 80.0);
                let back = x_to_date(x, &cols, 80.0);
                let original_col = cols
                    .iter()
                    .position(|c| date >= c.start && date < c.end)
                    .unwrap();
                let back_col = cols
                    .iter()
                    .position(|c| back >= c.start && back < c.end)
                    .unwrap();
                assert_eq!(original_col, back_col, "{date} drifted on {scale:?}");
            }
        }
    }

    #[test]
    fn x_to_date_clamps_the_offset() {
        let cols = build_columns(d(2025, 1, 10), d(2025, 1, 20), TimeScale::Day);
        assert_eq!(x_to_date(-50.0, &cols, 80.0), d(2025, 1, 10));
        assert_eq!(x_to_date(1e6, &cols, 80.0), d(2025, 1, 19));
        // Middle of the third column
        assert_eq!(x_to_date(200.0, &cols, 80.0), d(2025, 1, 12));
    }
}
