//! Scrollable column window over the unbounded timeline
//!
//! The window is a plain value owned by the app and handed to the rendering
//! code each frame; there is no shared singleton. It materializes a bounded
//! slice of columns around the anchor date, and shifts that slice when the
//! caller reports the scroll position nearing an edge. The caller compensates
//! its scroll offset by the applied delta so the shift is invisible.

use chrono::{Datelike, NaiveDate};

use super::columns::{align_to_scale, build_columns, step, Column, TimeScale};

/// Overall valid date range the window may not leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// Three calendar years centered on `anchor`: Jan 1 of the previous year
    /// through Dec 31 of the next.
    pub fn around(anchor: NaiveDate) -> Self {
        let min = NaiveDate::from_ymd_opt(anchor.year() - 1, 1, 1)
            .unwrap_or_else(|| align_to_scale(anchor, TimeScale::Month));
        let max = NaiveDate::from_ymd_opt(anchor.year() + 1, 12, 31).unwrap_or(anchor);
        Self { min, max }
    }
}

/// Column index holding the current period, with its header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodMarker {
    pub index: usize,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct TimelineWindow {
    start: NaiveDate,
    scale: TimeScale,
    column_count: usize,
    shift_step: usize,
    bounds: DateBounds,
    columns: Vec<Column>,
}

/// (column count, edge-shift step) per scale. Coarser scales materialize
/// fewer, wider buckets; the month window is a fixed calendar year and never
/// auto-shifts.
fn window_defaults(scale: TimeScale) -> (usize, usize) {
    match scale {
        TimeScale::Day => (120, 60),
        TimeScale::Week => (26, 13),
        TimeScale::Month => (12, 0),
    }
}

impl TimelineWindow {
    pub fn new(anchor: NaiveDate, scale: TimeScale, bounds: DateBounds) -> Self {
        let (column_count, shift_step) = window_defaults(scale);

        // Offset backward so the anchor sits inside the window, not at its
        // edge. The month window is the anchor's calendar year.
        let initial = match scale {
            TimeScale::Day | TimeScale::Week => step(
                align_to_scale(anchor, scale),
                scale,
                -(column_count as i64 / 2),
            ),
            TimeScale::Month => NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap_or(anchor),
        };

        let mut window = Self {
            start: initial,
            scale,
            column_count,
            shift_step,
            bounds,
            columns: Vec::new(),
        };
        window.start = window.clamp_start(initial);
        window.rebuild();
        window
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Columns to move per edge trigger; 0 means the window is fixed.
    pub fn shift_step(&self) -> usize {
        self.shift_step
    }

    /// Move the window by `delta` columns (negative = earlier). The new start
    /// is clamped into the valid bounds; the return value is the delta
    /// actually applied, in columns. Zero means the shift was a no-op and the
    /// caller should skip both the rebuild reaction and any scroll
    /// compensation.
    pub fn shift(&mut self, delta: i64) -> i64 {
        let target = step(self.start, self.scale, delta);
        let clamped = self.clamp_start(target);
        let applied = steps_between(self.scale, self.start, clamped);

        if applied != 0 {
            self.start = clamped;
            self.rebuild();
        }
        applied
    }

    /// Re-derive the column sequence from the current state. Idempotent.
    pub fn rebuild(&mut self) {
        let end = step(self.start, self.scale, self.column_count as i64);
        self.columns = build_columns(self.start, end, self.scale);
    }

    /// Locate the column containing `today`, if it is inside the window.
    pub fn current_period(&self, today: NaiveDate) -> Option<PeriodMarker> {
        let index = self
            .columns
            .iter()
            .position(|c| c.start <= today && today < c.end)?;
        let label = match self.scale {
            TimeScale::Day => "Today",
            TimeScale::Week => "Current week",
            TimeScale::Month => "Current month",
        };
        Some(PeriodMarker { index, label })
    }

    fn clamp_start(&self, candidate: NaiveDate) -> NaiveDate {
        let min = align_to_scale(self.bounds.min, self.scale);
        let latest = step(
            align_to_scale(self.bounds.max, self.scale),
            self.scale,
            -(self.column_count as i64 - 1),
        );
        let max = latest.max(min);
        candidate.max(min).min(max)
    }
}

/// Whole scale-units between two aligned dates (positive when `to` is later).
fn steps_between(scale: TimeScale, from: NaiveDate, to: NaiveDate) -> i64 {
    match scale {
        TimeScale::Day => (to - from).num_days(),
        TimeScale::Week => (to - from).num_days() / 7,
        TimeScale::Month => {
            (to.year() as i64 * 12 + to.month0() as i64)
                - (from.year() as i64 * 12 + from.month0() as i64)
        }
    }
}

/// Pixel distance from either scroll edge below which the caller should
/// request a window shift.
pub const EDGE_THRESHOLD_PX: f32 = 160.0;

/// Edge-trigger decision for a reported scroll position: the shift request
/// (in columns) the caller should pass to [`TimelineWindow::shift`], or None
/// when the scroll position is comfortably inside the content.
pub fn edge_shift_request(
    scroll_x: f32,
    viewport_width: f32,
    content_width: f32,
    shift_step: usize,
) -> Option<i64> {
    if shift_step == 0 || content_width <= viewport_width {
        return None;
    }
    if scroll_x < EDGE_THRESHOLD_PX {
        return Some(-(shift_step as i64));
    }
    if scroll_x + viewport_width > content_width - EDGE_THRESHOLD_PX {
        return Some(shift_step as i64);
    }
    None
}
