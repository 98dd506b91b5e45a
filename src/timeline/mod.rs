pub mod calendar;
mod columns;
mod coords;
mod window;

pub use columns::{build_columns, Column, TimeScale};
pub use coords::{bar_placement, date_to_x, x_to_date};
pub use window::{edge_shift_request, DateBounds, PeriodMarker, TimelineWindow};
