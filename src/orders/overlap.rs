//! Conflict detection between work orders on the same work center

use chrono::NaiveDate;

use crate::timeline::calendar::add_days;

use super::types::WorkOrder;

/// Inclusive-day overlap: two spans conflict if they share at least one
/// calendar day, so an order ending the day another starts counts as a
/// conflict. Each inclusive end converts to an exclusive end (+1 day) before
/// the half-open comparison.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    let a_end_exclusive = add_days(a_end, 1);
    let b_end_exclusive = add_days(b_end, 1);
    a_start.max(b_start) < a_end_exclusive.min(b_end_exclusive)
}

/// Does the candidate span conflict with any existing order on the same work
/// center? `exclude_id` skips the order being edited so it doesn't conflict
/// with itself.
pub fn has_conflict(
    start: NaiveDate,
    end: NaiveDate,
    work_center_id: &str,
    orders: &[WorkOrder],
    exclude_id: Option<&str>,
) -> bool {
    orders
        .iter()
        .filter(|o| o.work_center_id == work_center_id)
        .filter(|o| exclude_id != Some(o.id.as_str()))
        .any(|o| ranges_overlap(start, end, o.start_date, o.end_date))
}

/// Per-field outcome of validating the create/edit dialog. Every flag is a
/// user-correctable state, not a fault; the dialog re-renders with the
/// offending fields highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormErrors {
    pub missing_name: bool,
    pub missing_dates: bool,
    pub end_before_start: bool,
    pub missing_center: bool,
    pub overlap: bool,
}

impl FormErrors {
    pub fn any(&self) -> bool {
        self.missing_name
            || self.missing_dates
            || self.end_before_start
            || self.missing_center
            || self.overlap
    }
}

pub fn validate_order_form(
    name: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    work_center_id: &str,
    orders: &[WorkOrder],
    exclude_id: Option<&str>,
) -> FormErrors {
    let mut errors = FormErrors::default();

    if name.trim().is_empty() {
        errors.missing_name = true;
    }
    if work_center_id.is_empty() {
        errors.missing_center = true;
    }

    match (start, end) {
        (Some(start), Some(end)) => {
            if end < start {
                errors.end_before_start = true;
            } else if !errors.missing_center
                && has_conflict(start, end, work_center_id, orders, exclude_id)
            {
                errors.overlap = true;
            }
        }
        _ => errors.missing_dates = true,
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::types::WorkOrderStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn order(id: &str, center: &str, start: NaiveDate, end: NaiveDate) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            name: format!("Order {id}"),
            work_center_id: center.to_string(),
            status: WorkOrderStatus::Open,
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (d(2025, 1, 1), d(2025, 1, 5), d(2025, 1, 3), d(2025, 1, 8)),
            (d(2025, 1, 1), d(2025, 1, 5), d(2025, 1, 5), d(2025, 1, 10)),
            (d(2025, 1, 1), d(2025, 1, 4), d(2025, 1, 5), d(2025, 1, 10)),
        ];
        for (a1, a2, b1, b2) in cases {
            assert_eq!(
                ranges_overlap(a1, a2, b1, b2),
                ranges_overlap(b1, b2, a1, a2)
            );
        }
    }

    #[test]
    fn touching_endpoints_conflict() {
        // One order ends the same day the other starts: both occupy that day.
        assert!(ranges_overlap(
            d(2025, 1, 1),
            d(2025, 1, 5),
            d(2025, 1, 5),
            d(2025, 1, 10)
        ));
    }

    #[test]
    fn adjacent_days_do_not_conflict() {
        assert!(!ranges_overlap(
            d(2025, 1, 1),
            d(2025, 1, 4),
            d(2025, 1, 5),
            d(2025, 1, 10)
        ));
    }

    #[test]
    fn conflict_respects_work_center_and_exclusion() {
        let orders = vec![
            order("wo-1", "wc-1", d(2025, 1, 15), d(2025, 1, 20)),
            order("wo-2", "wc-2", d(2025, 1, 15), d(2025, 1, 20)),
        ];

        // Same center, touching the existing end day
        assert!(has_conflict(
            d(2025, 1, 20),
            d(2025, 1, 25),
            "wc-1",
            &orders,
            None
        ));
        // Different center, same dates
        assert!(!has_conflict(
            d(2025, 1, 15),
            d(2025, 1, 20),
            "wc-3",
            &orders,
            None
        ));
        // Editing wo-1 against itself
        assert!(!has_conflict(
            d(2025, 1, 15),
            d(2025, 1, 20),
            "wc-1",
            &orders,
            Some("wo-1")
        ));
    }

    #[test]
    fn form_validation_categories() {
        let orders = vec![order("wo-1", "wc-1", d(2025, 1, 15), d(2025, 1, 20))];

        let ok = validate_order_form(
            "New order",
            Some(d(2025, 2, 1)),
            Some(d(2025, 2, 5)),
            "wc-1",
            &orders,
            None,
        );
        assert!(!ok.any());

        let errors = validate_order_form("", None, None, "", &orders, None);
        assert!(errors.missing_name && errors.missing_dates && errors.missing_center);

        let errors = validate_order_form(
            "x",
            Some(d(2025, 2, 5)),
            Some(d(2025, 2, 1)),
            "wc-1",
            &orders,
            None,
        );
        assert!(errors.end_before_start);
        assert!(!errors.overlap);

        let errors = validate_order_form(
            "x",
            Some(d(2025, 1, 18)),
            Some(d(2025, 1, 22)),
            "wc-1",
            &orders,
            None,
        );
        assert!(errors.overlap);
    }
}
