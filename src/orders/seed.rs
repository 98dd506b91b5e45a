//! Fallback dataset used when no saved board exists or the saved file
//! cannot be read.

use chrono::NaiveDate;

use super::types::{WorkCenter, WorkOrder, WorkOrderStatus};

pub fn work_centers() -> Vec<WorkCenter> {
    [
        ("wc-1", "Extrusion Line A"),
        ("wc-2", "CNC Machine 1"),
        ("wc-3", "Assembly Station"),
        ("wc-4", "Quality Control"),
        ("wc-5", "Packaging Line"),
    ]
    .into_iter()
    .map(|(id, name)| WorkCenter {
        id: id.to_string(),
        name: name.to_string(),
    })
    .collect()
}

pub fn work_orders() -> Vec<WorkOrder> {
    [
        ("wo-1", "Order Alpha", "wc-1", WorkOrderStatus::InProgress, (2025, 1, 15), (2025, 1, 20)),
        ("wo-2", "Order Beta", "wc-1", WorkOrderStatus::Complete, (2025, 1, 22), (2025, 1, 27)),
        ("wo-3", "Order Gamma", "wc-2", WorkOrderStatus::Open, (2025, 1, 18), (2025, 1, 25)),
        ("wo-4", "Order Delta", "wc-3", WorkOrderStatus::Blocked, (2025, 1, 19), (2025, 1, 28)),
    ]
    .into_iter()
    .filter_map(|(id, name, center, status, start, end)| {
        let (sy, sm, sd) = start;
        let (ey, em, ed) = end;
        Some(WorkOrder {
            id: id.to_string(),
            name: name.to_string(),
            work_center_id: center.to_string(),
            status,
            start_date: NaiveDate::from_ymd_opt(sy, sm, sd)?,
            end_date: NaiveDate::from_ymd_opt(ey, em, ed)?,
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::overlap::has_conflict;

    #[test]
    fn seed_orders_reference_seed_centers_without_conflicts() {
        let centers = work_centers();
        let orders = work_orders();
        assert_eq!(orders.len(), 4);

        for order in &orders {
            assert!(centers.iter().any(|c| c.id == order.work_center_id));
            assert!(order.end_date >= order.start_date);
            assert!(!has_conflict(
                order.start_date,
                order.end_date,
                &order.work_center_id,
                &orders,
                Some(&order.id)
            ));
        }
    }
}
