use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WorkOrderStatus {
    #[default]
    Open,
    InProgress,
    Complete,
    Blocked,
}

impl WorkOrderStatus {
    pub const ALL: [WorkOrderStatus; 4] = [
        WorkOrderStatus::Open,
        WorkOrderStatus::InProgress,
        WorkOrderStatus::Complete,
        WorkOrderStatus::Blocked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "Open",
            WorkOrderStatus::InProgress => "In progress",
            WorkOrderStatus::Complete => "Complete",
            WorkOrderStatus::Blocked => "Blocked",
        }
    }
}

/// A scheduled job occupying one work center for an inclusive date span.
/// `end_date >= start_date` always holds for stored orders; the form
/// validation rejects anything else before it reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    pub name: String,
    pub work_center_id: String,
    pub status: WorkOrderStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl WorkOrder {
    pub fn new_id() -> String {
        format!("wo-{}", Uuid::new_v4())
    }
}

/// A named lane on the board. The list is static reference data; the core
/// never checks that an order's `work_center_id` resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCenter {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&WorkOrderStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::from_str::<WorkOrderStatus>("\"blocked\"").unwrap(),
            WorkOrderStatus::Blocked
        );
    }

    #[test]
    fn order_round_trips_through_the_on_disk_shape() {
        let json = r#"{
            "id": "wo-1",
            "name": "Order Alpha",
            "workCenterId": "wc-1",
            "status": "in-progress",
            "startDate": "2025-01-15",
            "endDate": "2025-01-20"
        }"#;
        let order: WorkOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.work_center_id, "wc-1");
        assert_eq!(
            order.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );

        let back = serde_json::to_string(&order).unwrap();
        assert!(back.contains("\"workCenterId\":\"wc-1\""));
        assert!(back.contains("\"startDate\":\"2025-01-15\""));
    }

    #[test]
    fn missing_fields_fail_structural_validation() {
        let json = r#"{ "id": "wo-1", "name": "No dates" }"#;
        assert!(serde_json::from_str::<WorkOrder>(json).is_err());

        // A non-string where a date is expected is rejected too
        let json = r#"{
            "id": "wo-1", "name": "x", "workCenterId": "wc-1",
            "status": "open", "startDate": 20250115, "endDate": "2025-01-20"
        }"#;
        assert!(serde_json::from_str::<WorkOrder>(json).is_err());
    }
}
