//! In-memory work-order list with best-effort file persistence
//!
//! The in-memory list is the source of truth for the session. Every mutation
//! writes the whole list back to a JSON file under the platform data dir;
//! a failed write is noted on stderr and otherwise ignored. A missing or
//! unreadable file on startup falls back to the seed dataset.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

use super::seed;
use super::types::WorkOrder;

pub struct OrderStore {
    orders: Vec<WorkOrder>,
    path: Option<PathBuf>,
}

impl OrderStore {
    /// Load the saved board, or the seed dataset when there is none (or the
    /// file is malformed - deserializing through the typed `WorkOrder` shape
    /// is the structural validation).
    pub fn load() -> Self {
        let path = data_path().ok();
        let orders = path
            .as_deref()
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|contents| parse_orders(&contents).ok())
            .unwrap_or_else(seed::work_orders);
        Self { orders, path }
    }

    /// A store that never touches the filesystem.
    #[cfg(test)]
    pub fn in_memory(orders: Vec<WorkOrder>) -> Self {
        Self { orders, path: None }
    }

    pub fn orders(&self) -> &[WorkOrder] {
        &self.orders
    }

    pub fn orders_for_center(&self, work_center_id: &str) -> Vec<&WorkOrder> {
        self.orders
            .iter()
            .filter(|o| o.work_center_id == work_center_id)
            .collect()
    }

    pub fn add(&mut self, order: WorkOrder) {
        self.orders.push(order);
        self.persist();
    }

    /// Replace the stored order with the same id. Unknown ids are ignored.
    pub fn update(&mut self, order: WorkOrder) {
        if let Some(existing) = self.orders.iter_mut().find(|o| o.id == order.id) {
            *existing = order;
            self.persist();
        }
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.orders.len();
        self.orders.retain(|o| o.id != id);
        if self.orders.len() != before {
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = self.write_file() {
            eprintln!("Failed to save work orders: {e:#}");
        }
    }

    fn write_file(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.orders)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

pub(crate) fn parse_orders(contents: &str) -> serde_json::Result<Vec<WorkOrder>> {
    serde_json::from_str(contents)
}

fn data_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "planboard", "planboard")
        .context("Could not determine data directory")?;
    Ok(proj_dirs.data_dir().join("work-orders.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::types::WorkOrderStatus;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn order(id: &str) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            name: format!("Order {id}"),
            work_center_id: "wc-1".to_string(),
            status: WorkOrderStatus::Open,
            start_date: d(2025, 3, 1),
            end_date: d(2025, 3, 5),
        }
    }

    #[test]
    fn malformed_contents_are_rejected() {
        assert!(parse_orders("not json at all").is_err());
        assert!(parse_orders("{\"unexpected\": \"shape\"}").is_err());
        // A record missing required fields fails the whole load
        assert!(parse_orders(r#"[{"id": "wo-1"}]"#).is_err());
    }

    #[test]
    fn well_formed_contents_parse() {
        let json = serde_json::to_string(&seed::work_orders()).unwrap();
        let parsed = parse_orders(&json).unwrap();
        assert_eq!(parsed, seed::work_orders());
    }

    #[test]
    fn crud_on_the_in_memory_list() {
        let mut store = OrderStore::in_memory(vec![order("wo-1")]);

        store.add(order("wo-2"));
        assert_eq!(store.orders().len(), 2);

        let mut changed = order("wo-2");
        changed.name = "Renamed".to_string();
        changed.status = WorkOrderStatus::Blocked;
        store.update(changed);
        let updated = store.orders().iter().find(|o| o.id == "wo-2").unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, WorkOrderStatus::Blocked);

        // Updating an unknown id changes nothing
        store.update(order("wo-99"));
        assert_eq!(store.orders().len(), 2);

        store.remove("wo-1");
        assert_eq!(store.orders().len(), 1);
        assert!(store.orders_for_center("wc-1").len() == 1);
    }
}
