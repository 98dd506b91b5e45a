mod overlap;
pub mod seed;
mod store;
mod types;

pub use overlap::{has_conflict, ranges_overlap, validate_order_form, FormErrors};
pub use store::OrderStore;
pub use types::{WorkCenter, WorkOrder, WorkOrderStatus};
