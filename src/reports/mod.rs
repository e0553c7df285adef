//! Reports over pantry state
//!
//! Read-only views: most distributed items, daily status, expiring stock and
//! the inventory/history consistency check.

pub mod consistency;
pub mod expiring;
pub mod most_distributed;
pub mod status;

pub use consistency::{ConsistencyReport, Discrepancy};
pub use expiring::{ExpiringItem, ExpiringStockReport};
pub use most_distributed::{most_distributed_items, ItemTotal, MostDistributedReport};
pub use status::PantryStatus;
