pub mod store;
pub mod worker;

pub use store::{InventoryState, InventoryStore};
pub use worker::{InventoryRefreshWorker, InventoryRefresher};
