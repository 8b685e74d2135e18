pub mod app_state;
pub mod initialization;
pub mod inventory_refresh;
pub mod middleware;
pub mod tracing;
