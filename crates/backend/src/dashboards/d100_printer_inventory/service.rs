use chrono::{DateTime, Utc};
use contracts::dashboards::d100_printer_inventory::{
    InventoryDashboardResponse, InventoryQuery,
};

use super::stats::compute_stats;
use super::view_model::InventoryViewModel;
use crate::system::inventory_refresh::{InventoryState, InventoryStore};

/// Собрать ответ табло по текущему состоянию склада
pub async fn get_inventory(
    store: &InventoryStore,
    query: &InventoryQuery,
) -> InventoryDashboardResponse {
    let state = store.state().await;
    build_response(&state, query, Utc::now())
}

pub fn build_response(
    state: &InventoryState,
    query: &InventoryQuery,
    now: DateTime<Utc>,
) -> InventoryDashboardResponse {
    let search = query.search.clone().unwrap_or_default();
    let sort = query.sort_state();
    let vm = InventoryViewModel::new(&state.data);

    InventoryDashboardResponse {
        partitions: vm.partitions(&search, sort, now),
        stats: compute_stats(&state.data),
        sort,
        search,
        loading: state.loading(),
        error: state.error.clone(),
        generation: state.generation,
        fetched_at: state.fetched_at,
    }
}
