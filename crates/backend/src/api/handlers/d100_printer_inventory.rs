use axum::{extract::Query, extract::State, Json};
use contracts::dashboards::d100_printer_inventory::{
    InventoryDashboardResponse, InventoryQuery, InventoryStateDto,
};

use crate::dashboards::d100_printer_inventory::service;
use crate::system::app_state::AppState;

/// GET /api/d100/printers?search=ricoh&sort=price&direction=desc
pub async fn get_printers(
    State(app): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> Json<InventoryDashboardResponse> {
    let response = service::get_inventory(&app.store, &query).await;
    tracing::info!(
        "D100 Dashboard: {} used, {} new, {} sold, {} reserved (search {:?})",
        response.partitions.used.len(),
        response.partitions.new.len(),
        response.partitions.sold.len(),
        response.partitions.reserved.len(),
        response.search
    );
    Json(response)
}

/// GET /api/d100/state
pub async fn get_state(State(app): State<AppState>) -> Json<InventoryStateDto> {
    Json(app.store.state().await.to_dto())
}

/// POST /api/d100/refresh
pub async fn refresh(State(app): State<AppState>) -> Json<InventoryStateDto> {
    tracing::info!("D100 Dashboard: refresh requested");
    let state = app.refresher.refresh().await;
    Json(state.to_dto())
}
