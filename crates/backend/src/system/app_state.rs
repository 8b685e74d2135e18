use std::sync::Arc;

use crate::system::inventory_refresh::{InventoryRefresher, InventoryStore};
use crate::usecases::u101_reserve_printer::ReservationService;

/// Общие зависимости обработчиков, передаются через axum `State`
#[derive(Clone)]
pub struct AppState {
    pub store: InventoryStore,
    pub refresher: Arc<InventoryRefresher>,
    pub reservations: Arc<ReservationService>,
}
