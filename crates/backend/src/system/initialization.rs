use std::sync::Arc;

use crate::domain::a001_printer::RowTransformer;
use crate::shared::config::Config;
use crate::shared::sheets::{default_strategies, SheetsClient};
use crate::system::app_state::AppState;
use crate::system::inventory_refresh::{InventoryRefreshWorker, InventoryRefresher, InventoryStore};
use crate::usecases::u100_fetch_inventory::SheetFetcher;
use crate::usecases::u101_reserve_printer::{CellWriter, ReservationMutator, ReservationService};

/// Собрать зависимости приложения из конфигурации.
///
/// Nothing is fetched here; the returned worker performs the initial load
/// on its first tick.
pub fn build(config: &Config) -> (AppState, InventoryRefreshWorker) {
    let client = Arc::new(SheetsClient::new(config.sheets.clone()));
    if !client.has_credentials() {
        tracing::warn!(
            "No Google Sheets credentials configured; reading falls back to published exports and reservations are disabled"
        );
    }

    let store = InventoryStore::new();
    let refresher = Arc::new(InventoryRefresher::new(
        SheetFetcher::new(default_strategies(Arc::clone(&client))),
        RowTransformer::new(config.columns.clone()),
        store.clone(),
    ));

    let writer: Arc<dyn CellWriter> = client;
    let reservations = Arc::new(ReservationService::new(
        Arc::clone(&refresher),
        ReservationMutator::new(writer, config.sheets.reservation_days),
        config.columns.reserved_by.clone(),
        config.sheets.reservation_column.clone(),
    ));

    let worker = InventoryRefreshWorker::new(
        Arc::clone(&refresher),
        config.refresh.poll_interval_seconds,
    );

    (
        AppState {
            store,
            refresher,
            reservations,
        },
        worker,
    )
}
