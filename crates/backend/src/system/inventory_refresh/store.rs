use chrono::{DateTime, Utc};
use contracts::dashboards::d100_printer_inventory::InventoryStateDto;
use contracts::domain::a001_printer::PrinterRecord;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::a001_printer::RowTransformer;
use crate::shared::sheets::StrategyKind;
use crate::usecases::u100_fetch_inventory::SheetSnapshot;

/// Состояние склада в памяти: `{ data, loading, error }` плюс номер снимка
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    pub data: Vec<PrinterRecord>,
    /// Header row of the snapshot in `data`, used to locate cells for writes
    pub headers: Vec<String>,
    pub error: Option<String>,
    /// Bumped every time `data` is replaced
    pub generation: u64,
    pub fetched_at: Option<DateTime<Utc>>,
    pub source: Option<StrategyKind>,
    pub(crate) in_flight: usize,
}

impl InventoryState {
    /// True while any fetch is running, initial or on demand
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn record_at(&self, row_number: u32) -> Option<&PrinterRecord> {
        self.data
            .iter()
            .find(|r| !r.is_error && r.row_number() == row_number)
    }

    pub fn to_dto(&self) -> InventoryStateDto {
        InventoryStateDto {
            data: self.data.clone(),
            loading: self.loading(),
            error: self.error.clone(),
            generation: self.generation,
            fetched_at: self.fetched_at,
        }
    }
}

/// Shared handle to the inventory state. The lock is never held across a fetch.
#[derive(Clone, Default)]
pub struct InventoryStore {
    inner: Arc<RwLock<InventoryState>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self) -> InventoryState {
        self.inner.read().await.clone()
    }

    pub async fn begin_fetch(&self) {
        let mut state = self.inner.write().await;
        state.in_flight += 1;
    }

    /// Replaces the data wholesale with the fetched snapshot.
    ///
    /// Overlapping fetches are not ordered: whichever finishes last wins.
    pub async fn finish_fetch(
        &self,
        snapshot: SheetSnapshot,
        transformer: &RowTransformer,
        now: DateTime<Utc>,
    ) -> InventoryState {
        let mut state = self.inner.write().await;

        let generation = state.generation + 1;
        state.data = transformer.transform_all(&snapshot.table, generation, now.date_naive());
        state.headers = snapshot.table.headers.clone();
        state.generation = generation;
        state.fetched_at = Some(now);
        state.source = snapshot.source;
        state.error = snapshot.error_message();
        state.in_flight = state.in_flight.saturating_sub(1);

        state.clone()
    }
}
