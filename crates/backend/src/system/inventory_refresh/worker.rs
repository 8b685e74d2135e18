use chrono::Utc;
use std::sync::Arc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};
use uuid::Uuid;

use super::store::{InventoryState, InventoryStore};
use crate::domain::a001_printer::RowTransformer;
use crate::usecases::u100_fetch_inventory::SheetFetcher;

/// Одно обновление склада: чтение листа -> преобразование -> замена данных
pub struct InventoryRefresher {
    fetcher: SheetFetcher,
    transformer: RowTransformer,
    store: InventoryStore,
}

impl InventoryRefresher {
    pub fn new(fetcher: SheetFetcher, transformer: RowTransformer, store: InventoryStore) -> Self {
        Self {
            fetcher,
            transformer,
            store,
        }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    /// Runs one fetch. Concurrent calls are not de-duplicated.
    pub async fn refresh(&self) -> InventoryState {
        let session_id = Uuid::new_v4().to_string();
        info!("Inventory refresh {} started", session_id);

        self.store.begin_fetch().await;
        let snapshot = self.fetcher.fetch().await;
        let state = self
            .store
            .finish_fetch(snapshot, &self.transformer, Utc::now())
            .await;

        match &state.error {
            Some(e) => error!("Inventory refresh {} failed: {}", session_id, e),
            None => info!(
                "Inventory refresh {} done: {} printers, generation {}",
                session_id,
                state.data.len(),
                state.generation
            ),
        }
        state
    }
}

/// Фоновый воркер, периодически перечитывающий лист.
pub struct InventoryRefreshWorker {
    refresher: Arc<InventoryRefresher>,
    interval_seconds: u64,
}

impl InventoryRefreshWorker {
    pub fn new(refresher: Arc<InventoryRefresher>, interval_seconds: u64) -> Self {
        Self {
            refresher,
            interval_seconds,
        }
    }

    /// The first tick fires immediately, which doubles as the start-up fetch.
    pub async fn run_loop(&self) {
        info!(
            "Inventory refresh worker started with interval {} seconds",
            self.interval_seconds
        );
        let mut interval = time::interval(time::Duration::from_secs(self.interval_seconds.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.refresher.refresh().await;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::shared::config::ColumnConfig;
    use crate::shared::sheets::{FetchStrategy, RawTable, SheetsError, StrategyKind};
    use crate::usecases::u100_fetch_inventory::fetcher::tests::five_rows;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Answers from a script: `true` = five rows, `false` = network error
    pub(crate) struct ScriptedStrategy {
        script: Mutex<VecDeque<bool>>,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedStrategy {
        pub fn new(script: &[bool]) -> Self {
            Self {
                script: Mutex::new(script.iter().copied().collect()),
                gate: None,
            }
        }
    }

    #[async_trait]
    impl FetchStrategy for ScriptedStrategy {
        fn kind(&self) -> StrategyKind {
            StrategyKind::ApiV4
        }

        async fn fetch(&self) -> Result<RawTable, SheetsError> {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let ok = self.script.lock().unwrap().pop_front().unwrap_or(true);
            if ok {
                five_rows()
            } else {
                Err(SheetsError::Status {
                    status: 500,
                    body: "backend error".to_string(),
                })
            }
        }
    }

    pub(crate) fn refresher_with(strategy: ScriptedStrategy) -> Arc<InventoryRefresher> {
        Arc::new(InventoryRefresher::new(
            SheetFetcher::new(vec![Box::new(strategy)]),
            RowTransformer::new(ColumnConfig::default()),
            InventoryStore::new(),
        ))
    }

    #[tokio::test]
    async fn test_refresh_replaces_data_and_clears_error() {
        let refresher = refresher_with(ScriptedStrategy::new(&[true, false, true]));

        let state = refresher.refresh().await;
        assert_eq!(state.data.len(), 5);
        assert!(state.error.is_none());

        let state = refresher.refresh().await;
        assert!(state.error.is_some());
        assert_eq!(state.data.len(), 1);
        assert!(state.data[0].is_error);

        let state = refresher.refresh().await;
        assert!(state.error.is_none());
        assert_eq!(state.data.len(), 5);
        assert_eq!(state.generation, 3);
    }

    /// Five rows on every call, counting calls
    struct CountingStrategy(Arc<AtomicUsize>);

    #[async_trait]
    impl FetchStrategy for CountingStrategy {
        fn kind(&self) -> StrategyKind {
            StrategyKind::ApiV4
        }

        async fn fetch(&self) -> Result<RawTable, SheetsError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            five_rows()
        }
    }

    async fn settle() {
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_fetches_at_start_then_every_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let refresher = Arc::new(InventoryRefresher::new(
            SheetFetcher::new(vec![Box::new(CountingStrategy(Arc::clone(&calls)))]),
            RowTransformer::new(ColumnConfig::default()),
            InventoryStore::new(),
        ));
        let worker = InventoryRefreshWorker::new(Arc::clone(&refresher), 300);
        let task = tokio::spawn(async move { worker.run_loop().await });

        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(refresher.store().state().await.data.len(), 5);

        time::advance(time::Duration::from_secs(299)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        time::advance(time::Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(refresher.store().state().await.generation, 2);

        task.abort();
    }

    #[tokio::test]
    async fn test_loading_during_in_flight_fetch() {
        let gate = Arc::new(Notify::new());
        let mut strategy = ScriptedStrategy::new(&[true]);
        strategy.gate = Some(Arc::clone(&gate));
        let refresher = refresher_with(strategy);

        let task = {
            let refresher = Arc::clone(&refresher);
            tokio::spawn(async move { refresher.refresh().await })
        };

        let mut seen_loading = false;
        for _ in 0..100 {
            if refresher.store().state().await.loading() {
                seen_loading = true;
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(seen_loading);

        gate.notify_one();
        let state = task.await.unwrap();
        assert!(!state.loading());
        assert_eq!(state.data.len(), 5);
    }
}
