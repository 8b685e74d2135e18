use crate::shared::sheets::{
    FetchStrategy, RawTable, SheetsError, StrategyFailure, StrategyKind,
};

/// Результат одного чтения листа.
///
/// Always holds rows: on total failure `table` is a single sentinel row and
/// `source` is `None`.
#[derive(Debug, Clone)]
pub struct SheetSnapshot {
    pub table: RawTable,
    pub source: Option<StrategyKind>,
    pub failures: Vec<StrategyFailure>,
}

impl SheetSnapshot {
    pub fn is_failure(&self) -> bool {
        self.source.is_none()
    }

    /// Combined message of every strategy that fell through
    pub fn error_message(&self) -> Option<String> {
        if !self.is_failure() {
            return None;
        }
        Some(failure_message(&self.failures))
    }
}

fn failure_message(failures: &[StrategyFailure]) -> String {
    let details: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
    if details.is_empty() {
        "All API methods failed".to_string()
    } else {
        format!("All API methods failed ({})", details.join("; "))
    }
}

/// Ordered cascade of read strategies; the first non-empty result wins
pub struct SheetFetcher {
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl SheetFetcher {
    pub fn new(strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self { strategies }
    }

    pub async fn fetch(&self) -> SheetSnapshot {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            let kind = strategy.kind();
            tracing::debug!("Fetching sheet via {}", kind.name());

            let result = match strategy.fetch().await {
                Ok(table) if table.is_empty() => Err(SheetsError::Empty),
                other => other,
            };

            match result {
                Ok(table) => {
                    tracing::info!(
                        "Fetched {} rows via {} ({} fallthroughs)",
                        table.len(),
                        kind.name(),
                        failures.len()
                    );
                    return SheetSnapshot {
                        table,
                        source: Some(kind),
                        failures,
                    };
                }
                Err(e) => {
                    tracing::warn!("{} failed, trying next source: {}", kind.name(), e);
                    failures.push(StrategyFailure {
                        strategy: kind,
                        error: e.to_string(),
                    });
                }
            }
        }

        let message = failure_message(&failures);
        tracing::error!("Error fetching data from Google Sheets: {}", message);
        SheetSnapshot {
            table: RawTable::error_sentinel(message),
            source: None,
            failures,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Strategy with a canned answer, counts how often it was asked
    pub(crate) struct FakeStrategy {
        pub kind: StrategyKind,
        pub answer: fn() -> Result<RawTable, SheetsError>,
        pub calls: Arc<AtomicUsize>,
    }

    impl FakeStrategy {
        pub fn boxed(
            kind: StrategyKind,
            answer: fn() -> Result<RawTable, SheetsError>,
        ) -> (Box<dyn FetchStrategy>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let s = FakeStrategy {
                kind,
                answer,
                calls: Arc::clone(&calls),
            };
            (Box::new(s), calls)
        }
    }

    #[async_trait]
    impl FetchStrategy for FakeStrategy {
        fn kind(&self) -> StrategyKind {
            self.kind
        }

        async fn fetch(&self) -> Result<RawTable, SheetsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.answer)()
        }
    }

    pub(crate) fn five_rows() -> Result<RawTable, SheetsError> {
        let headers = vec!["Märke".to_string(), "Modell".to_string()];
        let grid = (0..5)
            .map(|i| vec!["Ricoh".to_string(), format!("IM C{}", 3000 + i)])
            .collect();
        Ok(RawTable::from_grid(headers, grid))
    }

    fn zero_rows() -> Result<RawTable, SheetsError> {
        Ok(RawTable::from_grid(vec!["Märke".to_string()], vec![]))
    }

    fn network_error() -> Result<RawTable, SheetsError> {
        Err(SheetsError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }

    #[tokio::test]
    async fn test_falls_through_to_third_strategy() {
        let (s1, _) = FakeStrategy::boxed(StrategyKind::ApiV4, zero_rows);
        let (s2, _) = FakeStrategy::boxed(StrategyKind::GvizJson, network_error);
        let (s3, _) = FakeStrategy::boxed(StrategyKind::CsvExport, five_rows);

        let snapshot = SheetFetcher::new(vec![s1, s2, s3]).fetch().await;

        assert_eq!(snapshot.source, Some(StrategyKind::CsvExport));
        assert_eq!(snapshot.table.len(), 5);
        assert_eq!(snapshot.failures.len(), 2);
        assert_eq!(snapshot.failures[0].strategy, StrategyKind::ApiV4);
        assert_eq!(snapshot.failures[1].strategy, StrategyKind::GvizJson);
        assert!(snapshot.error_message().is_none());
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let (s1, _) = FakeStrategy::boxed(StrategyKind::ApiV4, five_rows);
        let (s2, calls2) = FakeStrategy::boxed(StrategyKind::GvizJson, five_rows);

        let snapshot = SheetFetcher::new(vec![s1, s2]).fetch().await;

        assert_eq!(snapshot.source, Some(StrategyKind::ApiV4));
        assert!(snapshot.failures.is_empty());
        assert_eq!(calls2.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_total_failure_yields_sentinel() {
        let (s1, _) = FakeStrategy::boxed(StrategyKind::ApiV4, || Err(SheetsError::MissingApiKey));
        let (s2, _) = FakeStrategy::boxed(StrategyKind::GvizJson, network_error);
        let (s3, _) = FakeStrategy::boxed(StrategyKind::CsvExport, zero_rows);

        let snapshot = SheetFetcher::new(vec![s1, s2, s3]).fetch().await;

        assert!(snapshot.is_failure());
        assert_eq!(snapshot.table.len(), 1);
        assert!(snapshot.table.rows[0].is_error());
        assert_eq!(snapshot.failures.len(), 3);
        let message = snapshot.error_message().unwrap();
        assert!(message.starts_with("All API methods failed"));
        assert!(message.contains("no API key configured"));
    }
}
