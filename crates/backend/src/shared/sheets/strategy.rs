use async_trait::async_trait;
use serde::Serialize;

use super::error::SheetsError;
use super::table::RawTable;

/// Источник данных листа, в порядке приоритета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    ApiV4,
    GvizJson,
    CsvExport,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::ApiV4 => "Sheets API v4",
            StrategyKind::GvizJson => "published JSON",
            StrategyKind::CsvExport => "published CSV",
        }
    }
}

/// One way of reading the sheet into a [`RawTable`]
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn fetch(&self) -> Result<RawTable, SheetsError>;
}

/// A strategy that was tried and fell through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyFailure {
    pub strategy: StrategyKind,
    pub error: String,
}

impl std::fmt::Display for StrategyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.strategy.name(), self.error)
    }
}
