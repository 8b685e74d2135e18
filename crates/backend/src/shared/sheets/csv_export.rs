use async_trait::async_trait;
use std::sync::Arc;

use super::client::SheetsClient;
use super::error::SheetsError;
use super::strategy::{FetchStrategy, StrategyKind};
use super::table::RawTable;

/// Опубликованная CSV-выгрузка листа, последний запасной вариант
pub struct CsvExportStrategy {
    client: Arc<SheetsClient>,
}

impl CsvExportStrategy {
    pub fn new(client: Arc<SheetsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for CsvExportStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::CsvExport
    }

    async fn fetch(&self) -> Result<RawTable, SheetsError> {
        let body = self
            .client
            .get_published(&self.client.csv_export_url())
            .await?;
        parse_csv(&body)
    }
}

pub fn parse_csv(csv_text: &str) -> Result<RawTable, SheetsError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut lines = Vec::new();
    for result in reader.records() {
        let record = result?;
        lines.push(record.iter().map(|v| v.to_string()).collect::<Vec<String>>());
    }

    let mut lines = lines.into_iter();
    let headers = lines.next().ok_or(SheetsError::Empty)?;
    let table = RawTable::from_grid(headers, lines.collect());
    if table.is_empty() {
        return Err(SheetsError::Empty);
    }
    Ok(table)
}
