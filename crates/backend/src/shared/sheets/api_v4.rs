use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::client::SheetsClient;
use super::error::SheetsError;
use super::strategy::{FetchStrategy, StrategyKind};
use super::table::RawTable;

/// Ответ values.get
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Typed range read against the named tab, first row is the header
pub struct ApiV4Strategy {
    client: Arc<SheetsClient>,
}

impl ApiV4Strategy {
    pub fn new(client: Arc<SheetsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for ApiV4Strategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ApiV4
    }

    async fn fetch(&self) -> Result<RawTable, SheetsError> {
        let body = self.client.get_values().await?;
        parse_values_response(&body)
    }
}

pub fn parse_values_response(body: &str) -> Result<RawTable, SheetsError> {
    let response: ValuesResponse = serde_json::from_str(body)?;

    let mut rows = response.values.into_iter().map(|row| {
        row.into_iter()
            .map(|v| cell_to_string(&v))
            .collect::<Vec<String>>()
    });

    let headers = rows.next().ok_or(SheetsError::Empty)?;
    let table = RawTable::from_grid(headers, rows.collect());
    if table.is_empty() {
        return Err(SheetsError::Empty);
    }
    Ok(table)
}

fn cell_to_string(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        let body = r#"{
            "range": "Lager!A1:Z1000",
            "majorDimension": "ROWS",
            "values": [
                ["Märke", "Modell", "Värde"],
                ["Ricoh", "IM C3000", "12 500"],
                ["Epson"]
            ]
        }"#;
        let table = parse_values_response(body).unwrap();
        assert_eq!(table.headers, vec!["Märke", "Modell", "Värde"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get("Värde"), "12 500");
        assert_eq!(table.rows[1].get("Modell"), "");
        assert_eq!(table.rows[1].row_number, 3);
    }

    #[test]
    fn test_header_only_is_empty() {
        let body = r#"{"values": [["Märke", "Modell"]]}"#;
        assert!(matches!(parse_values_response(body), Err(SheetsError::Empty)));
    }

    #[test]
    fn test_missing_values_is_empty() {
        let body = r#"{"range": "Lager!A1:Z1000", "majorDimension": "ROWS"}"#;
        assert!(matches!(parse_values_response(body), Err(SheetsError::Empty)));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        assert!(matches!(
            parse_values_response("<html>"),
            Err(SheetsError::Parse(_))
        ));
    }
}
