use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::client::SheetsClient;
use super::error::SheetsError;
use super::strategy::{FetchStrategy, StrategyKind};
use super::table::RawTable;

const CALLBACK_MARKER: &str = "setResponse(";

// ============================================================================
// Visualization API response
// ============================================================================

#[derive(Debug, Deserialize)]
struct GvizResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizCol>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizCol {
    #[serde(default)]
    id: String,
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Option<serde_json::Value>,
    #[serde(default)]
    f: Option<String>,
}

/// Опубликованный JSON (gviz), обёрнутый в JS-callback
pub struct GvizJsonStrategy {
    client: Arc<SheetsClient>,
}

impl GvizJsonStrategy {
    pub fn new(client: Arc<SheetsClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FetchStrategy for GvizJsonStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GvizJson
    }

    async fn fetch(&self) -> Result<RawTable, SheetsError> {
        let body = self.client.get_published(&self.client.gviz_url()).await?;
        parse_gviz_response(&body)
    }
}

/// Strips `/*O_o*/ google.visualization.Query.setResponse( ... );`
pub fn strip_callback_wrapper(body: &str) -> Result<&str, SheetsError> {
    let start = match body.find(CALLBACK_MARKER) {
        Some(idx) => idx + CALLBACK_MARKER.len(),
        None => body
            .find('{')
            .ok_or_else(|| SheetsError::Parse("no JSON object in gviz response".to_string()))?,
    };
    let end = body[start..]
        .rfind(')')
        .map(|idx| start + idx)
        .or_else(|| body.rfind('}').map(|idx| idx + 1))
        .ok_or_else(|| SheetsError::Parse("unterminated gviz response".to_string()))?;

    if end <= start {
        return Err(SheetsError::Parse("empty gviz payload".to_string()));
    }
    Ok(body[start..end].trim())
}

pub fn parse_gviz_response(body: &str) -> Result<RawTable, SheetsError> {
    let json = strip_callback_wrapper(body)?;
    let response: GvizResponse = serde_json::from_str(json)?;

    if response.status.as_deref() == Some("error") {
        return Err(SheetsError::Parse("gviz returned status=error".to_string()));
    }

    let table = response.table.ok_or(SheetsError::Empty)?;

    let headers: Vec<String> = table
        .cols
        .iter()
        .map(|col| {
            if col.label.trim().is_empty() {
                col.id.clone()
            } else {
                col.label.clone()
            }
        })
        .collect();

    let grid: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|i| row.c.get(i).and_then(|c| c.as_ref()).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    let raw = RawTable::from_grid(headers, grid);
    if raw.is_empty() {
        return Err(SheetsError::Empty);
    }
    Ok(raw)
}

/// Raw value first, formatted text as fallback; dates only make sense formatted
fn cell_text(cell: &GvizCell) -> String {
    let formatted = cell.f.clone().unwrap_or_default();
    match &cell.v {
        Some(serde_json::Value::String(s)) if s.starts_with("Date(") => formatted,
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        Some(serde_json::Value::Number(n)) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => formatted,
    }
}
