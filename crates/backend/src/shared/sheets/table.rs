use std::collections::HashMap;

use super::error::SheetsError;

/// First data row sits directly under the header row
const FIRST_DATA_ROW: u32 = 2;

/// Одна строка листа: заголовок колонки -> значение ячейки
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub row_number: u32,
    pub cells: HashMap<String, String>,
    /// Set only on the sentinel row produced when every strategy failed
    pub error: Option<String>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(|v| v.trim()).unwrap_or("")
    }

    pub fn error_sentinel(message: impl Into<String>) -> Self {
        Self {
            row_number: 0,
            cells: HashMap::new(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Лист в едином виде, независимо от того, какой источник его отдал
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds rows from a header line and positional cell values.
    /// Short rows are padded with empty strings, extra cells are dropped.
    pub fn from_grid(headers: Vec<String>, grid: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();

        let rows = grid
            .into_iter()
            .enumerate()
            .map(|(idx, values)| {
                let cells = headers
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| !h.is_empty())
                    .map(|(col, h)| (h.clone(), values.get(col).cloned().unwrap_or_default()))
                    .collect();
                RawRow {
                    row_number: FIRST_DATA_ROW + idx as u32,
                    cells,
                    error: None,
                }
            })
            .collect();

        Self { headers, rows }
    }

    pub fn error_sentinel(message: impl Into<String>) -> Self {
        Self {
            headers: Vec::new(),
            rows: vec![RawRow::error_sentinel(message)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header.trim())
    }

    /// A1 column letter of a header, e.g. "Reserverad av" -> "J"
    pub fn column_letter(&self, header: &str) -> Result<String, SheetsError> {
        self.column_index(header)
            .map(column_letter)
            .ok_or_else(|| SheetsError::UnknownColumn(header.to_string()))
    }

    pub fn row(&self, row_number: u32) -> Option<&RawRow> {
        self.rows.iter().find(|r| r.row_number == row_number)
    }
}

/// 0 -> "A", 25 -> "Z", 26 -> "AA"
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
