use thiserror::Error;

/// Ошибки при работе с Google Sheets
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("response contained no data rows")]
    Empty,

    #[error("column '{0}' not found in header row")]
    UnknownColumn(String),
}

impl From<serde_json::Error> for SheetsError {
    fn from(e: serde_json::Error) -> Self {
        SheetsError::Parse(e.to_string())
    }
}
