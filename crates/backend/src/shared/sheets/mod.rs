//! Чтение и запись Google-таблицы
//!
//! Reads go through one of three endpoints (typed API, published JSON,
//! published CSV); all of them are normalized into a [`RawTable`].
//! Writes only use the typed API.

pub mod api_v4;
pub mod client;
pub mod csv_export;
pub mod error;
pub mod gviz_json;
pub mod strategy;
pub mod table;

use std::sync::Arc;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use strategy::{FetchStrategy, StrategyFailure, StrategyKind};
pub use table::{RawRow, RawTable};

/// Strategies in the fixed priority order used by the fetcher
pub fn default_strategies(client: Arc<SheetsClient>) -> Vec<Box<dyn FetchStrategy>> {
    vec![
        Box::new(api_v4::ApiV4Strategy::new(Arc::clone(&client))),
        Box::new(gviz_json::GvizJsonStrategy::new(Arc::clone(&client))),
        Box::new(csv_export::CsvExportStrategy::new(client)),
    ]
}
