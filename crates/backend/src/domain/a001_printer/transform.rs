use chrono::NaiveDate;
use contracts::domain::a001_printer::{Price, PrinterRecord, RowHandle};

use super::rules::{infer_condition, infer_status, infer_type};
use crate::shared::config::ColumnConfig;
use crate::shared::sheets::{RawRow, RawTable};

const UNKNOWN: &str = "Unknown";
const UNKNOWN_LOCATION: &str = "Okänd";
const CONTRACT_PRICE: &str = "Se avtal";

/// Преобразование строк листа Lager в записи принтеров
pub struct RowTransformer {
    columns: ColumnConfig,
}

impl RowTransformer {
    pub fn new(columns: ColumnConfig) -> Self {
        Self { columns }
    }

    /// `None` for structural blanks (no brand and no model)
    pub fn transform(
        &self,
        raw: &RawRow,
        snapshot: u64,
        today: NaiveDate,
    ) -> Option<PrinterRecord> {
        if let Some(message) = &raw.error {
            return Some(PrinterRecord::error_sentinel(message, today));
        }

        let c = &self.columns;
        let brand = raw.get(&c.brand);
        let model = raw.get(&c.model);
        if brand.is_empty() && model.is_empty() {
            return None;
        }

        let price = Price::parse(non_empty_or(raw.get(&c.price), CONTRACT_PRICE));
        if price.is_out_of_range() {
            tracing::warn!(
                "Row {}: price '{}' is out of range, counted as 0",
                raw.row_number,
                price.text
            );
        }

        Some(PrinterRecord {
            handle: RowHandle::new(raw.row_number, snapshot),
            brand: non_empty_or(brand, UNKNOWN).to_string(),
            model: non_empty_or(model, UNKNOWN).to_string(),
            serial_number: raw.get(&c.serial_number).to_string(),
            printer_type: infer_type(brand, model),
            location: non_empty_or(raw.get(&c.location), UNKNOWN_LOCATION).to_string(),
            seller_name: raw.get(&c.seller).to_string(),
            price,
            condition: infer_condition(raw.get(&c.condition)),
            status: infer_status(raw.get(&c.rekond)),
            reserved_by: raw.get(&c.reserved_by).to_string(),
            last_updated: today,
            is_error: false,
            error_message: None,
        })
    }

    pub fn transform_all(
        &self,
        table: &RawTable,
        snapshot: u64,
        today: NaiveDate,
    ) -> Vec<PrinterRecord> {
        let records: Vec<PrinterRecord> = table
            .rows
            .iter()
            .filter_map(|row| self.transform(row, snapshot, today))
            .collect();

        tracing::debug!(
            "Transformed {} of {} rows ({} blank rows dropped)",
            records.len(),
            table.len(),
            table.len() - records.len()
        );
        records
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
