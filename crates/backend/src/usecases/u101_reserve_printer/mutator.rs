use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use contracts::domain::a001_printer::{PrinterRecord, Reservation};
use std::sync::Arc;

use crate::shared::sheets::{SheetsClient, SheetsError};

/// Точечная запись одной ячейки листа
#[async_trait]
pub trait CellWriter: Send + Sync {
    /// `column` is an A1 letter, `row_number` the 1-based sheet row
    async fn write_cell(&self, column: &str, row_number: u32, value: &str)
        -> Result<(), SheetsError>;
}

#[async_trait]
impl CellWriter for SheetsClient {
    async fn write_cell(
        &self,
        column: &str,
        row_number: u32,
        value: &str,
    ) -> Result<(), SheetsError> {
        let range = self.cell_range(column, row_number);
        self.update_cell(&range, value).await
    }
}

/// Writes reservation holds into the sheet.
///
/// It never touches local state: callers refetch after a successful write.
/// Two writers racing on one row are not coordinated, the last write wins.
pub struct ReservationMutator {
    writer: Arc<dyn CellWriter>,
    reservation_days: i64,
}

impl ReservationMutator {
    pub fn new(writer: Arc<dyn CellWriter>, reservation_days: i64) -> Self {
        Self {
            writer,
            reservation_days,
        }
    }

    pub async fn reserve(&self, record: &PrinterRecord, holder: &str, column: &str) -> bool {
        self.reserve_on(record, holder, column, Utc::now().date_naive())
            .await
    }

    pub async fn reserve_on(
        &self,
        record: &PrinterRecord,
        holder: &str,
        column: &str,
        today: NaiveDate,
    ) -> bool {
        let holder = holder.trim();
        if holder.is_empty() {
            tracing::warn!("Reservation of row {} rejected: empty name", record.row_number());
            return false;
        }
        if !record.is_reservable() {
            tracing::warn!(
                "Reservation of row {} rejected: {} is not available",
                record.row_number(),
                record.brand_model()
            );
            return false;
        }

        let expires_on = today + Duration::days(self.reservation_days);
        let text = Reservation::new(holder, expires_on).to_cell_text();
        self.write(record, column, &text).await
    }

    pub async fn unreserve(&self, record: &PrinterRecord, column: &str) -> bool {
        if record.is_error || !record.is_reserved() {
            tracing::warn!(
                "Unreserve of row {} rejected: no reservation present",
                record.row_number()
            );
            return false;
        }
        self.write(record, column, "").await
    }

    async fn write(&self, record: &PrinterRecord, column: &str, value: &str) -> bool {
        match self
            .writer
            .write_cell(column, record.row_number(), value)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    "Row {} ({}) reservation set to {:?}",
                    record.row_number(),
                    record.brand_model(),
                    value
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    "Failed to update reservation of row {} in Google Sheets: {}",
                    record.row_number(),
                    e
                );
                false
            }
        }
    }
}
