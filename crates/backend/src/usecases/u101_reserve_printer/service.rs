use contracts::domain::a001_printer::{PrinterRecord, RowHandle};
use contracts::usecases::u101_reserve_printer::{
    ReservationResult, ReserveRequest, UnreserveRequest,
};
use std::sync::Arc;

use super::mutator::ReservationMutator;
use crate::shared::sheets::table::column_letter;
use crate::shared::sheets::StrategyKind;
use crate::system::inventory_refresh::InventoryRefresher;

/// Бронирование принтеров с проверкой актуальности номера строки.
///
/// Row numbers are positional. Before any write the sheet is re-read and the
/// row must still hold the same unit the client saw; after a successful write
/// the sheet is re-read again so the board reflects the stored value.
pub struct ReservationService {
    refresher: Arc<InventoryRefresher>,
    mutator: ReservationMutator,
    reservation_header: String,
    column_override: Option<String>,
}

impl ReservationService {
    pub fn new(
        refresher: Arc<InventoryRefresher>,
        mutator: ReservationMutator,
        reservation_header: String,
        column_override: Option<String>,
    ) -> Self {
        Self {
            refresher,
            mutator,
            reservation_header,
            column_override: column_override
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty()),
        }
    }

    pub async fn reserve(&self, request: ReserveRequest) -> ReservationResult {
        if request.holder_name.trim().is_empty() {
            return ReservationResult::rejected("Vänligen ange ditt namn");
        }

        let (record, column) = match self
            .fresh_target(request.row_number, request.generation)
            .await
        {
            Ok(target) => target,
            Err(reason) => return ReservationResult::rejected(reason),
        };

        if !self
            .mutator
            .reserve(&record, &request.holder_name, &column)
            .await
        {
            return ReservationResult::rejected(format!(
                "Could not reserve {} (row {})",
                record.brand_model(),
                record.row_number()
            ));
        }

        let state = self.refresher.refresh().await;
        ReservationResult::ok(
            format!("{} reserved by {}", record.brand_model(), request.holder_name.trim()),
            state.generation,
        )
    }

    pub async fn unreserve(&self, request: UnreserveRequest) -> ReservationResult {
        let (record, column) = match self
            .fresh_target(request.row_number, request.generation)
            .await
        {
            Ok(target) => target,
            Err(reason) => return ReservationResult::rejected(reason),
        };

        if !self.mutator.unreserve(&record, &column).await {
            return ReservationResult::rejected(format!(
                "Could not unreserve {} (row {})",
                record.brand_model(),
                record.row_number()
            ));
        }

        let state = self.refresher.refresh().await;
        ReservationResult::ok(
            format!("{} is no longer reserved", record.brand_model()),
            state.generation,
        )
    }

    /// Re-reads the sheet and returns the record now at `row_number` together
    /// with the column letter of the reservation cell.
    async fn fresh_target(
        &self,
        row_number: u32,
        generation: u64,
    ) -> Result<(PrinterRecord, String), String> {
        let state = self.refresher.store().state().await;
        if !RowHandle::new(row_number, generation).is_current(state.generation) {
            return Err(format!(
                "Row {} was read from snapshot {}, current is {}; refresh and try again",
                row_number, generation, state.generation
            ));
        }
        let seen = state
            .record_at(row_number)
            .cloned()
            .ok_or_else(|| format!("Row {} is not in the current snapshot", row_number))?;

        let fresh = self.refresher.refresh().await;
        if let Some(e) = &fresh.error {
            return Err(format!("Could not re-read the sheet: {}", e));
        }
        // published exports skip blank lines, so their row numbers can drift
        if fresh.source != Some(StrategyKind::ApiV4) {
            let source = fresh.source.map(|s| s.name()).unwrap_or("unknown");
            return Err(format!(
                "Reservations need the Sheets API; the sheet was read from {}",
                source
            ));
        }
        let current = fresh
            .record_at(row_number)
            .ok_or_else(|| format!("Row {} no longer exists in the sheet", row_number))?;

        if !same_unit(&seen, current) {
            tracing::warn!(
                "Row {} changed between reads: {} -> {}",
                row_number,
                seen.brand_model(),
                current.brand_model()
            );
            return Err(format!(
                "Row {} changed since it was read; refresh and try again",
                row_number
            ));
        }

        let column = match &self.column_override {
            Some(c) => c.clone(),
            None => fresh
                .headers
                .iter()
                .position(|h| h == self.reservation_header.trim())
                .map(column_letter)
                .ok_or_else(|| {
                    format!("Column '{}' not found in the sheet", self.reservation_header)
                })?,
        };

        Ok((current.clone(), column))
    }
}

/// Brand, model and serial; units without a serial also compare the
/// remaining descriptive cells.
fn same_unit(a: &PrinterRecord, b: &PrinterRecord) -> bool {
    let base = a.brand == b.brand && a.model == b.model && a.serial_number == b.serial_number;
    if !base || !a.serial_number.trim().is_empty() {
        return base;
    }
    a.location == b.location
        && a.seller_name == b.seller_name
        && a.price.text == b.price.text
        && a.condition == b.condition
        && a.reserved_by == b.reserved_by
}
