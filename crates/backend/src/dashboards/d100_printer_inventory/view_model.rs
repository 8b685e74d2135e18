use chrono::{DateTime, Utc};
use contracts::dashboards::d100_printer_inventory::{
    InventoryPartitions, PrinterRowView, SortColumn, SortDirection, SortState,
};
use contracts::domain::a001_printer::{PrinterCondition, PrinterRecord};
use std::cmp::Ordering;

/// Таблица, в которую попадает запись на табло
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Used,
    New,
    Sold,
    Reserved,
}

pub fn partition_of(record: &PrinterRecord) -> Partition {
    if record.is_reserved() {
        return Partition::Reserved;
    }
    match record.condition {
        PrinterCondition::Used => Partition::Used,
        PrinterCondition::New => Partition::New,
        PrinterCondition::Sold => Partition::Sold,
    }
}

/// Case-insensitive substring match over the searchable fields.
/// An empty query matches everything.
pub fn matches_search(record: &PrinterRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let brand_model = format!("{} {}", record.brand, record.model);
    // only the holder: the "Reserverad av .. till" wording would match every hold
    let holder = record.reservation().map(|r| r.holder).unwrap_or_default();
    [
        record.brand.as_str(),
        record.model.as_str(),
        record.serial_number.as_str(),
        record.location.as_str(),
        record.seller_name.as_str(),
        holder.as_str(),
        brand_model.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn compare_column(a: &PrinterRecord, b: &PrinterRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::BrandModel => a
            .brand_model()
            .to_lowercase()
            .cmp(&b.brand_model().to_lowercase()),
        SortColumn::SerialNumber => a
            .serial_number
            .to_lowercase()
            .cmp(&b.serial_number.to_lowercase()),
        SortColumn::Status => a.status.rank().cmp(&b.status.rank()),
        SortColumn::Location => a.location.to_lowercase().cmp(&b.location.to_lowercase()),
        SortColumn::SellerName => a
            .seller_name
            .to_lowercase()
            .cmp(&b.seller_name.to_lowercase()),
        SortColumn::Price => a.price.amount.cmp(&b.price.amount),
    }
}

/// Primary column honours the direction; ties fall back to status rank and
/// then row number so the order is stable between requests.
pub fn compare(a: &PrinterRecord, b: &PrinterRecord, sort: SortState) -> Ordering {
    let primary = compare_column(a, b, sort.column);
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };
    primary
        .then_with(|| a.status.rank().cmp(&b.status.rank()))
        .then_with(|| a.row_number().cmp(&b.row_number()))
}

pub fn sort_records(records: &mut [&PrinterRecord], sort: SortState) {
    records.sort_by(|a, b| compare(a, b, sort));
}

pub fn row_view(record: &PrinterRecord, now: DateTime<Utc>) -> PrinterRowView {
    let reservation = record.reservation();
    let time_remaining = reservation.as_ref().map(|r| r.time_remaining(now));

    PrinterRowView {
        record: record.clone(),
        status_label: record.status.display_name().to_string(),
        type_label: record.printer_type.display_name().to_string(),
        reservable: record.is_reservable(),
        reservation,
        time_remaining,
    }
}

/// Представление склада: поиск -> разбиение по таблицам -> сортировка
pub struct InventoryViewModel<'a> {
    records: &'a [PrinterRecord],
}

impl<'a> InventoryViewModel<'a> {
    pub fn new(records: &'a [PrinterRecord]) -> Self {
        Self { records }
    }

    pub fn search(&self, query: &str) -> Vec<&'a PrinterRecord> {
        self.records
            .iter()
            .filter(|r| matches_search(r, query))
            .collect()
    }

    pub fn partitions(&self, query: &str, sort: SortState, now: DateTime<Utc>) -> InventoryPartitions {
        let mut used = Vec::new();
        let mut new = Vec::new();
        let mut sold = Vec::new();
        let mut reserved = Vec::new();

        for record in self.search(query) {
            match partition_of(record) {
                Partition::Used => used.push(record),
                Partition::New => new.push(record),
                Partition::Sold => sold.push(record),
                Partition::Reserved => reserved.push(record),
            }
        }

        let finish = |mut part: Vec<&PrinterRecord>| -> Vec<PrinterRowView> {
            sort_records(&mut part, sort);
            part.into_iter().map(|r| row_view(r, now)).collect()
        };

        InventoryPartitions {
            used: finish(used),
            new: finish(new),
            sold: finish(sold),
            reserved: finish(reserved),
        }
    }
}
