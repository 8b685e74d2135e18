use contracts::dashboards::d100_printer_inventory::InventoryStats;
use contracts::domain::a001_printer::{PrinterRecord, PrinterStatus};

use super::view_model::{partition_of, Partition};
use crate::shared::format::format_value;

/// Сводные показатели по всему складу.
///
/// Always takes the full, unfiltered record set so the headline figures stay
/// put while the operator searches the tables. The fetch-failure sentinel is
/// not a printer and is left out of every figure.
pub fn compute_stats(records: &[PrinterRecord]) -> InventoryStats {
    let mut stats = InventoryStats::default();

    for record in records.iter().filter(|r| !r.is_error) {
        stats.total_count += 1;
        match partition_of(record) {
            Partition::Used | Partition::New => stats.in_stock += 1,
            Partition::Reserved => stats.reserved += 1,
            Partition::Sold => {}
        }

        if record.status == PrinterStatus::Available && !record.is_reserved() {
            stats.available += 1;
        }
        match record.status {
            PrinterStatus::Cancelled => stats.under_repair += 1,
            PrinterStatus::Pending => stats.awaiting_rekond += 1,
            _ => {}
        }

        stats.total_value = stats.total_value.saturating_add(record.price.amount);
    }

    stats.reserved_percent = if stats.reserved > 0 && stats.in_stock > 0 {
        let pct = stats.reserved as f64 / stats.in_stock as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    } else {
        0.0
    };
    stats.total_value_display = format_value(stats.total_value);

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d100_printer_inventory::view_model::tests::printer;
    use crate::dashboards::d100_printer_inventory::view_model::InventoryViewModel;
    use contracts::domain::a001_printer::{Price, PrinterCondition};

    fn sample() -> Vec<PrinterRecord> {
        let mut a = printer(2, "Ricoh", "IM C3000", PrinterStatus::Available);
        a.price = Price::parse("12 500");
        let mut b = printer(3, "Epson", "WF-C5790", PrinterStatus::Pending);
        b.price = Price::parse("5 000 kr");
        b.condition = PrinterCondition::New;
        let mut c = printer(4, "Konica", "Bizhub", PrinterStatus::Cancelled);
        c.price = Price::parse("Se avtal");
        let mut d = printer(5, "Canon", "C5", PrinterStatus::Available);
        d.price = Price::parse("3 000");
        d.reserved_by = "Reserverad av Alice till 2025-08-15".to_string();
        let mut e = printer(6, "HP", "M404", PrinterStatus::Delivered);
        e.condition = PrinterCondition::Sold;
        e.price = Price::parse("1 200");
        vec![a, b, c, d, e]
    }

    #[test]
    fn test_counts_and_value() {
        let stats = compute_stats(&sample());

        assert_eq!(stats.total_count, 5);
        assert_eq!(stats.in_stock, 3);
        assert_eq!(stats.reserved, 1);
        assert_eq!(stats.available, 1);
        assert_eq!(stats.under_repair, 1);
        assert_eq!(stats.awaiting_rekond, 1);
        assert_eq!(stats.total_value, 21_700);
        assert_eq!(stats.total_value_display, "22k kr");
        assert_eq!(stats.reserved_percent, 33.3);
    }

    #[test]
    fn test_total_value_ignores_search() {
        let records = sample();
        let before = compute_stats(&records);

        // the table is filtered, the headline figures are not
        let visible = InventoryViewModel::new(&records).search("ricoh");
        assert_eq!(visible.len(), 1);

        let after = compute_stats(&records);
        assert_eq!(before, after);
        assert_eq!(after.total_value, 21_700);
    }

    #[test]
    fn test_total_value_saturates() {
        let mut a = printer(2, "Ricoh", "IM", PrinterStatus::Available);
        a.price = Price::parse("18446744073709551615");
        let mut b = printer(3, "Epson", "WF", PrinterStatus::Available);
        b.price = Price::parse("10");

        let stats = compute_stats(&[a, b]);
        assert_eq!(stats.total_value, u64::MAX);
        assert_eq!(stats.total_count, 2);
    }

    #[test]
    fn test_sentinel_is_not_counted() {
        let today = chrono::NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let sentinel = PrinterRecord::error_sentinel("All API methods failed", today);

        let stats = compute_stats(&[sentinel]);
        assert_eq!(stats, compute_stats(&[]));
        assert_eq!(stats.in_stock, 0);
        assert_eq!(stats.under_repair, 0);
        assert_eq!(stats.total_count, 0);
    }

    #[test]
    fn test_empty_set() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.reserved_percent, 0.0);
        assert_eq!(stats.total_value_display, "0 kr");
    }
}
