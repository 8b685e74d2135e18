use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::price::Price;
use super::reservation::Reservation;

// ============================================================================
// Row handle
// ============================================================================

/// Позиция строки в таблице, привязанная к конкретному снимку.
///
/// `row_number` is the 1-based sheet row (the header occupies row 1).
/// Rows shift when someone edits the sheet, so a handle is only meaningful
/// together with the `snapshot` generation it was read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowHandle {
    pub row_number: u32,
    pub snapshot: u64,
}

impl RowHandle {
    pub fn new(row_number: u32, snapshot: u64) -> Self {
        Self {
            row_number,
            snapshot,
        }
    }

    /// Handle is usable for a write only against the snapshot it came from
    pub fn is_current(&self, generation: u64) -> bool {
        self.snapshot == generation
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Статус принтера, выводится из поля Rekond
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterStatus {
    Available,
    Pending,
    Cancelled,
    Delivered,
}

impl PrinterStatus {
    /// Business ordering used when sorting by status
    pub fn rank(&self) -> u8 {
        match self {
            PrinterStatus::Available => 1,
            PrinterStatus::Pending => 2,
            PrinterStatus::Cancelled => 3,
            PrinterStatus::Delivered => 4,
        }
    }

    /// Swedish label shown on the board
    pub fn display_name(&self) -> &'static str {
        match self {
            PrinterStatus::Available => "Tillgänglig",
            PrinterStatus::Pending => "Ej klar",
            PrinterStatus::Cancelled => "Under lagning",
            PrinterStatus::Delivered => "Levererad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterCondition {
    New,
    Used,
    Sold,
}

/// Категория оборудования, выводится из бренда и модели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterType {
    Printer,
    Inkjet,
    Multifunction,
    Touchpanel,
    /// Only used by the fetch-failure sentinel
    Error,
}

impl PrinterType {
    pub fn display_name(&self) -> &'static str {
        match self {
            PrinterType::Printer => "Skrivare",
            PrinterType::Inkjet => "Bläckstråleskrivare",
            PrinterType::Multifunction => "Multifunktion",
            PrinterType::Touchpanel => "Touchpanel",
            PrinterType::Error => "Error",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Одна позиция складского учёта принтеров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterRecord {
    pub handle: RowHandle,

    pub brand: String,
    pub model: String,

    #[serde(rename = "serialNumber")]
    pub serial_number: String,

    #[serde(rename = "printerType")]
    pub printer_type: PrinterType,

    /// Last customer the unit was placed with
    pub location: String,

    #[serde(rename = "sellerName")]
    pub seller_name: String,

    pub price: Price,
    pub condition: PrinterCondition,
    pub status: PrinterStatus,

    /// Raw reservation cell, empty when the unit is free
    #[serde(rename = "reservedBy")]
    pub reserved_by: String,

    #[serde(rename = "lastUpdated")]
    pub last_updated: NaiveDate,

    #[serde(rename = "isError", default)]
    pub is_error: bool,

    /// Fetch failure details, only set on the sentinel
    #[serde(rename = "errorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PrinterRecord {
    /// Строка-заглушка, которую видит пользователь, если все источники недоступны
    pub fn error_sentinel(message: &str, today: NaiveDate) -> Self {
        Self {
            handle: RowHandle::new(0, 0),
            brand: "API Error".to_string(),
            model: "Could not fetch data".to_string(),
            serial_number: String::new(),
            printer_type: PrinterType::Error,
            location: "N/A".to_string(),
            seller_name: String::new(),
            price: Price::parse("N/A"),
            condition: PrinterCondition::Used,
            status: PrinterStatus::Cancelled,
            reserved_by: String::new(),
            last_updated: today,
            is_error: true,
            error_message: Some(message.to_string()),
        }
    }

    pub fn row_number(&self) -> u32 {
        self.handle.row_number
    }

    pub fn brand_model(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }

    pub fn is_reserved(&self) -> bool {
        !self.reserved_by.trim().is_empty()
    }

    pub fn reservation(&self) -> Option<Reservation> {
        Reservation::parse(&self.reserved_by)
    }

    /// Only free, available units can be put on hold
    pub fn is_reservable(&self) -> bool {
        !self.is_error && !self.is_reserved() && self.status == PrinterStatus::Available
    }
}
