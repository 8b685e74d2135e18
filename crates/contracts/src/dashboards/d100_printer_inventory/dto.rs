use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_printer::{PrinterRecord, Reservation, TimeRemaining};

// ============================================================================
// Sorting
// ============================================================================

/// Колонки, по которым можно сортировать таблицу
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    BrandModel,
    SerialNumber,
    Status,
    Location,
    SellerName,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Текущая сортировка таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::Status,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    /// Clicking the active column flips direction, any other column starts ascending
    pub fn select(&self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                column,
                direction: SortDirection::Asc,
            }
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// GET /api/d100/printers query string
///
/// `sort`/`direction` carry the sort the client is showing; `toggle` is the
/// header the operator just clicked and is applied on top of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<SortColumn>,
    #[serde(default)]
    pub direction: Option<SortDirection>,
    #[serde(default)]
    pub toggle: Option<SortColumn>,
}

impl InventoryQuery {
    pub fn sort_state(&self) -> SortState {
        let default = SortState::default();
        let current = SortState {
            column: self.sort.unwrap_or(default.column),
            direction: self.direction.unwrap_or(default.direction),
        };
        match self.toggle {
            Some(column) => current.select(column),
            None => current,
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Строка таблицы с вычисленными для отображения полями
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterRowView {
    #[serde(flatten)]
    pub record: PrinterRecord,
    #[serde(rename = "statusLabel")]
    pub status_label: String,
    #[serde(rename = "typeLabel")]
    pub type_label: String,
    pub reservable: bool,
    pub reservation: Option<Reservation>,
    #[serde(rename = "timeRemaining")]
    pub time_remaining: Option<TimeRemaining>,
}

/// Records split into the tables shown on the board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryPartitions {
    pub used: Vec<PrinterRowView>,
    pub new: Vec<PrinterRowView>,
    pub sold: Vec<PrinterRowView>,
    pub reserved: Vec<PrinterRowView>,
}

/// Headline figures, always computed over the unfiltered set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    #[serde(rename = "inStock")]
    pub in_stock: usize,
    pub available: usize,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    pub reserved: usize,
    #[serde(rename = "reservedPercent")]
    pub reserved_percent: f64,
    #[serde(rename = "underRepair")]
    pub under_repair: usize,
    #[serde(rename = "awaitingRekond")]
    pub awaiting_rekond: usize,
    #[serde(rename = "totalValue")]
    pub total_value: u64,
    #[serde(rename = "totalValueDisplay")]
    pub total_value_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryDashboardResponse {
    pub partitions: InventoryPartitions,
    pub stats: InventoryStats,
    pub sort: SortState,
    pub search: String,
    pub loading: bool,
    pub error: Option<String>,
    pub generation: u64,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Raw `{ data, loading, error }` view of the refresh loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryStateDto {
    pub data: Vec<PrinterRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub generation: u64,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: Option<DateTime<Utc>>,
}
