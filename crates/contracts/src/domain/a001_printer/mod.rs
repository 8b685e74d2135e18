pub mod aggregate;
pub mod price;
pub mod reservation;

pub use aggregate::{PrinterCondition, PrinterRecord, PrinterStatus, PrinterType, RowHandle};
pub use price::{normalize_amount, Price};
pub use reservation::{Reservation, TimeRemaining};
