pub mod mutator;
pub mod service;

pub use mutator::{CellWriter, ReservationMutator};
pub use service::ReservationService;
