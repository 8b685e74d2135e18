pub mod request;
pub mod response;

pub use request::{ReserveRequest, UnreserveRequest};
pub use response::ReservationResult;
