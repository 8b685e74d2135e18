use serde::{Deserialize, Serialize};

/// POST /api/u101/reserve
///
/// `generation` is the snapshot the client's row number was read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub row_number: u32,
    pub generation: u64,
    pub holder_name: String,
}

/// POST /api/u101/unreserve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreserveRequest {
    pub row_number: u32,
    pub generation: u64,
}
