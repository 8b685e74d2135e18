use serde::{Deserialize, Serialize};

/// Итог операции бронирования
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResult {
    pub success: bool,
    pub message: String,
    /// Snapshot generation after the post-write refetch, if one ran
    pub generation: Option<u64>,
}

impl ReservationResult {
    pub fn ok(message: impl Into<String>, generation: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            generation: Some(generation),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            generation: None,
        }
    }
}
