use axum::{extract::State, http::StatusCode, Json};
use contracts::usecases::u101_reserve_printer::{
    ReservationResult, ReserveRequest, UnreserveRequest,
};

use crate::system::app_state::AppState;

/// POST /api/u101/reserve
///
/// A rejected or failed write answers 409 with `success: false`; the
/// operator retries from the board.
pub async fn reserve(
    State(app): State<AppState>,
    Json(request): Json<ReserveRequest>,
) -> (StatusCode, Json<ReservationResult>) {
    tracing::info!(
        "U101: reserve row {} (snapshot {}) for {:?}",
        request.row_number,
        request.generation,
        request.holder_name
    );
    respond(app.reservations.reserve(request).await)
}

/// POST /api/u101/unreserve
pub async fn unreserve(
    State(app): State<AppState>,
    Json(request): Json<UnreserveRequest>,
) -> (StatusCode, Json<ReservationResult>) {
    tracing::info!(
        "U101: unreserve row {} (snapshot {})",
        request.row_number,
        request.generation
    );
    respond(app.reservations.unreserve(request).await)
}

fn respond(result: ReservationResult) -> (StatusCode, Json<ReservationResult>) {
    if result.success {
        (StatusCode::OK, Json(result))
    } else {
        tracing::warn!("U101: {}", result.message);
        (StatusCode::CONFLICT, Json(result))
    }
}
