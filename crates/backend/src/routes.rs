use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::system::{self, app_state::AppState};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D100 PRINTER INVENTORY DASHBOARD
        // ========================================
        .route(
            "/api/d100/printers",
            get(handlers::d100_printer_inventory::get_printers),
        )
        .route(
            "/api/d100/state",
            get(handlers::d100_printer_inventory::get_state),
        )
        .route(
            "/api/d100/refresh",
            post(handlers::d100_printer_inventory::refresh),
        )
        // ========================================
        // U101 RESERVE PRINTER
        // ========================================
        .route(
            "/api/u101/reserve",
            post(handlers::u101_reserve_printer::reserve),
        )
        .route(
            "/api/u101/unreserve",
            post(handlers::u101_reserve_printer::unreserve),
        )
        .with_state(state)
        .layer(middleware::from_fn(
            system::middleware::request_logger,
        ))
        .layer(cors)
}
