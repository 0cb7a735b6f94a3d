//! Axum router construction for the dashboard API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- welcome page
/// - `GET /dashboard` -- `WebSocket` counter stream
/// - `GET /api/dashboard` -- current snapshot
/// - `POST`/`DELETE` `/order` -- add/remove an order
/// - `POST /sign-up`, `DELETE /sign-off` -- add/remove a customer
/// - `POST`/`DELETE` `/product` -- add/remove a product
///
/// CORS is configured to allow any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        // WebSocket
        .route("/dashboard", get(ws::ws_dashboard))
        // Counters
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route(
            "/order",
            post(handlers::add_order).delete(handlers::remove_order),
        )
        .route("/sign-up", post(handlers::add_customer))
        .route("/sign-off", delete(handlers::remove_customer))
        .route(
            "/product",
            post(handlers::add_product).delete(handlers::remove_product),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
