//! REST endpoint handlers for the dashboard server.
//!
//! Mutations go through the shared [`Dashboard`](dashboard_core::Dashboard),
//! which wakes every connected viewer on success.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Welcome page |
//! | `GET` | `/api/dashboard` | Current counter snapshot |
//! | `POST` | `/order` | Add an order |
//! | `POST` | `/sign-up` | Add a customer |
//! | `POST` | `/product` | Add a product |
//! | `DELETE` | `/order` | Remove an order |
//! | `DELETE` | `/sign-off` | Remove a customer |
//! | `DELETE` | `/product` | Remove a product |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use dashboard_types::{CounterName, CounterSnapshot};
use tracing::info;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

/// Serve the static welcome page.
pub async fn index() -> impl IntoResponse {
    Html("<h4>Welcome to Dashboard app</h4>")
}

// ---------------------------------------------------------------------------
// GET /api/dashboard
// ---------------------------------------------------------------------------

/// Return the current counter snapshot.
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<CounterSnapshot> {
    Json(state.dashboard.snapshot().await)
}

// ---------------------------------------------------------------------------
// POST /order, /sign-up, /product
// ---------------------------------------------------------------------------

/// Add one order.
pub async fn add_order(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, ObserverError> {
    add(&state, CounterName::Orders).await
}

/// Add one customer.
pub async fn add_customer(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, ObserverError> {
    add(&state, CounterName::Customers).await
}

/// Add one product.
pub async fn add_product(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, ObserverError> {
    add(&state, CounterName::Products).await
}

// ---------------------------------------------------------------------------
// DELETE /order, /sign-off, /product
// ---------------------------------------------------------------------------

/// Remove one order. Fails with `400` when none remain.
pub async fn remove_order(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, ObserverError> {
    remove(&state, CounterName::Orders).await
}

/// Remove one customer. Fails with `400` when none remain.
pub async fn remove_customer(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, ObserverError> {
    remove(&state, CounterName::Customers).await
}

/// Remove one product. Fails with `400` when none remain.
pub async fn remove_product(
    State(state): State<Arc<AppState>>,
) -> Result<&'static str, ObserverError> {
    remove(&state, CounterName::Products).await
}

async fn add(state: &AppState, counter: CounterName) -> Result<&'static str, ObserverError> {
    let snapshot = state.dashboard.increment(counter).await?;
    info!(%counter, value = snapshot.get(counter), "Counter incremented");
    Ok(added_message(counter))
}

async fn remove(state: &AppState, counter: CounterName) -> Result<&'static str, ObserverError> {
    let snapshot = state.dashboard.decrement(counter).await?;
    info!(%counter, value = snapshot.get(counter), "Counter decremented");
    Ok(removed_message(counter))
}

const fn added_message(counter: CounterName) -> &'static str {
    match counter {
        CounterName::Orders => "Order Added",
        CounterName::Customers => "Customer Added",
        CounterName::Products => "Product Added",
    }
}

const fn removed_message(counter: CounterName) -> &'static str {
    match counter {
        CounterName::Orders => "Order Removed",
        CounterName::Customers => "Customer Removed",
        CounterName::Products => "Product Removed",
    }
}
