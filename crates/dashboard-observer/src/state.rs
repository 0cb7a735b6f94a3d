//! Shared application state for the dashboard API server.
//!
//! [`AppState`] wraps the single [`Dashboard`] that both the mutation
//! handlers and the `WebSocket` sessions operate on.

use std::sync::Arc;

use dashboard_core::Dashboard;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Counters and connected viewers.
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Create a new application state with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create application state around an existing dashboard.
    pub const fn with_dashboard(dashboard: Arc<Dashboard>) -> Self {
        Self { dashboard }
    }
}
