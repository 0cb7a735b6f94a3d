//! Error types for the dashboard API server.
//!
//! [`ObserverError`] wraps handler failures in a single enum that
//! converts into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dashboard_core::CounterError;

/// Errors that can occur in the dashboard API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// A counter mutation was rejected.
    #[error(transparent)]
    Counter(#[from] CounterError),
}

impl ObserverError {
    /// HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Counter(CounterError::Underflow { .. }) => StatusCode::BAD_REQUEST,
            Self::Counter(CounterError::UnknownCounter(_)) => StatusCode::NOT_FOUND,
            Self::Counter(CounterError::Overflow { .. }) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
