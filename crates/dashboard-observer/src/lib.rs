//! Dashboard API server for the live counters.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/dashboard`) pushing a counter snapshot on
//!   connect and after every change
//! - **Mutation endpoints** (`/order`, `/sign-up`, `/sign-off`,
//!   `/product`) that increment or decrement a counter
//! - **Snapshot endpoint** (`/api/dashboard`) for polling clients
//! - **Welcome page** (`GET /`)
//!
//! # Architecture
//!
//! Every handler and session shares one
//! [`Dashboard`](dashboard_core::Dashboard) through [`AppState`]. Each
//! `WebSocket` connection runs a
//! [`ViewerSession`](dashboard_core::ViewerSession) on its own task; a
//! mutation wakes those sessions without ever waiting on them.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
