//! `WebSocket` handler for live counter streaming.
//!
//! Clients connect to `GET /dashboard` and receive a JSON-encoded
//! [`CounterSnapshot`](dashboard_types::CounterSnapshot) immediately, then
//! one more each time a counter changes. Changes that land while a client
//! is still catching up are merged: the client always gets the latest
//! state, not every intermediate one.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use dashboard_core::{Inbound, ViewerSession, ViewerTransport};
use tracing::debug;

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming counter snapshots.
///
/// # Route
///
/// `GET /dashboard`
pub async fn ws_dashboard(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Run a viewer session over an upgraded socket.
async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    ViewerSession::connect(Arc::clone(&state.dashboard), WsTransport(socket))
        .run()
        .await;
}

/// [`ViewerTransport`] over an Axum [`WebSocket`].
///
/// Ping replies are queued by the underlying protocol stack, so inbound
/// pings need no handling here.
struct WsTransport(WebSocket);

impl ViewerTransport for WsTransport {
    type Error = axum::Error;

    async fn send_text(&mut self, text: String) -> Result<(), Self::Error> {
        self.0.send(Message::Text(text.into())).await
    }

    async fn recv(&mut self) -> Inbound {
        match self.0.recv().await {
            Some(Ok(Message::Close(_))) | None => Inbound::Closed,
            Some(Err(e)) => Inbound::Failed(e.to_string()),
            Some(Ok(_)) => Inbound::Message,
        }
    }

    async fn close(mut self) {
        if let Err(e) = self.0.send(Message::Close(None)).await {
            debug!("WebSocket close frame not sent: {e}");
        }
    }
}
