//! Per-connection viewer loop.
//!
//! A [`ViewerSession`] moves through `Connecting -> Active -> Closed`:
//!
//! 1. **Connecting** -- the viewer is registered, then the current
//!    snapshot is pushed at once so it never waits for a mutation to see
//!    state.
//! 2. **Active** -- the session waits on its wakeup token and on the
//!    transport. A token triggers a fresh snapshot push; the transport
//!    closing or failing ends the loop.
//! 3. **Closed** -- the subscription is dropped (which unregisters it)
//!    and the transport is closed.
//!
//! Transport errors are never retried and never reported to mutators.
//! The transport itself is abstracted by [`ViewerTransport`] so the loop
//! runs the same over a `WebSocket` or an in-memory test double.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use dashboard_types::{CounterSnapshot, SubscriberId};
use tracing::{debug, warn};

use crate::fanout::Dashboard;
use crate::registry::Subscription;

/// Something a viewer sent us, as far as the session cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Any frame that does not affect the session (text, pings, ...).
    Message,
    /// The peer closed the connection cleanly.
    Closed,
    /// Reading from the transport failed.
    Failed(String),
}

/// Connection a [`ViewerSession`] pushes snapshots through.
pub trait ViewerTransport: Send {
    /// Error produced when a push fails.
    type Error: Display + Send;

    /// Send one text frame to the viewer.
    fn send_text(&mut self, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Wait for the next inbound event.
    ///
    /// Must be cancel safe: the session races this against its wakeup
    /// channel and drops whichever future loses.
    fn recv(&mut self) -> impl Future<Output = Inbound> + Send;

    /// Release the connection. Errors are ignored.
    fn close(self) -> impl Future<Output = ()> + Send;
}

/// Lifecycle state of a [`ViewerSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Registered; initial snapshot not yet pushed.
    Connecting,
    /// Streaming snapshots on every wakeup.
    Active,
    /// Terminal.
    Closed,
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// The viewer closed the connection.
    PeerClosed,
    /// Reading from the transport failed.
    ReadFailed(String),
    /// Pushing a snapshot failed.
    WriteFailed(String),
    /// The wakeup channel stopped delivering tokens.
    FanoutClosed,
}

/// One connected viewer.
#[derive(Debug)]
pub struct ViewerSession<T> {
    dashboard: Arc<Dashboard>,
    subscription: Subscription,
    transport: T,
    state: SessionState,
}

impl<T: ViewerTransport> ViewerSession<T> {
    /// Register a new viewer with the dashboard.
    pub fn connect(dashboard: Arc<Dashboard>, transport: T) -> Self {
        let subscription = dashboard.subscribe();
        debug!(subscriber_id = %subscription.id(), "Viewer connected");
        Self {
            dashboard,
            subscription,
            transport,
            state: SessionState::Connecting,
        }
    }

    /// The identity this viewer was registered under.
    pub const fn id(&self) -> SubscriberId {
        self.subscription.id()
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session until the viewer goes away.
    pub async fn run(mut self) -> CloseReason {
        let reason = self.stream().await;
        self.state = SessionState::Closed;

        let id = self.subscription.id();
        let Self {
            subscription,
            transport,
            ..
        } = self;
        drop(subscription);
        transport.close().await;

        debug!(subscriber_id = %id, ?reason, "Viewer disconnected");
        reason
    }

    async fn stream(&mut self) -> CloseReason {
        if let Err(reason) = self.push_snapshot().await {
            return reason;
        }
        self.state = SessionState::Active;

        loop {
            tokio::select! {
                woken = self.subscription.wait() => {
                    if !woken {
                        return CloseReason::FanoutClosed;
                    }
                    if let Err(reason) = self.push_snapshot().await {
                        return reason;
                    }
                }
                inbound = self.transport.recv() => match inbound {
                    Inbound::Message => {}
                    Inbound::Closed => return CloseReason::PeerClosed,
                    Inbound::Failed(e) => return CloseReason::ReadFailed(e),
                },
            }
        }
    }

    async fn push_snapshot(&mut self) -> Result<(), CloseReason> {
        let snapshot = self.dashboard.snapshot().await;
        let Some(json) = encode_snapshot(&snapshot) else {
            return Ok(());
        };
        self.transport
            .send_text(json)
            .await
            .map_err(|e| CloseReason::WriteFailed(e.to_string()))
    }
}

/// Serialize a snapshot for the wire, logging and skipping on failure.
fn encode_snapshot(snapshot: &CounterSnapshot) -> Option<String> {
    match serde_json::to_string(snapshot) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!("Failed to serialize counter snapshot: {e}");
            None
        }
    }
}
