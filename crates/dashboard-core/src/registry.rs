//! Registry of connected viewers and their wakeup channels.
//!
//! Each viewer owns the receive end of a capacity-1 channel. The registry
//! keeps only the send ends and never reads from them. Broadcasting
//! copies the membership under the read lock, releases the lock, and then
//! tries to place one token in each slot:
//!
//! - slot empty: the token is delivered
//! - slot full: the signal is coalesced into the pending token
//! - receiver gone: the entry is pruned once the pass completes
//!
//! A broadcast therefore never waits on a viewer and never buffers more
//! than one token per viewer.

use std::collections::HashMap;
use std::sync::Arc;

use dashboard_types::SubscriberId;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

/// Capacity of each viewer's wakeup channel.
const WAKEUP_CAPACITY: usize = 1;

/// Receive end of a viewer's wakeup channel.
pub type WakeupReceiver = mpsc::Receiver<()>;

/// Outcome of a single [`SubscriberRegistry::broadcast_wakeup`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Viewers that received a fresh token.
    pub delivered: usize,
    /// Viewers that already had a token pending.
    pub coalesced: usize,
    /// Stale entries removed because their receiver was dropped.
    pub pruned: usize,
}

/// Mapping from viewer identity to the send end of its wakeup channel.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    subscribers: RwLock<HashMap<SubscriberId, mpsc::Sender<()>>>,
}

impl SubscriberRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh identity and wakeup channel and record it.
    ///
    /// The caller becomes the sole owner of the returned receiver.
    pub fn register(&self) -> (SubscriberId, WakeupReceiver) {
        let id = SubscriberId::new();
        let (tx, rx) = mpsc::channel(WAKEUP_CAPACITY);
        self.subscribers.write().insert(id, tx);
        debug!(subscriber_id = %id, "Subscriber registered");
        (id, rx)
    }

    /// Register and wrap the result in a [`Subscription`] that
    /// unregisters itself when dropped.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let (id, rx) = self.register();
        Subscription {
            registry: Arc::clone(self),
            id,
            rx,
        }
    }

    /// Remove a viewer. Removing an absent id is a no-op.
    ///
    /// Returns `true` if an entry was removed.
    pub fn unregister(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.write().remove(&id).is_some();
        if removed {
            debug!(subscriber_id = %id, "Subscriber unregistered");
        }
        removed
    }

    /// Signal every registered viewer that the state has changed.
    ///
    /// Never blocks: a viewer whose slot is already full simply keeps its
    /// pending token.
    pub fn broadcast_wakeup(&self) -> BroadcastReport {
        let targets: Vec<(SubscriberId, mpsc::Sender<()>)> = self
            .subscribers
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut report = BroadcastReport::default();
        let mut stale = Vec::new();
        for (id, tx) in targets {
            match tx.try_send(()) {
                Ok(()) => report.delivered = report.delivered.saturating_add(1),
                Err(TrySendError::Full(())) => {
                    report.coalesced = report.coalesced.saturating_add(1);
                }
                Err(TrySendError::Closed(())) => stale.push(id),
            }
        }

        if !stale.is_empty() {
            let mut subscribers = self.subscribers.write();
            for id in stale {
                if subscribers.remove(&id).is_some() {
                    report.pruned = report.pruned.saturating_add(1);
                }
            }
        }

        report
    }

    /// Number of registered viewers.
    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Whether no viewers are registered.
    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }

    /// Whether the given viewer is currently registered.
    pub fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers.read().contains_key(&id)
    }
}

/// A live registration in a [`SubscriberRegistry`].
///
/// Owns the viewer's wakeup receiver. Dropping the subscription removes
/// the registry entry, so every exit path of the owning session
/// deregisters, including cancellation of the session task.
#[derive(Debug)]
pub struct Subscription {
    registry: Arc<SubscriberRegistry>,
    id: SubscriberId,
    rx: WakeupReceiver,
}

impl Subscription {
    /// The identity allocated for this viewer.
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next wakeup token.
    ///
    /// Returns `false` if the channel can no longer deliver tokens.
    /// Cancel safe.
    pub async fn wait(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }

    /// Consume a pending token without waiting.
    ///
    /// Returns `true` if a token was pending.
    pub fn try_take(&mut self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}
