//! Binding between counter mutations and viewer wakeups.
//!
//! [`Dashboard`] is the one object request handlers and viewer sessions
//! share. A successful mutation is followed by a registry broadcast, and
//! the broadcast only starts after the store's write lock has been
//! released, so a woken viewer that reads a snapshot sees at least the
//! mutation that woke it. A rejected mutation never broadcasts.
//!
//! Viewers are told "state changed, re-read it", not what changed.
//! Several mutations landing before a viewer drains its slot collapse
//! into one wakeup and one snapshot read.

use std::sync::Arc;

use dashboard_types::{CounterName, CounterSnapshot};
use tracing::debug;

use crate::registry::{SubscriberRegistry, Subscription};
use crate::store::{CounterError, CounterStore};

/// Shared counter state plus the viewers watching it.
#[derive(Debug, Default)]
pub struct Dashboard {
    store: CounterStore,
    registry: Arc<SubscriberRegistry>,
}

impl Dashboard {
    /// Create a dashboard with every counter at zero and no viewers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dashboard seeded with the given counter values.
    pub fn with_initial(initial: CounterSnapshot) -> Self {
        Self {
            store: CounterStore::with_initial(initial),
            registry: Arc::new(SubscriberRegistry::new()),
        }
    }

    /// Increment a counter and wake every viewer.
    pub async fn increment(&self, name: CounterName) -> Result<CounterSnapshot, CounterError> {
        let snapshot = self.store.increment(name).await?;
        self.notify(name);
        Ok(snapshot)
    }

    /// Decrement a counter and wake every viewer.
    ///
    /// On [`CounterError::Underflow`] nothing changes and nobody is woken.
    pub async fn decrement(&self, name: CounterName) -> Result<CounterSnapshot, CounterError> {
        let snapshot = self.store.decrement(name).await?;
        self.notify(name);
        Ok(snapshot)
    }

    /// [`increment`](Self::increment) addressed by wire name.
    pub async fn increment_by_name(&self, name: &str) -> Result<CounterSnapshot, CounterError> {
        self.increment(name.parse()?).await
    }

    /// [`decrement`](Self::decrement) addressed by wire name.
    pub async fn decrement_by_name(&self, name: &str) -> Result<CounterSnapshot, CounterError> {
        self.decrement(name.parse()?).await
    }

    /// Current state of all counters.
    pub async fn snapshot(&self) -> CounterSnapshot {
        self.store.snapshot().await
    }

    /// Register a new viewer.
    pub fn subscribe(&self) -> Subscription {
        self.registry.subscribe()
    }

    /// Number of connected viewers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// The viewer registry backing this dashboard.
    pub const fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    fn notify(&self, counter: CounterName) {
        let report = self.registry.broadcast_wakeup();
        debug!(
            %counter,
            delivered = report.delivered,
            coalesced = report.coalesced,
            pruned = report.pruned,
            "Broadcast counter change"
        );
    }
}
