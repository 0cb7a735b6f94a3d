//! The counter store: single source of truth for the current counts.
//!
//! All three counters live behind one [`RwLock`], so mutations are
//! serialized with respect to each other and a snapshot always reflects
//! a prefix of completed mutations. The store knows nothing about
//! subscribers; fan-out happens in [`Dashboard`](crate::fanout::Dashboard)
//! after the write lock is released.

use dashboard_types::{CounterName, CounterSnapshot, UnknownCounterName};
use tokio::sync::RwLock;

/// Errors returned by counter mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CounterError {
    /// Attempted to decrement a counter that is already zero.
    #[error("no {counter} remain to remove")]
    Underflow {
        /// The counter that was at zero.
        counter: CounterName,
    },

    /// Attempted to increment a counter already at `u64::MAX`.
    #[error("{counter} counter is at its maximum")]
    Overflow {
        /// The counter that was saturated.
        counter: CounterName,
    },

    /// The caller named a counter outside the recognized set.
    #[error(transparent)]
    UnknownCounter(#[from] UnknownCounterName),
}

/// Owner of the three dashboard counters.
#[derive(Debug, Default)]
pub struct CounterStore {
    counters: RwLock<CounterSnapshot>,
}

impl CounterStore {
    /// Create a store with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given values.
    pub fn with_initial(initial: CounterSnapshot) -> Self {
        Self {
            counters: RwLock::new(initial),
        }
    }

    /// Increment the named counter by one.
    ///
    /// Returns the state as of this mutation.
    pub async fn increment(&self, name: CounterName) -> Result<CounterSnapshot, CounterError> {
        let mut counters = self.counters.write().await;
        let slot = counters.get_mut(name);
        *slot = slot
            .checked_add(1)
            .ok_or(CounterError::Overflow { counter: name })?;
        Ok(*counters)
    }

    /// Decrement the named counter by one.
    ///
    /// A counter at zero is left untouched and [`CounterError::Underflow`]
    /// is returned.
    pub async fn decrement(&self, name: CounterName) -> Result<CounterSnapshot, CounterError> {
        let mut counters = self.counters.write().await;
        let slot = counters.get_mut(name);
        *slot = slot
            .checked_sub(1)
            .ok_or(CounterError::Underflow { counter: name })?;
        Ok(*counters)
    }

    /// Copy the current state of all three counters.
    pub async fn snapshot(&self) -> CounterSnapshot {
        *self.counters.read().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;

    #[tokio::test]
    async fn starts_at_zero() {
        let store = CounterStore::new();
        assert_eq!(store.snapshot().await, CounterSnapshot::default());
    }

    #[tokio::test]
    async fn increment_touches_only_named_counter() {
        let store = CounterStore::new();
        let after = store.increment(CounterName::Customers).await;
        assert_eq!(after, Ok(CounterSnapshot::new(0, 1, 0)));
        assert_eq!(store.snapshot().await, CounterSnapshot::new(0, 1, 0));
    }

    #[tokio::test]
    async fn decrement_at_zero_is_rejected() {
        let store = CounterStore::new();
        let result = store.decrement(CounterName::Products).await;
        assert_eq!(
            result,
            Err(CounterError::Underflow {
                counter: CounterName::Products
            })
        );
        assert_eq!(store.snapshot().await, CounterSnapshot::default());
    }

    #[tokio::test]
    async fn decrement_after_increment() {
        let store = CounterStore::new();
        assert!(store.increment(CounterName::Orders).await.is_ok());
        assert!(store.increment(CounterName::Orders).await.is_ok());
        let after = store.decrement(CounterName::Orders).await;
        assert_eq!(after, Ok(CounterSnapshot::new(1, 0, 0)));
    }

    #[tokio::test]
    async fn increment_at_max_is_rejected() {
        let store = CounterStore::with_initial(CounterSnapshot::new(u64::MAX, 0, 0));
        let result = store.increment(CounterName::Orders).await;
        assert_eq!(
            result,
            Err(CounterError::Overflow {
                counter: CounterName::Orders
            })
        );
        assert_eq!(store.snapshot().await.orders, u64::MAX);
    }

    #[tokio::test]
    async fn underflow_message_names_counter() {
        let err = CounterError::Underflow {
            counter: CounterName::Orders,
        };
        assert_eq!(err.to_string(), "no orders remain to remove");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        let store = Arc::new(CounterStore::new());
        let mut handles = Vec::new();
        for name in CounterName::ALL {
            for _ in 0..50 {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move { store.increment(name).await }));
            }
        }
        for handle in handles {
            assert!(matches!(handle.await, Ok(Ok(_))));
        }
        assert_eq!(store.snapshot().await, CounterSnapshot::new(50, 50, 50));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn snapshots_never_observe_torn_state() {
        // Every mutation pair keeps orders == customers, so any snapshot
        // taken between whole mutations must show them equal.
        let store = Arc::new(CounterStore::new());
        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for _ in 0..200 {
                    let mut counters = store.counters.write().await;
                    counters.orders = counters.orders.saturating_add(1);
                    counters.customers = counters.customers.saturating_add(1);
                }
            })
        };
        for _ in 0..200 {
            let snapshot = store.snapshot().await;
            assert_eq!(snapshot.orders, snapshot.customers);
            tokio::task::yield_now().await;
        }
        assert!(writer.await.is_ok());
    }

    fn op_strategy() -> impl Strategy<Value = (bool, CounterName)> {
        (
            any::<bool>(),
            prop_oneof![
                Just(CounterName::Orders),
                Just(CounterName::Customers),
                Just(CounterName::Products),
            ],
        )
    }

    proptest! {
        #[test]
        fn counters_track_a_non_negative_model(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let runtime = tokio::runtime::Builder::new_current_thread().build();
            prop_assert!(runtime.is_ok());
            let Ok(runtime) = runtime else { return Ok(()) };

            runtime.block_on(async {
                let store = CounterStore::new();
                let mut model = CounterSnapshot::default();
                for (increment, name) in ops {
                    let before = store.snapshot().await;
                    if increment {
                        let result = store.increment(name).await;
                        *model.get_mut(name) = model.get(name).saturating_add(1);
                        prop_assert_eq!(result, Ok(model));
                    } else if model.get(name) == 0 {
                        let result = store.decrement(name).await;
                        prop_assert_eq!(result, Err(CounterError::Underflow { counter: name }));
                        prop_assert_eq!(store.snapshot().await, before);
                    } else {
                        let result = store.decrement(name).await;
                        *model.get_mut(name) = model.get(name).saturating_sub(1);
                        prop_assert_eq!(result, Ok(model));
                    }
                }
                prop_assert_eq!(store.snapshot().await, model);
                Ok(())
            })?;
        }
    }
}
