//! Shared type definitions for the live dashboard counters.
//!
//! This crate is the single source of truth for the values that cross
//! crate boundaries: the counter names, the snapshot pushed to viewers,
//! and subscriber identities. Types flow downstream to `TypeScript` via
//! `ts-rs` for the dashboard frontend.
//!
//! # Modules
//!
//! - [`counters`] -- Counter names and the immutable [`CounterSnapshot`]
//! - [`ids`] -- Type-safe UUID wrappers for subscriber identities

pub mod counters;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use counters::{CounterName, CounterSnapshot, UnknownCounterName};
pub use ids::SubscriberId;

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::counters::CounterName::export_all();
        let _ = crate::counters::CounterSnapshot::export_all();
        let _ = crate::ids::SubscriberId::export_all();
    }
}
