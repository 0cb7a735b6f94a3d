//! Counter state and live change fan-out for the dashboard.
//!
//! # Modules
//!
//! - [`store`] -- The three counters behind a single lock
//! - [`registry`] -- Connected viewers and their single-slot wakeup channels
//! - [`fanout`] -- [`Dashboard`], which wakes every viewer after each
//!   successful mutation
//! - [`session`] -- The per-viewer `Connecting -> Active -> Closed` loop
//! - [`config`] -- YAML configuration with environment overrides

pub mod config;
pub mod fanout;
pub mod registry;
pub mod session;
pub mod store;

pub use fanout::Dashboard;
pub use registry::{BroadcastReport, SubscriberRegistry, Subscription, WakeupReceiver};
pub use session::{CloseReason, Inbound, SessionState, ViewerSession, ViewerTransport};
pub use store::{CounterError, CounterStore};
