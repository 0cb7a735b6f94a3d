//! Counter names and the snapshot value pushed to dashboard viewers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the three counters tracked by the dashboard.
///
/// The set is closed: any other name is rejected at parse time with
/// [`UnknownCounterName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CounterName {
    /// Orders placed.
    Orders,
    /// Customers signed up.
    Customers,
    /// Products listed.
    Products,
}

impl CounterName {
    /// Every counter, in display order.
    pub const ALL: [Self; 3] = [Self::Orders, Self::Customers, Self::Products];

    /// The lowercase wire name of this counter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orders => "orders",
            Self::Customers => "customers",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for CounterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterName {
    type Err = UnknownCounterName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orders" => Ok(Self::Orders),
            "customers" => Ok(Self::Customers),
            "products" => Ok(Self::Products),
            other => Err(UnknownCounterName(other.to_owned())),
        }
    }
}

/// A counter name outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown counter name: {0}")]
pub struct UnknownCounterName(pub String);

/// Immutable copy of all three counters at one instant.
///
/// Serializes to the fixed-shape record
/// `{"orders": n, "customers": n, "products": n}` that viewers receive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CounterSnapshot {
    /// Current number of orders.
    #[ts(type = "number")]
    pub orders: u64,
    /// Current number of customers.
    #[ts(type = "number")]
    pub customers: u64,
    /// Current number of products.
    #[ts(type = "number")]
    pub products: u64,
}

impl CounterSnapshot {
    /// Build a snapshot from explicit values.
    pub const fn new(orders: u64, customers: u64, products: u64) -> Self {
        Self {
            orders,
            customers,
            products,
        }
    }

    /// Read a single counter by name.
    pub const fn get(&self, name: CounterName) -> u64 {
        match name {
            CounterName::Orders => self.orders,
            CounterName::Customers => self.customers,
            CounterName::Products => self.products,
        }
    }

    /// Mutable access to a single counter by name.
    pub const fn get_mut(&mut self, name: CounterName) -> &mut u64 {
        match name {
            CounterName::Orders => &mut self.orders,
            CounterName::Customers => &mut self.customers,
            CounterName::Products => &mut self.products,
        }
    }
}
