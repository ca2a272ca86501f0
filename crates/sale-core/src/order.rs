//! # Order
//!
//! An immutable, priced record created by successfully placing a quote.
//!
//! ## Price Snapshots
//! Each [`OrderItem`] carries the catalog price that was current at
//! placement time. Later catalog price changes never retroactively affect
//! a placed order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line item of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product ID in the external catalog
    pub product_id: u64,

    /// Quantity carried over from the quote
    pub quantity: i64,

    /// Catalog price at placement time (frozen)
    pub unit_price: f64,
}

impl OrderItem {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// A placed order.
///
/// ## Invariants
/// - `id` is dense and sequential *within the owning customer's order set*,
///   starting at 1; it is not globally unique
/// - The item set never changes after commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Per-customer sequence number, assigned at commit
    pub id: u64,

    /// Owning customer
    pub customer_id: u64,

    /// Line items with frozen prices, keyed by product ID
    pub items: HashMap<u64, OrderItem>,

    /// When the order was committed
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order from already-priced line items.
    pub fn new(id: u64, customer_id: u64, items: HashMap<u64, OrderItem>) -> Self {
        Order {
            id,
            customer_id,
            items,
            placed_at: Utc::now(),
        }
    }

    /// Calculates the order grand total.
    pub fn total(&self) -> f64 {
        self.items.values().map(OrderItem::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
