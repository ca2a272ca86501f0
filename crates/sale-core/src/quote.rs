//! # Quote
//!
//! A customer's in-progress, mutable cart. A quote is not priced: it only
//! records which products the customer wants and in what quantity. Prices
//! are resolved from the catalog at order-placement time.
//!
//! ## Quote Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quote Operations                                   │
//! │                                                                         │
//! │  gRPC Call                QuoteStore              Quote Change          │
//! │  ─────────                ──────────              ────────────          │
//! │                                                                         │
//! │  AddProduct ─────────────► add_product() ───────► qty += n (or insert) │
//! │                                                                         │
//! │  UpdateQuantity ─────────► set_quantity() ──────► qty = n (or insert)  │
//! │                                                                         │
//! │  RemoveProduct ──────────► remove_product() ────► items.remove(id)     │
//! │                                                                         │
//! │  GetQuote ───────────────► (read only)                                  │
//! │                                                                         │
//! │  NOTE: Locking lives in sale-api's QuoteStore. This type assumes the    │
//! │        caller already has exclusive access.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line item in a quote.
///
/// Quantities are preserved verbatim: the store never rejects zero or
/// negative values, matching the permissive service contract. Callers that
/// want a line item gone use removal, not a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    /// Product ID in the external catalog
    pub product_id: u64,

    /// Requested quantity
    pub quantity: i64,
}

/// A customer's cart, keyed by product ID.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product accumulates
///   quantity instead of duplicating the line)
/// - There is at most one quote per customer; the owning store creates one
///   lazily on first access and deletes it on clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Owning customer
    pub customer_id: u64,

    /// Line items, keyed by product ID
    pub items: HashMap<u64, QuoteItem>,

    /// When the quote was lazily created
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Creates a new empty quote for a customer.
    pub fn new(customer_id: u64) -> Self {
        Quote {
            customer_id,
            items: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds quantity to a line item, inserting the item if absent.
    ///
    /// ## Behavior
    /// - Product already present: quantity is added to the existing quantity
    /// - Product absent: a new line item is inserted with the given quantity
    pub fn add_product(&mut self, product_id: u64, quantity: i64) {
        self.items
            .entry(product_id)
            .and_modify(|item| item.quantity += quantity)
            .or_insert(QuoteItem {
                product_id,
                quantity,
            });
    }

    /// Sets (not adds) a line item's quantity, inserting the item if absent.
    pub fn set_quantity(&mut self, product_id: u64, quantity: i64) {
        self.items
            .entry(product_id)
            .and_modify(|item| item.quantity = quantity)
            .or_insert(QuoteItem {
                product_id,
                quantity,
            });
    }

    /// Removes a line item.
    ///
    /// Returns `true` if the item existed. Removing an absent product is a
    /// no-op, not an error.
    pub fn remove_product(&mut self, product_id: u64) -> bool {
        self.items.remove(&product_id).is_some()
    }

    /// Returns the number of unique line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items.values().map(|i| i.quantity).sum()
    }

    /// Checks if the quote has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_quote_is_empty() {
        let quote = Quote::new(1);
        assert_eq!(quote.customer_id, 1);
        assert!(quote.is_empty());
        assert_eq!(quote.item_count(), 0);
    }

    #[test]
    fn test_add_product_accumulates_quantity() {
        let mut quote = Quote::new(1);

        quote.add_product(7, 2);
        quote.add_product(7, 3);

        assert_eq!(quote.item_count(), 1);
        assert_eq!(quote.items[&7].quantity, 5);
    }

    #[test]
    fn test_add_distinct_products() {
        let mut quote = Quote::new(1);

        quote.add_product(7, 2);
        quote.add_product(8, 1);

        assert_eq!(quote.item_count(), 2);
        assert_eq!(quote.total_quantity(), 3);
    }

    #[test]
    fn test_set_quantity_replaces_not_adds() {
        let mut quote = Quote::new(1);

        quote.add_product(7, 2);
        quote.set_quantity(7, 5);

        assert_eq!(quote.items[&7].quantity, 5);
    }

    #[test]
    fn test_set_quantity_inserts_missing_item() {
        let mut quote = Quote::new(1);

        quote.set_quantity(9, 4);

        assert_eq!(quote.item_count(), 1);
        assert_eq!(quote.items[&9].quantity, 4);
    }

    #[test]
    fn test_remove_product() {
        let mut quote = Quote::new(1);
        quote.add_product(7, 2);

        assert!(quote.remove_product(7));
        assert!(quote.is_empty());
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let mut quote = Quote::new(1);
        quote.add_product(7, 2);

        assert!(!quote.remove_product(99));
        assert_eq!(quote.item_count(), 1);
    }

    #[test]
    fn test_zero_and_negative_quantities_preserved() {
        // Permissive by contract: validation is the caller's concern.
        let mut quote = Quote::new(1);

        quote.add_product(7, 0);
        quote.set_quantity(8, -3);

        assert_eq!(quote.items[&7].quantity, 0);
        assert_eq!(quote.items[&8].quantity, -3);
        assert_eq!(quote.item_count(), 2);
    }
}
