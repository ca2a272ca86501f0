//! # Quote Store
//!
//! Concurrency-safe CRUD over per-customer carts.
//!
//! ## Thread Safety
//! The map is wrapped in `tokio::sync::RwLock` because:
//! 1. Cart reads should not serialize behind each other
//! 2. Order placement holds the write guard across catalog lookups
//!    (`.await` points), which a std lock cannot do
//!
//! ## Locking Discipline
//! Plain methods acquire the lock themselves. The placement workflow
//! instead takes a [`QuoteStoreGuard`] via [`QuoteStore::lock_write`] and
//! calls the guard's methods, so "the lock is already held" is enforced by
//! the type system rather than a boolean flag.

use std::collections::HashMap;

use sale_core::Quote;
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::error::SaleError;

/// Thread-safe mapping from customer id to that customer's quote.
#[derive(Debug, Default)]
pub struct QuoteStore {
    quotes: RwLock<HashMap<u64, Quote>>,
}

impl QuoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the customer's quote, creating an empty one on first
    /// access. Never fails.
    ///
    /// The common case (quote exists) runs under the read guard; only a
    /// first access upgrades to the write guard to insert.
    pub async fn quote(&self, customer_id: u64) -> Quote {
        if let Some(quote) = self.quotes.read().await.get(&customer_id) {
            return quote.clone();
        }

        // First access: insert an empty quote. Re-check under the write
        // guard in case another task won the upgrade race.
        let mut quotes = self.quotes.write().await;
        quotes
            .entry(customer_id)
            .or_insert_with(|| Quote::new(customer_id))
            .clone()
    }

    /// Adds quantity to a line item, inserting the quote and/or the item
    /// if absent. Returns the updated quote. Never fails.
    pub async fn add_product(&self, customer_id: u64, product_id: u64, quantity: i64) -> Quote {
        let mut quotes = self.quotes.write().await;
        let quote = quotes
            .entry(customer_id)
            .or_insert_with(|| Quote::new(customer_id));
        quote.add_product(product_id, quantity);
        quote.clone()
    }

    /// Deletes a line item (no-op if the product is absent).
    ///
    /// Fails with `QuoteNotFound` if the customer has no quote at all.
    pub async fn remove_product(
        &self,
        customer_id: u64,
        product_id: u64,
    ) -> Result<Quote, SaleError> {
        let mut quotes = self.quotes.write().await;
        let quote = quotes
            .get_mut(&customer_id)
            .ok_or(SaleError::QuoteNotFound(customer_id))?;
        quote.remove_product(product_id);
        Ok(quote.clone())
    }

    /// Sets (not adds) a line item's quantity, inserting the item if
    /// absent.
    ///
    /// Fails with `QuoteNotFound` if the customer has no quote at all.
    pub async fn update_quantity(
        &self,
        customer_id: u64,
        product_id: u64,
        quantity: i64,
    ) -> Result<Quote, SaleError> {
        let mut quotes = self.quotes.write().await;
        let quote = quotes
            .get_mut(&customer_id)
            .ok_or(SaleError::QuoteNotFound(customer_id))?;
        quote.set_quantity(product_id, quantity);
        Ok(quote.clone())
    }

    /// Deletes the customer's entire quote (no-op if absent).
    pub async fn clear(&self, customer_id: u64) {
        self.quotes.write().await.remove(&customer_id);
    }

    /// Acquires the write guard for a multi-step read-then-mutate
    /// sequence. Used exactly once, by order placement, which must hold
    /// this guard together with the order store's.
    pub async fn lock_write(&self) -> QuoteStoreGuard<'_> {
        QuoteStoreGuard {
            quotes: self.quotes.write().await,
        }
    }
}

/// Write access to the quote map with the lock already held.
///
/// Dropping the guard releases the lock.
pub struct QuoteStoreGuard<'a> {
    quotes: RwLockWriteGuard<'a, HashMap<u64, Quote>>,
}

impl QuoteStoreGuard<'_> {
    /// Returns the customer's quote, creating an empty one on first
    /// access.
    pub fn quote(&mut self, customer_id: u64) -> &Quote {
        self.quotes
            .entry(customer_id)
            .or_insert_with(|| Quote::new(customer_id))
    }

    /// Deletes the customer's entire quote.
    pub fn clear(&mut self, customer_id: u64) {
        self.quotes.remove(&customer_id);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
