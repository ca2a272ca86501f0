//! # Order Store
//!
//! Thread-safe storage for placed orders: a per-customer order map plus an
//! owner index from order id back to the owning customer.
//!
//! ## Order Numbering
//! Each customer's orders are numbered densely from 1, using an explicit
//! `next_id` counter stored alongside the collection. The counter is only
//! ever touched under the write guard, so concurrent placements for the
//! same customer can never hand out the same id. Recomputing the id from
//! the collection length would break if orders were ever deleted; the
//! counter does not.
//!
//! ## Owner Index
//! `order(id)` resolves the owning customer through the index. Index and
//! forward map are only mutated together under the write guard, so a
//! reader never observes one without the other. Order ids are per-customer
//! sequences, so the index records the most recent owner of a given id.

use std::collections::HashMap;

use sale_core::{Order, OrderItem};
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::error::SaleError;

/// One customer's order collection and id counter.
#[derive(Debug)]
struct CustomerOrders {
    orders: HashMap<u64, Order>,
    next_id: u64,
}

impl CustomerOrders {
    fn new() -> Self {
        CustomerOrders {
            orders: HashMap::new(),
            next_id: 1,
        }
    }
}

/// Forward map and owner index, guarded as one unit.
#[derive(Debug, Default)]
struct OrderBook {
    by_customer: HashMap<u64, CustomerOrders>,
    owner_index: HashMap<u64, u64>,
}

/// Thread-safe mapping from customer id to that customer's orders.
#[derive(Debug, Default)]
pub struct OrderStore {
    book: RwLock<OrderBook>,
}

impl OrderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every order owned by the customer.
    ///
    /// Fails with `NoOrders` if the customer has no entry at all; a
    /// customer who never placed an order is indistinguishable from an
    /// unknown customer here.
    pub async fn orders_for(&self, customer_id: u64) -> Result<Vec<Order>, SaleError> {
        let book = self.book.read().await;
        let customer = book
            .by_customer
            .get(&customer_id)
            .ok_or(SaleError::NoOrders(customer_id))?;
        Ok(customer.orders.values().cloned().collect())
    }

    /// Looks up a single order through the owner index.
    ///
    /// Fails with `OrderNotFound` if the id is unknown.
    pub async fn order(&self, order_id: u64) -> Result<Order, SaleError> {
        let book = self.book.read().await;
        let customer_id = *book
            .owner_index
            .get(&order_id)
            .ok_or(SaleError::OrderNotFound(order_id))?;

        book.by_customer
            .get(&customer_id)
            .and_then(|c| c.orders.get(&order_id))
            .cloned()
            .ok_or(SaleError::OrderNotFound(order_id))
    }

    /// Acquires the write guard for order insertion.
    ///
    /// Order placement holds this guard for the whole validate→commit
    /// window, and always acquires it BEFORE the quote store's guard.
    pub async fn lock_write(&self) -> OrderStoreGuard<'_> {
        OrderStoreGuard {
            book: self.book.write().await,
        }
    }
}

/// Write access to the order book with the lock already held.
pub struct OrderStoreGuard<'a> {
    book: RwLockWriteGuard<'a, OrderBook>,
}

impl OrderStoreGuard<'_> {
    /// Commits a new order from already-priced items, assigning the next
    /// id in the customer's sequence and updating the owner index in the
    /// same critical section.
    pub fn insert(&mut self, customer_id: u64, items: HashMap<u64, OrderItem>) -> Order {
        let customer = self
            .book
            .by_customer
            .entry(customer_id)
            .or_insert_with(CustomerOrders::new);

        let order_id = customer.next_id;
        customer.next_id += 1;

        let order = Order::new(order_id, customer_id, items);
        customer.orders.insert(order_id, order.clone());
        self.book.owner_index.insert(order_id, customer_id);
        order
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn items(product_id: u64, quantity: i64, unit_price: f64) -> HashMap<u64, OrderItem> {
        let mut map = HashMap::new();
        map.insert(
            product_id,
            OrderItem {
                product_id,
                quantity,
                unit_price,
            },
        );
        map
    }

    #[tokio::test]
    async fn test_sequential_ids_per_customer() {
        let store = OrderStore::new();

        let first = store.lock_write().await.insert(1, items(7, 1, 10.0));
        let second = store.lock_write().await.insert(1, items(8, 2, 5.0));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_independent_across_customers() {
        let store = OrderStore::new();

        let a = store.lock_write().await.insert(1, items(7, 1, 10.0));
        let b = store.lock_write().await.insert(2, items(7, 1, 10.0));

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 1);
    }

    #[tokio::test]
    async fn test_lookup_through_owner_index() {
        let store = OrderStore::new();

        let placed = store.lock_write().await.insert(42, items(7, 3, 9.5));
        let found = store.order(placed.id).await.unwrap();

        assert_eq!(found.customer_id, 42);
        assert_eq!(found.items[&7].quantity, 3);
    }

    #[tokio::test]
    async fn test_unknown_order_fails() {
        let store = OrderStore::new();

        let err = store.order(99).await.unwrap_err();
        assert!(matches!(err, SaleError::OrderNotFound(99)));
    }

    #[tokio::test]
    async fn test_orders_for_unknown_customer_fails() {
        // "No entry" is an error, not an empty list; a customer with zero
        // orders is indistinguishable from an unknown customer.
        let store = OrderStore::new();

        let err = store.orders_for(1).await.unwrap_err();
        assert!(matches!(err, SaleError::NoOrders(1)));
    }

    #[tokio::test]
    async fn test_orders_for_returns_all() {
        let store = OrderStore::new();

        store.lock_write().await.insert(1, items(7, 1, 10.0));
        store.lock_write().await.insert(1, items(8, 2, 5.0));

        let orders = store.orders_for(1).await.unwrap();
        assert_eq!(orders.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_never_collide() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let store = Arc::new(OrderStore::new());
        let mut handles = Vec::new();

        for _ in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.lock_write().await.insert(1, items(7, 1, 10.0)).id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }

        // Ten placements, ten distinct sequential ids.
        assert_eq!(ids.len(), 10);
        assert_eq!(store.orders_for(1).await.unwrap().len(), 10);
    }
}
