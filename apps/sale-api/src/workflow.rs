//! # Order Placement Workflow
//!
//! Converts a customer's quote into a permanent, priced order.
//!
//! ## Placement State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   PlaceOrder(customer_id)                               │
//! │                                                                         │
//! │  ┌─ both write guards held (order store first, then quote store) ────┐ │
//! │  │                                                                   │ │
//! │  │  1. Validate ──► quote empty? ──► EmptyQuote, stop               │ │
//! │  │        │                                                          │ │
//! │  │  2. Resolve ───► catalog price per line item                      │ │
//! │  │        │         any failure ──► Catalog error, quote UNTOUCHED   │ │
//! │  │        │                                                          │ │
//! │  │  3. Commit ────► assign next id, insert order + owner index,      │ │
//! │  │                  clear quote                                      │ │
//! │  └───────────────────────────── guards drop here ────────────────────┘ │
//! │                                                                         │
//! │  4. Stream ──► Started / Processed / Processed / Completed, one per    │
//! │                stage delay, OUTSIDE any lock (see order_service)       │
//! │                                                                         │
//! │  An order is never partially committed: steps 1-3 either all happen    │
//! │  or none of them do.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use sale_core::{Order, OrderItem};
use tracing::{debug, info};

use crate::catalog::CatalogLookup;
use crate::error::SaleError;
use crate::state::{OrderStore, QuoteStore};

/// Status kind of one streamed fulfillment milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Started,
    Processed,
    Completed,
    Error,
}

/// One milestone in the scripted fulfillment sequence.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub kind: StageKind,
    pub message: &'static str,
}

/// The scripted fulfillment pipeline, streamed after a successful commit.
///
/// The payment stage is a placeholder with no real side effect. The four
/// stages and their ordering are a compatibility contract with existing
/// clients; only the inter-stage delay is configurable.
pub const FULFILLMENT_STAGES: &[Stage] = &[
    Stage {
        kind: StageKind::Started,
        message: "Order processing started.",
    },
    Stage {
        kind: StageKind::Processed,
        message: "Collecting shipping information.",
    },
    Stage {
        kind: StageKind::Processed,
        message: "Collecting payment details.",
    },
    Stage {
        kind: StageKind::Completed,
        message: "Order has been completed.",
    },
];

/// Orchestrates QuoteStore, the catalog, and OrderStore to atomically
/// drain a quote into a committed order.
pub struct OrderPlacement {
    quotes: Arc<QuoteStore>,
    orders: Arc<OrderStore>,
    catalog: Arc<dyn CatalogLookup>,
}

impl OrderPlacement {
    pub fn new(
        quotes: Arc<QuoteStore>,
        orders: Arc<OrderStore>,
        catalog: Arc<dyn CatalogLookup>,
    ) -> Self {
        OrderPlacement {
            quotes,
            orders,
            catalog,
        }
    }

    /// Runs validate → resolve → commit and returns the committed order.
    ///
    /// Holds both store write guards for the whole sequence; the guards
    /// drop on return, BEFORE any status event is streamed. On any error
    /// the quote is left exactly as it was.
    pub async fn place(&self, customer_id: u64) -> Result<Order, SaleError> {
        // Fixed acquisition order: order store, then quote store. This is
        // the only path that nests the two locks.
        let mut orders = self.orders.lock_write().await;
        let mut quotes = self.quotes.lock_write().await;

        let quote = quotes.quote(customer_id);
        if quote.is_empty() {
            return Err(SaleError::EmptyQuote(customer_id));
        }

        // Snapshot catalog prices. Any lookup failure discards the whole
        // attempt; the quote stays uncleared for a retry by the caller.
        let mut items: HashMap<u64, OrderItem> = HashMap::with_capacity(quote.item_count());
        for item in quote.items.values() {
            let product = self
                .catalog
                .product_info(item.product_id)
                .await
                .map_err(|source| SaleError::Catalog {
                    product_id: item.product_id,
                    source,
                })?;

            debug!(
                customer_id,
                product_id = item.product_id,
                price = product.price,
                "Resolved catalog price"
            );

            items.insert(
                item.product_id,
                OrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: product.price,
                },
            );
        }

        let order = orders.insert(customer_id, items);
        quotes.clear(customer_id);

        info!(
            customer_id,
            order_id = order.id,
            total = order.total(),
            "Order committed"
        );

        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;

    fn placement(catalog: InMemoryCatalog) -> (Arc<QuoteStore>, Arc<OrderStore>, OrderPlacement) {
        let quotes = Arc::new(QuoteStore::new());
        let orders = Arc::new(OrderStore::new());
        let workflow = OrderPlacement::new(quotes.clone(), orders.clone(), Arc::new(catalog));
        (quotes, orders, workflow)
    }

    #[tokio::test]
    async fn test_place_snapshots_price_and_clears_quote() {
        let (quotes, orders, workflow) = placement(InMemoryCatalog::new().with_product(1, 100.0));
        quotes.add_product(1, 1, 1).await;

        let order = workflow.place(1).await.unwrap();

        assert_eq!(order.id, 1);
        assert_eq!(order.customer_id, 1);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[&1].quantity, 1);
        assert_eq!(order.items[&1].unit_price, 100.0);

        // Quote drained as part of the commit.
        assert!(quotes.quote(1).await.is_empty());
        // Order visible through the store afterwards.
        assert_eq!(orders.orders_for(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_quote_rejected() {
        let (_quotes, orders, workflow) = placement(InMemoryCatalog::new());

        let err = workflow.place(1).await.unwrap_err();

        assert!(matches!(err, SaleError::EmptyQuote(1)));
        // Nothing committed for the customer.
        assert!(orders.orders_for(1).await.is_err());
    }

    #[tokio::test]
    async fn test_sequential_numbering_across_placements() {
        let (quotes, _orders, workflow) = placement(InMemoryCatalog::new().with_product(1, 10.0));

        quotes.add_product(1, 1, 1).await;
        let first = workflow.place(1).await.unwrap();

        quotes.add_product(1, 1, 2).await;
        let second = workflow.place(1).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_catalog_failure_leaves_quote_intact() {
        // Product 2 is unknown to the catalog, so resolution fails.
        let (quotes, orders, workflow) = placement(InMemoryCatalog::new().with_product(1, 10.0));
        quotes.add_product(1, 1, 1).await;
        quotes.add_product(1, 2, 1).await;

        let err = workflow.place(1).await.unwrap_err();

        match err {
            SaleError::Catalog { product_id, .. } => assert_eq!(product_id, 2),
            other => panic!("unexpected error: {other}"),
        }

        // No order created, quote un-cleared.
        assert!(orders.orders_for(1).await.is_err());
        assert_eq!(quotes.quote(1).await.item_count(), 2);
    }

    #[tokio::test]
    async fn test_later_price_changes_do_not_affect_placed_order() {
        let (quotes, orders, workflow) = placement(InMemoryCatalog::new().with_product(1, 100.0));
        quotes.add_product(1, 1, 1).await;
        let placed = workflow.place(1).await.unwrap();

        // A second placement at a different price through a different
        // catalog does not touch the first order's snapshot.
        let catalog = Arc::new(InMemoryCatalog::new().with_product(1, 250.0));
        let repriced = OrderPlacement::new(quotes.clone(), orders.clone(), catalog);
        quotes.add_product(1, 1, 1).await;
        repriced.place(1).await.unwrap();

        let first = orders.order(placed.id).await.unwrap();
        assert_eq!(first.items[&1].unit_price, 100.0);
    }

    #[test]
    fn test_fulfillment_script_shape() {
        // Four stages, fixed order: compatibility contract with clients.
        assert_eq!(FULFILLMENT_STAGES.len(), 4);
        assert_eq!(FULFILLMENT_STAGES[0].kind, StageKind::Started);
        assert_eq!(FULFILLMENT_STAGES[1].kind, StageKind::Processed);
        assert_eq!(FULFILLMENT_STAGES[2].kind, StageKind::Processed);
        assert_eq!(FULFILLMENT_STAGES[3].kind, StageKind::Completed);
    }
}
