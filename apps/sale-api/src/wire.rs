//! Wire adapters: domain entities → prost messages.
//!
//! Pure, deterministic translation from the unordered in-memory item maps
//! to the ordered sequences the protocol carries. A single sequential pass
//! is enough here; item sets are small and the output order is not part
//! of the contract (clients must compare by content).

use sale_core::{Order, Quote};

use crate::error::SaleError;
use crate::proto;
use crate::workflow::{Stage, StageKind};

/// Converts a quote snapshot into its wire representation.
pub fn quote_to_proto(quote: &Quote) -> proto::Quote {
    proto::Quote {
        customer_id: quote.customer_id,
        items: quote
            .items
            .values()
            .map(|item| proto::QuoteItem {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect(),
    }
}

/// Converts a placed order into its wire representation.
pub fn order_to_proto(order: &Order) -> proto::Order {
    proto::Order {
        id: order.id,
        customer_id: order.customer_id,
        items: order
            .items
            .values()
            .map(|item| proto::OrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect(),
    }
}

/// Builds the wire status for one scripted fulfillment stage.
pub fn stage_to_proto(order_id: u64, stage: &Stage) -> proto::ProcessStatus {
    proto::ProcessStatus {
        order_id,
        status: stage_kind_to_proto(stage.kind) as i32,
        message: stage.message.to_string(),
    }
}

/// Builds the single terminal error status for a failed placement.
pub fn error_to_proto(error: &SaleError) -> proto::ProcessStatus {
    proto::ProcessStatus {
        order_id: 0,
        status: stage_kind_to_proto(StageKind::Error) as i32,
        message: error.to_string(),
    }
}

fn stage_kind_to_proto(kind: StageKind) -> proto::OrderStatus {
    match kind {
        StageKind::Started => proto::OrderStatus::Started,
        StageKind::Processed => proto::OrderStatus::Processed,
        StageKind::Completed => proto::OrderStatus::Completed,
        StageKind::Error => proto::OrderStatus::Error,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use sale_core::OrderItem;

    #[test]
    fn test_quote_to_proto_content() {
        let mut quote = Quote::new(1);
        quote.add_product(7, 2);
        quote.add_product(8, 3);

        let wire = quote_to_proto(&quote);

        assert_eq!(wire.customer_id, 1);
        assert_eq!(wire.items.len(), 2);
        // The source map is unordered, so compare by content.
        let mut items: Vec<(u64, i64)> = wire
            .items
            .iter()
            .map(|i| (i.product_id, i.quantity))
            .collect();
        items.sort_unstable();
        assert_eq!(items, vec![(7, 2), (8, 3)]);
    }

    #[test]
    fn test_conversion_is_repeatable() {
        let mut quote = Quote::new(1);
        quote.add_product(7, 2);

        let a = quote_to_proto(&quote);
        let b = quote_to_proto(&quote);

        assert_eq!(a.customer_id, b.customer_id);
        assert_eq!(a.items, b.items);
    }

    #[test]
    fn test_order_to_proto_carries_price_snapshot() {
        let mut items = HashMap::new();
        items.insert(
            7,
            OrderItem {
                product_id: 7,
                quantity: 2,
                unit_price: 99.5,
            },
        );
        let order = Order::new(1, 42, items);

        let wire = order_to_proto(&order);

        assert_eq!(wire.id, 1);
        assert_eq!(wire.customer_id, 42);
        assert_eq!(wire.items[0].unit_price, 99.5);
    }

    #[test]
    fn test_stage_to_proto() {
        let stage = Stage {
            kind: StageKind::Started,
            message: "Order processing started.",
        };

        let wire = stage_to_proto(3, &stage);

        assert_eq!(wire.order_id, 3);
        assert_eq!(wire.status, proto::OrderStatus::Started as i32);
        assert_eq!(wire.message, "Order processing started.");
    }

    #[test]
    fn test_error_to_proto() {
        let wire = error_to_proto(&SaleError::EmptyQuote(7));

        assert_eq!(wire.status, proto::OrderStatus::Error as i32);
        assert_eq!(wire.message, "quote is empty for customer 7");
    }
}
