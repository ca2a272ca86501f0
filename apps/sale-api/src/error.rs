//! Error types for the sale API.

use tonic::Status;

use crate::catalog::CatalogError;

/// Sale API errors.
///
/// Every request-level failure maps onto a gRPC status; nothing here
/// crashes the process.
#[derive(Debug, thiserror::Error)]
pub enum SaleError {
    /// Customer has no quote in the store.
    #[error("quote not found for customer {0}")]
    QuoteNotFound(u64),

    /// Customer has no orders in the store.
    #[error("no orders found for customer {0}")]
    NoOrders(u64),

    /// Order id is unknown to the owner index.
    #[error("order with id {0} not found")]
    OrderNotFound(u64),

    /// Order placement attempted on a quote with zero line items.
    #[error("quote is empty for customer {0}")]
    EmptyQuote(u64),

    /// Catalog price lookup failed for one product; the placement attempt
    /// is discarded and the quote left untouched.
    #[error("failed to get product info for product {product_id}: {source}")]
    Catalog {
        product_id: u64,
        source: CatalogError,
    },

    /// A status event could not be delivered to the caller.
    #[error("failed to send order process status: {0}")]
    Stream(String),
}

impl From<SaleError> for Status {
    fn from(error: SaleError) -> Self {
        match &error {
            SaleError::QuoteNotFound(_)
            | SaleError::NoOrders(_)
            | SaleError::OrderNotFound(_) => Status::not_found(error.to_string()),
            SaleError::EmptyQuote(_) => Status::failed_precondition(error.to_string()),
            SaleError::Catalog { .. } => Status::unavailable(error.to_string()),
            SaleError::Stream(_) => Status::internal(error.to_string()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SaleError::EmptyQuote(7);
        assert_eq!(err.to_string(), "quote is empty for customer 7");

        let err = SaleError::OrderNotFound(3);
        assert_eq!(err.to_string(), "order with id 3 not found");
    }

    #[test]
    fn test_status_mapping() {
        let status: Status = SaleError::QuoteNotFound(1).into();
        assert_eq!(status.code(), tonic::Code::NotFound);

        let status: Status = SaleError::EmptyQuote(1).into();
        assert_eq!(status.code(), tonic::Code::FailedPrecondition);

        let status: Status = SaleError::Catalog {
            product_id: 9,
            source: CatalogError::Timeout(9),
        }
        .into();
        assert_eq!(status.code(), tonic::Code::Unavailable);
    }
}
