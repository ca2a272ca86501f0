//! Quote gRPC service implementation.
//!
//! Thin translation layer: every call goes straight to the QuoteStore and
//! returns the full updated quote snapshot.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::debug;

use crate::proto::{quote_service_server::QuoteService, CustomerId, ProductRequest, Quote};
use crate::wire;
use crate::AppState;

/// Quote service implementation.
pub struct QuoteServiceImpl {
    state: Arc<AppState>,
}

impl QuoteServiceImpl {
    /// Create a new quote service.
    pub fn new(state: Arc<AppState>) -> Self {
        QuoteServiceImpl { state }
    }
}

#[tonic::async_trait]
impl QuoteService for QuoteServiceImpl {
    async fn add_product(
        &self,
        request: Request<ProductRequest>,
    ) -> Result<Response<Quote>, Status> {
        let req = request.into_inner();
        debug!(
            customer_id = req.customer_id,
            product_id = req.product_id,
            quantity = req.quantity,
            "AddProduct"
        );

        let quote = self
            .state
            .quotes
            .add_product(req.customer_id, req.product_id, req.quantity)
            .await;
        Ok(Response::new(wire::quote_to_proto(&quote)))
    }

    async fn get_quote(&self, request: Request<CustomerId>) -> Result<Response<Quote>, Status> {
        let customer_id = request.into_inner().id;

        let quote = self.state.quotes.quote(customer_id).await;
        Ok(Response::new(wire::quote_to_proto(&quote)))
    }

    async fn remove_product(
        &self,
        request: Request<ProductRequest>,
    ) -> Result<Response<Quote>, Status> {
        let req = request.into_inner();
        debug!(
            customer_id = req.customer_id,
            product_id = req.product_id,
            "RemoveProduct"
        );

        let quote = self
            .state
            .quotes
            .remove_product(req.customer_id, req.product_id)
            .await?;
        Ok(Response::new(wire::quote_to_proto(&quote)))
    }

    async fn update_quantity(
        &self,
        request: Request<ProductRequest>,
    ) -> Result<Response<Quote>, Status> {
        let req = request.into_inner();
        debug!(
            customer_id = req.customer_id,
            product_id = req.product_id,
            quantity = req.quantity,
            "UpdateQuantity"
        );

        let quote = self
            .state
            .quotes
            .update_quantity(req.customer_id, req.product_id, req.quantity)
            .await?;
        Ok(Response::new(wire::quote_to_proto(&quote)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    fn service() -> QuoteServiceImpl {
        QuoteServiceImpl::new(test_state())
    }

    #[tokio::test]
    async fn test_get_quote_lazily_creates_empty() {
        let svc = service();

        let quote = svc
            .get_quote(Request::new(CustomerId { id: 5 }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(quote.customer_id, 5);
        assert!(quote.items.is_empty());
    }

    #[tokio::test]
    async fn test_add_product_returns_snapshot() {
        let svc = service();

        let quote = svc
            .add_product(Request::new(ProductRequest {
                customer_id: 1,
                product_id: 7,
                quantity: 2,
            }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(quote.items.len(), 1);
        assert_eq!(quote.items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_remove_product_without_quote_is_not_found() {
        let svc = service();

        let status = svc
            .remove_product(Request::new(ProductRequest {
                customer_id: 1,
                product_id: 7,
                quantity: 0,
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::NotFound);
    }
}
