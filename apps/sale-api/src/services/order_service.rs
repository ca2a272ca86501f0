//! Order gRPC service implementation.
//!
//! Lookup calls read the OrderStore; `PlaceOrder` drives the placement
//! workflow and streams the scripted fulfillment stages back.
//!
//! ## Streaming Discipline
//! The commit phase (validate → resolve → commit) finishes, and both
//! store guards drop, before the first status event is produced. The
//! stages simulate slow fulfillment I/O and must never block other
//! customers' quote or order traffic.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream};
use tonic::{Request, Response, Status};
use tracing::{info, warn};

use crate::proto::{
    order_service_server::OrderService, CustomerId, Order, OrderId, OrderList, ProcessStatus,
};
use crate::wire;
use crate::workflow::{OrderPlacement, FULFILLMENT_STAGES};
use crate::AppState;

/// Order service implementation.
pub struct OrderServiceImpl {
    state: Arc<AppState>,
    placement: OrderPlacement,
}

impl OrderServiceImpl {
    /// Create a new order service.
    pub fn new(state: Arc<AppState>) -> Self {
        let placement = OrderPlacement::new(
            state.quotes.clone(),
            state.orders.clone(),
            state.catalog.clone(),
        );

        OrderServiceImpl { state, placement }
    }
}

#[tonic::async_trait]
impl OrderService for OrderServiceImpl {
    type PlaceOrderStream = Pin<Box<dyn Stream<Item = Result<ProcessStatus, Status>> + Send>>;

    async fn get_orders(
        &self,
        request: Request<CustomerId>,
    ) -> Result<Response<OrderList>, Status> {
        let customer_id = request.into_inner().id;

        let orders = self.state.orders.orders_for(customer_id).await?;
        Ok(Response::new(OrderList {
            orders: orders.iter().map(wire::order_to_proto).collect(),
        }))
    }

    async fn get_order(&self, request: Request<OrderId>) -> Result<Response<Order>, Status> {
        let order_id = request.into_inner().id;

        let order = self.state.orders.order(order_id).await?;
        Ok(Response::new(wire::order_to_proto(&order)))
    }

    /// Converts the customer's quote into an order and streams progress.
    ///
    /// On success the stream carries exactly the four scripted stages. On
    /// failure it carries one ERROR status followed by the failed call
    /// status, and no order is created.
    async fn place_order(
        &self,
        request: Request<CustomerId>,
    ) -> Result<Response<Self::PlaceOrderStream>, Status> {
        let customer_id = request.into_inner().id;
        info!(customer_id, "PlaceOrder");

        let order = match self.placement.place(customer_id).await {
            Ok(order) => order,
            Err(err) => {
                warn!(customer_id, error = %err, "Order placement failed");
                let events = vec![Ok(wire::error_to_proto(&err)), Err(Status::from(err))];
                return Ok(Response::new(Box::pin(tokio_stream::iter(events))));
            }
        };

        // Both store guards are released by now; the scripted stages run
        // in a spawned task so a slow client only blocks itself.
        let (tx, rx) = mpsc::channel(FULFILLMENT_STAGES.len());
        let delay = self.state.config.stage_delay;
        let order_id = order.id;
        tokio::spawn(async move {
            if let Err(err) = run_fulfillment_script(order_id, delay, tx).await {
                // The caller hung up; the committed order stands.
                warn!(order_id, error = %err, "Fulfillment stream aborted");
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

/// Emits the scripted stages, one per delay tick.
///
/// A send failure means the stream could not deliver an event; the
/// remaining stages are abandoned.
async fn run_fulfillment_script(
    order_id: u64,
    delay: Duration,
    tx: mpsc::Sender<Result<ProcessStatus, Status>>,
) -> Result<(), crate::SaleError> {
    for stage in FULFILLMENT_STAGES {
        tokio::time::sleep(delay).await;
        info!(order_id, stage = stage.message, "Sending order process status");

        tx.send(Ok(wire::stage_to_proto(order_id, stage)))
            .await
            .map_err(|_| crate::SaleError::Stream("stream closed by client".to_string()))?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
