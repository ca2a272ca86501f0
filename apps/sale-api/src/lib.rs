//! # Sale API
//!
//! gRPC server maintaining per-customer quotes (mutable carts) and
//! converting quotes into permanent, priced orders while streaming
//! progress back to the caller.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Sale API Services                              │
//! │                                                                         │
//! │  ┌────────────────┐  ┌──────────────────────────────────────────────┐  │
//! │  │  QuoteService  │  │  OrderService                                │  │
//! │  │                │  │                                              │  │
//! │  │ • AddProduct   │  │ • GetOrders                                  │  │
//! │  │ • GetQuote     │  │ • GetOrder                                   │  │
//! │  │ • RemoveProduct│  │ • PlaceOrder (server streaming)              │  │
//! │  │ • UpdateQty    │  │                                              │  │
//! │  └───────┬────────┘  └──────┬───────────────────────────────────────┘  │
//! │          │                  │                                           │
//! │          ▼                  ▼                                           │
//! │  ┌────────────────┐  ┌────────────────┐  ┌───────────────────────────┐ │
//! │  │   QuoteStore   │  │   OrderStore   │  │  CatalogLookup (client)   │ │
//! │  │  RwLock map    │  │  RwLock map +  │  │  external price service   │ │
//! │  │  per customer  │  │  owner index   │  │  of record                │ │
//! │  └────────────────┘  └────────────────┘  └───────────────────────────┘ │
//! │                                                                         │
//! │  All state is in-memory and process-lifetime: there is no persistence, │
//! │  replication, or authentication in this service.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `GRPC_PORT` - gRPC server port (default: 50052)
//! - `CATALOG_ADDR` - product catalog address (default: http://localhost:50051)
//! - `CATALOG_TIMEOUT_MS` - per-call catalog timeout (default: 1000)
//! - `STAGE_DELAY_MS` - delay between streamed fulfillment stages (default: 2000)

pub mod catalog;
pub mod config;
pub mod error;
pub mod proto;
pub mod services;
pub mod state;
pub mod wire;
pub mod workflow;

use std::sync::Arc;

// Re-exports
pub use config::SaleConfig;
pub use error::SaleError;

use crate::catalog::CatalogLookup;
use crate::state::{OrderStore, QuoteStore};

/// Shared application state.
pub struct AppState {
    pub quotes: Arc<QuoteStore>,
    pub orders: Arc<OrderStore>,
    pub catalog: Arc<dyn CatalogLookup>,
    pub config: SaleConfig,
}

impl AppState {
    /// Assembles fresh stores around an already-connected catalog client.
    pub fn new(catalog: Arc<dyn CatalogLookup>, config: SaleConfig) -> Self {
        AppState {
            quotes: Arc::new(QuoteStore::new()),
            orders: Arc::new(OrderStore::new()),
            catalog,
            config,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use crate::catalog::InMemoryCatalog;
    use crate::{AppState, SaleConfig};

    /// State with a one-product catalog (product 1 at 100.0) and no
    /// inter-stage delay, so streaming tests finish immediately.
    pub(crate) fn test_state() -> Arc<AppState> {
        let catalog = InMemoryCatalog::new().with_product(1, 100.0);
        let config = SaleConfig {
            grpc_port: 0,
            catalog_addr: String::new(),
            catalog_timeout: Duration::from_millis(100),
            stage_delay: Duration::ZERO,
        };
        Arc::new(AppState::new(Arc::new(catalog), config))
    }
}
