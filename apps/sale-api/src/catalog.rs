//! Product catalog client.
//!
//! The catalog is an external service of record for current product
//! prices. This module consumes it through a narrow trait so the order
//! placement workflow can be tested without a network.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Lookup                                    │
//! │                                                                         │
//! │   workflow ──► CatalogLookup (trait) ──┬──► GrpcCatalog ──► tonic      │
//! │                                        │                                │
//! │                                        └──► InMemoryCatalog (tests)     │
//! │                                                                         │
//! │   Every call runs under a bounded timeout. Any failure is fatal to     │
//! │   the current placement attempt; nothing is retried here.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use crate::proto::catalog::{product_info_client::ProductInfoClient, Empty, ProductId};

/// Price and metadata for one catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// Catalog lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unreachable: {0}")]
    Unreachable(String),

    #[error("catalog lookup timed out for product {0}")]
    Timeout(u64),

    #[error("catalog rejected lookup: {0}")]
    Lookup(String),
}

/// Narrow interface to the external catalog.
///
/// The order workflow only ever needs "given a product id, return its
/// current price, or fail". `product_list` exists for bulk display calls
/// and is never used during placement.
#[tonic::async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Current price and metadata for one product.
    async fn product_info(&self, product_id: u64) -> Result<Product, CatalogError>;

    /// Full product listing.
    async fn product_list(&self) -> Result<Vec<Product>, CatalogError>;
}

/// gRPC-backed catalog client.
///
/// The underlying tonic `Channel` multiplexes requests and is cheap to
/// clone, so one client serves all concurrent placements.
pub struct GrpcCatalog {
    client: ProductInfoClient<Channel>,
    timeout: Duration,
}

impl GrpcCatalog {
    /// Connect to the catalog service.
    ///
    /// Failure here is a startup failure: the process cannot place orders
    /// without a catalog, so main treats this as fatal.
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let endpoint = Endpoint::from_shared(addr.to_string())
            .map_err(|e| CatalogError::Unreachable(e.to_string()))?
            .connect_timeout(timeout);

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| CatalogError::Unreachable(e.to_string()))?;

        debug!(addr, "Connected to product catalog");

        Ok(GrpcCatalog {
            client: ProductInfoClient::new(channel),
            timeout,
        })
    }
}

#[tonic::async_trait]
impl CatalogLookup for GrpcCatalog {
    async fn product_info(&self, product_id: u64) -> Result<Product, CatalogError> {
        let mut client = self.client.clone();

        let response = tokio::time::timeout(
            self.timeout,
            client.get_product_info(ProductId { id: product_id }),
        )
        .await
        .map_err(|_| CatalogError::Timeout(product_id))?
        .map_err(|status| CatalogError::Lookup(status.message().to_string()))?;

        let product = response.into_inner();
        Ok(Product {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        })
    }

    async fn product_list(&self) -> Result<Vec<Product>, CatalogError> {
        let mut client = self.client.clone();

        let response = tokio::time::timeout(self.timeout, client.get_product_list(Empty {}))
            .await
            .map_err(|_| CatalogError::Timeout(0))?
            .map_err(|status| CatalogError::Lookup(status.message().to_string()))?;

        Ok(response
            .into_inner()
            .products
            .into_iter()
            .map(|p| Product {
                id: p.id,
                name: p.name,
                description: p.description,
                price: p.price,
            })
            .collect())
    }
}

/// Fixed-price catalog for tests and local development.
///
/// Unknown products fail lookup, which is exactly what the upstream
/// returns for them.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: std::collections::HashMap<u64, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product with the given price.
    pub fn with_product(mut self, id: u64, price: f64) -> Self {
        self.products.insert(
            id,
            Product {
                id,
                name: format!("Product {}", id),
                description: String::new(),
                price,
            },
        );
        self
    }
}

#[tonic::async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn product_info(&self, product_id: u64) -> Result<Product, CatalogError> {
        self.products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CatalogError::Lookup(format!("unknown product {}", product_id)))
    }

    async fn product_list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.values().cloned().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
