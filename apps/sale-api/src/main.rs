//! # Sale API Server
//!
//! gRPC server entry point for the quote and order services.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale API Startup                                │
//! │                                                                         │
//! │  tracing ──► config (env) ──► catalog connect ──► serve (50052)        │
//! │                                      │                                  │
//! │                                      └── failure here is FATAL:        │
//! │                                          no catalog, no placements     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sale_api::catalog::GrpcCatalog;
use sale_api::proto::{
    order_service_server::OrderServiceServer, quote_service_server::QuoteServiceServer,
};
use sale_api::services::{order_service::OrderServiceImpl, quote_service::QuoteServiceImpl};
use sale_api::{AppState, SaleConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting Sale API server...");

    // Load configuration
    let config = SaleConfig::load()?;
    info!(
        port = config.grpc_port,
        catalog = %config.catalog_addr,
        "Configuration loaded"
    );

    // Connect to the product catalog; unrecoverable if it fails
    let catalog = GrpcCatalog::connect(&config.catalog_addr, config.catalog_timeout).await?;
    info!("Connected to product catalog");

    // Create shared state
    let state = Arc::new(AppState::new(Arc::new(catalog), config.clone()));

    // Build gRPC services
    let quote_service = QuoteServiceServer::new(QuoteServiceImpl::new(state.clone()));
    let order_service = OrderServiceServer::new(OrderServiceImpl::new(state.clone()));

    // Build server address
    let addr: SocketAddr = format!("0.0.0.0:{}", config.grpc_port).parse()?;
    info!(%addr, "Starting gRPC server");

    // Start server
    Server::builder()
        .add_service(quote_service)
        .add_service(order_service)
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
