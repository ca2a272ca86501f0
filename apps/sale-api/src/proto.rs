//! Generated gRPC code for the sale and catalog protocols.
//!
//! This module includes the Rust code generated from `proto/sale.proto`
//! and `proto/catalog.proto`.
//!
//! ## Services Available
//! - `quote_service_server` - Server traits for cart maintenance
//! - `order_service_server` - Server traits for order lookup and placement
//! - `catalog::product_info_client` - Client stub for the external catalog

// Include the generated code from build.rs
tonic::include_proto!("sale.v1");

/// Generated client code for the external product catalog.
pub mod catalog {
    tonic::include_proto!("catalog.v1");
}
