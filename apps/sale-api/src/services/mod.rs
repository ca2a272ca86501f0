//! gRPC service implementations.
//!
//! This module contains the tonic service implementations for the sale
//! API: cart maintenance and order lookup/placement.

pub mod order_service;
pub mod quote_service;
