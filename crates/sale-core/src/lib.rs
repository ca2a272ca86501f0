//! # sale-core: Pure Domain Types for the Sale Service
//!
//! This crate is the **heart** of the sale service. It contains the domain
//! model as plain data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sale Service Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    gRPC Clients                                 │   │
//! │  │    AddProduct ──► GetQuote ──► PlaceOrder (stream)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ tonic                                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sale-api (server)                            │   │
//! │  │    QuoteStore, OrderStore, placement workflow, catalog client   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sale-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐                 ┌───────────┐                   │   │
//! │  │   │   quote   │                 │   order   │                   │   │
//! │  │   │   Quote   │                 │   Order   │                   │   │
//! │  │   │ QuoteItem │                 │ OrderItem │                   │   │
//! │  │   └───────────┘                 └───────────┘                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO WIRE TYPES • PURE MUTATIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`quote`] - A customer's mutable cart: [`Quote`] and [`QuoteItem`]
//! - [`order`] - An immutable priced record: [`Order`] and [`OrderItem`]
//!
//! ## Design Principles
//!
//! 1. **Pure Mutations**: quote operations are deterministic, in-place edits
//! 2. **No I/O**: network, locking and gRPC concerns are FORBIDDEN here
//! 3. **Price Snapshots**: an order freezes catalog prices at placement time
//! 4. **Permissive Quantities**: stores preserve whatever quantity the caller
//!    sends, including zero and negatives; validation is a caller concern

// =============================================================================
// Module Declarations
// =============================================================================

pub mod order;
pub mod quote;

// =============================================================================
// Re-exports
// =============================================================================

pub use order::{Order, OrderItem};
pub use quote::{Quote, QuoteItem};
