//! # State Module
//!
//! In-memory, process-lifetime state for the sale API. Nothing here
//! survives a restart.
//!
//! ## Why Two Stores?
//! Quotes and orders have different lifecycles and different lock
//! pressure: quotes churn on every cart call, orders are written once at
//! placement and read afterwards. Each store owns its own
//! `tokio::sync::RwLock`, so independent customers' cart traffic never
//! blocks order reads.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      State Architecture                                 │
//! │                                                                         │
//! │  ┌──────────────────┐                ┌──────────────────────┐           │
//! │  │    QuoteStore    │                │      OrderStore      │           │
//! │  │                  │                │                      │           │
//! │  │  RwLock<HashMap< │                │  RwLock<OrderBook>   │           │
//! │  │   customer,      │                │   orders by customer │           │
//! │  │   Quote>>        │                │   + owner index      │           │
//! │  └──────────────────┘                └──────────────────────┘           │
//! │                                                                         │
//! │  LOCK ORDERING:                                                        │
//! │  • Order placement is the ONLY path that holds both write guards.      │
//! │  • It always acquires OrderStore first, then QuoteStore. Any new       │
//! │    nested-lock call site must keep that order.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod order_store;
mod quote_store;

pub use order_store::{OrderStore, OrderStoreGuard};
pub use quote_store::{QuoteStore, QuoteStoreGuard};
