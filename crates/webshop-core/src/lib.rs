//! # webshop-core: Pure Business Logic for the Webshop
//!
//! This crate holds the domain model of the demo webshop and the rules an
//! order must satisfy before it may touch inventory. Everything here is a
//! pure function or a plain value type; the database lives in `webshop-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Webshop Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Dashboard (catalog, report, export)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ webshop-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  quoting  │  │   rules   │  │   │
//! │  │   │  Order    │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  webshop-db (Database Layer)                    │   │
//! │  │        SQLite catalog store, order transaction, reports         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Supplier, Product, StockLevel, RestockRule, Order)
//! - [`money`] - Money type with integer arithmetic
//! - [`order`] - Order quoting: availability check and pricing
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use webshop_core::money::Money;
//!
//! let price = Money::from_major_minor(1200, 0); // $1200.00
//! let total = price.checked_mul_quantity(2).unwrap();
//!
//! assert_eq!(total.cents(), 240_000);
//! assert_eq!(total.to_string(), "$2400.00");
//! ```

pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{quote_order, OrderQuote, OrderRequest};
pub use types::*;

/// Maximum length of supplier and product names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of free-text fields (descriptions, contact info).
pub const MAX_TEXT_LENGTH: usize = 1000;
