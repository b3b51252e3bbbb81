//! # Repository Module
//!
//! Database repository implementations for the webshop.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller (dashboard, demo binary, tests)                                │
//! │       │                                                                 │
//! │       │  db.orders().process_order(1, 2)                               │
//! │       ▼                                                                 │
//! │  OrderRepository / ProductRepository / ...                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every query returns plain value types from `webshop-core`; there is no
//! lazy relationship loading. `*_with` functions run on a caller-supplied
//! connection so several writes can share one transaction.
//!
//! ## Available Repositories
//!
//! - [`SupplierRepository`](supplier::SupplierRepository) - Supplier creation and lookup
//! - [`ProductRepository`](product::ProductRepository) - Catalog reads and product creation
//! - [`InventoryRepository`](inventory::InventoryRepository) - Stock, restock rules, report
//! - [`OrderRepository`](order::OrderRepository) - The order processor

pub mod inventory;
pub mod order;
pub mod product;
pub mod supplier;
