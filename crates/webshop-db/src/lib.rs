//! # webshop-db: Database Layer for the Webshop
//!
//! The catalog store, the order processor, and the reporting view, on SQLite
//! via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Webshop Data Flow                                │
//! │                                                                         │
//! │  Dashboard: "Order now" / inventory table / JSON export                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     webshop-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ OrderRepo      │   │ 001_initial  │  │   │
//! │  │   │ SqlitePool    │◄───│ InventoryRepo  │   │  _schema.sql │  │   │
//! │  │   │ lifecycle     │    │ ProductRepo    │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   seed.rs (sample catalog)    snapshot.rs (JSON export)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use webshop_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./webshop.db")).await?;
//!
//! let catalog = db.products().list_all().await?;
//! let order = db.orders().process_order(catalog[0].id, 1).await?;
//! let report = db.inventory().report().await?;
//!
//! db.close().await;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, OrderError};
pub use pool::{Database, DbConfig};
pub use snapshot::InventorySnapshot;

pub use repository::inventory::InventoryRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
pub use repository::supplier::SupplierRepository;
