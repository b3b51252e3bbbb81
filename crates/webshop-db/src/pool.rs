//! # Database Pool Management
//!
//! Connection pool creation, configuration, and the store lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Lifecycle                                    │
//! │                                                                         │
//! │  DbConfig::new(path) / DbConfig::from_env()                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await                                           │
//! │       ├── open SqlitePool (WAL, foreign keys, busy timeout)            │
//! │       ├── run migrations          (run_migrations)                     │
//! │       ├── wipe all rows           (reset_on_start)                     │
//! │       └── seed sample data        (seed_sample_data, only if empty)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.products() / db.inventory() / db.orders() ...                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! Readers never block the single writer and always see the last committed
//! state, so the inventory report can run while orders are being placed.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::inventory::InventoryRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;
use crate::repository::supplier::SupplierRepository;
use crate::seed;

/// Environment variable overriding the database file path.
pub const ENV_DB_PATH: &str = "WEBSHOP_DB_PATH";
/// Environment variable overriding the pool size.
pub const ENV_DB_MAX_CONNECTIONS: &str = "WEBSHOP_DB_MAX_CONNECTIONS";
/// Environment variable toggling sample-data seeding.
pub const ENV_SEED: &str = "WEBSHOP_SEED";
/// Environment variable toggling the wipe-on-start behaviour.
pub const ENV_RESET: &str = "WEBSHOP_RESET";

/// Default database file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "./webshop.db";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./webshop.db")
///     .max_connections(5)
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// How long to wait for a pooled connection.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// How long a writer waits for another writer's lock before failing.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,

    /// Delete every row on connect (fresh demo state).
    /// Default: false
    pub reset_on_start: bool,

    /// Seed the sample supplier/products when the product table is empty.
    /// Default: true
    pub seed_sample_data: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
            reset_on_start: false,
            seed_sample_data: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the writer busy timeout.
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Sets whether to wipe all rows on connect.
    pub fn reset_on_start(mut self, reset: bool) -> Self {
        self.reset_on_start = reset;
        self
    }

    /// Sets whether to seed sample data into an empty store.
    pub fn seed_sample_data(mut self, seed: bool) -> Self {
        self.seed_sample_data = seed;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Seeding is off so tests start from an empty catalog.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
            reset_on_start: false,
            seed_sample_data: false,
        }
    }

    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `WEBSHOP_DB_PATH`: database file (default `./webshop.db`)
    /// - `WEBSHOP_DB_MAX_CONNECTIONS`: pool size
    /// - `WEBSHOP_SEED`: `true`/`false`, seed an empty store
    /// - `WEBSHOP_RESET`: `true`/`false`, wipe rows on start
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_DB_PATH).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let mut config = DbConfig::new(path);

        if let Some(max) = std::env::var(ENV_DB_MAX_CONNECTIONS)
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.max_connections = max.max(1);
        }

        if let Some(seed) = std::env::var(ENV_SEED).ok().and_then(|v| parse_flag(&v)) {
            config.seed_sample_data = seed;
        }

        if let Some(reset) = std::env::var(ENV_RESET).ok().and_then(|v| parse_flag(&v)) {
            config.reset_on_start = reset;
        }

        config
    }
}

/// Parses `1/0`, `true/false`, `yes/no`, `on/off`.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Database
// =============================================================================

/// The catalog store handle.
///
/// Cheap to clone (wraps the pool) and passed explicitly to every caller;
/// there is no global engine or session.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store and runs the configured start-up steps.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite: WAL, NORMAL synchronous, foreign keys, busy timeout
    /// 3. Creates the connection pool
    /// 4. Runs migrations, reset and seeding as configured
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has them disabled by default for backwards compatibility
            .foreign_keys(true)
            // Contended writers wait here instead of failing immediately
            .busy_timeout(config.busy_timeout)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        if config.reset_on_start {
            db.reset().await?;
        }

        if config.seed_sample_data {
            seed::seed_if_empty(&db).await?;
        }

        Ok(db)
    }

    /// Runs database migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the supplier repository.
    pub fn suppliers(&self) -> SupplierRepository {
        SupplierRepository::new(self.pool.clone())
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the stock level / restock rule / report repository.
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.pool.clone())
    }

    /// Returns the order repository (order processor).
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Deletes every row and restarts id assignment.
    ///
    /// Tables are cleared children first so foreign keys stay satisfied.
    pub async fn reset(&self) -> DbResult<()> {
        info!("Resetting database contents");

        let mut tx = self.pool.begin().await?;
        for table in [
            "customer_order",
            "restock_rules",
            "stock_levels",
            "product",
            "supplier",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(
            "DELETE FROM sqlite_sequence WHERE name IN \
             ('customer_order', 'restock_rules', 'stock_levels', 'product', 'supplier')",
        )
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
