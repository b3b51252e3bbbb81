//! # Inventory Repository
//!
//! Stock levels, restock rules, and the joined inventory report.
//!
//! ## Report Join
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product ──┬── stock_levels   (stock_quantity)                          │
//! │            ├── restock_rules  (minimum_stock, order_quantity)           │
//! │            └── supplier       (contact_info)                            │
//! │                                                                         │
//! │  INNER joins: a product missing stock or a rule is not reported.        │
//! │  Read-only; under WAL it sees the last committed order, never a         │
//! │  half-applied one.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock levels are created here but only the order processor changes them.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use webshop_core::validation::validate_stock_quantity;
use webshop_core::{InventoryRow, RestockRule, StockLevel};

/// Repository for stock levels, restock rules and the inventory report.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    // =========================================================================
    // Stock Levels
    // =========================================================================

    /// Creates the stock level for a product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Product already has a stock level
    /// * `Err(DbError::ForeignKeyViolation)` - Product doesn't exist
    pub async fn insert_stock_level(&self, product_id: i64, quantity: i64) -> DbResult<StockLevel> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_stock_level_with(&mut conn, product_id, quantity).await
    }

    /// Creates a stock level on an existing connection or transaction.
    pub async fn insert_stock_level_with(
        conn: &mut SqliteConnection,
        product_id: i64,
        quantity: i64,
    ) -> DbResult<StockLevel> {
        validate_stock_quantity(quantity)?;

        debug!(product_id, quantity, "Inserting stock level");

        let result =
            sqlx::query("INSERT INTO stock_levels (product_id, stock_quantity) VALUES (?1, ?2)")
                .bind(product_id)
                .bind(quantity)
                .execute(&mut *conn)
                .await?;

        Ok(StockLevel {
            id: result.last_insert_rowid(),
            product_id,
            stock_quantity: quantity,
        })
    }

    /// Gets the stock level of a product.
    pub async fn stock_for_product(&self, product_id: i64) -> DbResult<Option<StockLevel>> {
        let mut conn = self.pool.acquire().await?;
        Self::stock_for_product_with(&mut conn, product_id).await
    }

    /// Gets a stock level on an existing connection or transaction.
    pub async fn stock_for_product_with(
        conn: &mut SqliteConnection,
        product_id: i64,
    ) -> DbResult<Option<StockLevel>> {
        let stock = sqlx::query_as::<_, StockLevel>(
            "SELECT id, product_id, stock_quantity FROM stock_levels WHERE product_id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(stock)
    }

    /// Lists all stock levels ordered by product.
    pub async fn stock_levels(&self) -> DbResult<Vec<StockLevel>> {
        let levels = sqlx::query_as::<_, StockLevel>(
            "SELECT id, product_id, stock_quantity FROM stock_levels ORDER BY product_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(levels)
    }

    // =========================================================================
    // Restock Rules
    // =========================================================================

    /// Creates a restock rule for a product.
    pub async fn insert_restock_rule(
        &self,
        product_id: i64,
        order_quantity: i64,
        minimum_stock: i64,
    ) -> DbResult<RestockRule> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_restock_rule_with(&mut conn, product_id, order_quantity, minimum_stock).await
    }

    /// Creates a restock rule on an existing connection or transaction.
    pub async fn insert_restock_rule_with(
        conn: &mut SqliteConnection,
        product_id: i64,
        order_quantity: i64,
        minimum_stock: i64,
    ) -> DbResult<RestockRule> {
        RestockRule::validate_values(order_quantity, minimum_stock)?;

        debug!(product_id, order_quantity, minimum_stock, "Inserting restock rule");

        let result = sqlx::query(
            r#"
            INSERT INTO restock_rules (product_id, order_quantity, minimum_stock)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(product_id)
        .bind(order_quantity)
        .bind(minimum_stock)
        .execute(&mut *conn)
        .await?;

        Ok(RestockRule {
            id: result.last_insert_rowid(),
            product_id,
            order_quantity,
            minimum_stock,
        })
    }

    /// Gets the (first) restock rule of a product.
    pub async fn restock_rule_for_product(&self, product_id: i64) -> DbResult<Option<RestockRule>> {
        let rule = sqlx::query_as::<_, RestockRule>(
            r#"
            SELECT id, product_id, order_quantity, minimum_stock
            FROM restock_rules
            WHERE product_id = ?1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rule)
    }

    /// Lists all restock rules ordered by id.
    pub async fn restock_rules(&self) -> DbResult<Vec<RestockRule>> {
        let rules = sqlx::query_as::<_, RestockRule>(
            "SELECT id, product_id, order_quantity, minimum_stock FROM restock_rules ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    // =========================================================================
    // Report
    // =========================================================================

    /// Returns the joined inventory view, one row per product (and rule).
    pub async fn report(&self) -> DbResult<Vec<InventoryRow>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT
                p.id              AS product_id,
                p.name            AS name,
                sl.stock_quantity AS stock_quantity,
                rr.minimum_stock  AS minimum_stock,
                rr.order_quantity AS order_quantity,
                s.contact_info    AS supplier_contact
            FROM product p
            INNER JOIN stock_levels sl ON sl.product_id = p.id
            INNER JOIN restock_rules rr ON rr.product_id = p.id
            INNER JOIN supplier s ON s.id = p.supplier_id
            ORDER BY p.id, rr.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Built inventory report");
        Ok(rows)
    }
}
