//! # Order Repository
//!
//! The order processor: validates a purchase against current stock, prices
//! it, and commits the stock decrement together with the order row.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    process_order(product_id, qty)                       │
//! │                                                                         │
//! │  qty <= 0 ? ──────────────────────────────► Rejected (no I/O)           │
//! │       │                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │  UPDATE stock_levels                        ◄── first statement writes, │
//! │     SET stock_quantity = stock_quantity - q     so this connection owns │
//! │   WHERE product_id = ? AND stock_quantity >= q  the writer lock before  │
//! │       │                                         anything is read        │
//! │  SELECT product, stock level                                           │
//! │       │                                                                 │
//! │  quote_order(...) ── Err ──► ROLLBACK ─────► Rejected (nothing written) │
//! │       │                                                                 │
//! │  INSERT customer_order (total = price × q)                             │
//! │       │                                                                 │
//! │  COMMIT ───────────────────────────────────► Ok(Order)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent orders queue on SQLite's writer lock (bounded by the busy
//! timeout), so the second order of a pair always sees the first one's
//! decrement and two accepted orders can never overdraw stock.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult, OrderError};
use crate::repository::inventory::InventoryRepository;
use crate::repository::product::ProductRepository;
use webshop_core::{quote_order, Order, OrderRequest, StockLevel};

const SELECT_ORDER: &str = "SELECT id, product_id, quantity, total_price AS total_price_cents, \
                            created_at FROM customer_order";

/// Repository for customer orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order for `quantity` units of `product_id`.
    ///
    /// ## Returns
    /// * `Ok(Order)` - committed order with its id and total price
    /// * `Err(OrderError::Rejected(ProductNotFound))` - no such product
    /// * `Err(OrderError::Rejected(InsufficientStock))` - no stock level, or too little
    /// * `Err(OrderError::Rejected(Validation))` - quantity is not positive
    /// * `Err(OrderError::Storage(_))` - database failure, passed through
    ///
    /// Every rejection leaves stock and orders untouched.
    pub async fn process_order(&self, product_id: i64, quantity: i64) -> Result<Order, OrderError> {
        let request = OrderRequest::new(product_id, quantity);
        request.validate()?;

        debug!(product_id, quantity, "Processing order");

        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            r#"
            UPDATE stock_levels
            SET stock_quantity = stock_quantity - ?2
            WHERE product_id = ?1 AND stock_quantity >= ?2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        let product = ProductRepository::get_by_id_with(&mut *tx, product_id).await?;
        let stock_before = InventoryRepository::stock_for_product_with(&mut *tx, product_id)
            .await?
            .map(|stock| {
                if decremented {
                    StockLevel {
                        stock_quantity: stock.stock_quantity + quantity,
                        ..stock
                    }
                } else {
                    stock
                }
            });

        let quote = match quote_order(request, product.as_ref(), stock_before.as_ref()) {
            Ok(quote) => quote,
            Err(err) => {
                tx.rollback().await?;
                warn!(product_id, quantity, error = %err, "Order rejected");
                return Err(err.into());
            }
        };

        if !decremented {
            // The writer lock is held, so a passing quote with no decrement
            // means the stock row changed under us.
            tx.rollback().await?;
            return Err(DbError::Internal(format!(
                "stock for product {product_id} changed during order"
            ))
            .into());
        }

        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO customer_order (product_id, quantity, total_price, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(quote.total_price.cents())
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let order = Order {
            id: result.last_insert_rowid(),
            product_id,
            quantity,
            total_price_cents: quote.total_price.cents(),
            created_at,
        };

        info!(
            order_id = order.id,
            product_id,
            quantity,
            total = %quote.total_price,
            remaining_stock = quote.remaining_stock,
            "Order committed"
        );

        Ok(order)
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Lists the orders for one product, oldest first.
    pub async fn list_for_product(&self, product_id: i64) -> DbResult<Vec<Order>> {
        let orders =
            sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE product_id = ?1 ORDER BY id"))
                .bind(product_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(orders)
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer_order")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
