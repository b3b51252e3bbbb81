//! # Domain Types
//!
//! Core domain types used throughout the webshop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Supplier     │◄───────│    Product      │                        │
//! │  │  id, name       │  (FK)  │  id, name       │                        │
//! │  │  contact_info   │        │  price_cents    │                        │
//! │  └─────────────────┘        └────────┬────────┘                        │
//! │                                      │ (FK)                             │
//! │            ┌─────────────────────────┼─────────────────────┐           │
//! │            ▼                         ▼                     ▼           │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   StockLevel    │   │   RestockRule   │   │     Order       │       │
//! │  │  stock_quantity │   │  minimum_stock  │   │  quantity       │       │
//! │  │  (1:1, ≥ 0)     │   │  order_quantity │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records are identified by an integer surrogate key assigned by the
//! store. Prices are integer cents, see [`Money`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_contact_info, validate_description, validate_name, validate_price_cents,
    validate_stock_quantity,
};

// =============================================================================
// Supplier
// =============================================================================

/// A supplier owning one or more products. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    /// Contact address (the dashboard shows it as the supplier email).
    pub contact_info: Option<String>,
}

/// Supplier fields supplied at creation; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub contact_info: Option<String>,
}

impl NewSupplier {
    /// Validates name and contact info.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("supplier name", &self.name)?;
        if let Some(contact) = &self.contact_info {
            validate_contact_info(contact)?;
        }
        Ok(())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in cents, never negative.
    pub price_cents: i64,
    pub supplier_id: i64,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Product fields supplied at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub supplier_id: i64,
}

impl NewProduct {
    /// Validates name, description and price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("product name", &self.name)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        validate_price_cents(self.price_cents)
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// On-hand quantity for one product. Only the order processor mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StockLevel {
    pub id: i64,
    pub product_id: i64,
    pub stock_quantity: i64,
}

impl StockLevel {
    /// Checks whether `quantity` units can be taken from this stock level.
    #[inline]
    pub fn can_fulfil(&self, quantity: i64) -> bool {
        self.stock_quantity >= quantity
    }
}

// =============================================================================
// Restock Rule
// =============================================================================

/// Reorder threshold and batch size for a product.
///
/// Informational only: nothing reorders automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RestockRule {
    pub id: i64,
    pub product_id: i64,
    /// Batch size to reorder.
    pub order_quantity: i64,
    /// Reorder trigger quantity.
    pub minimum_stock: i64,
}

impl RestockRule {
    /// Returns true when `stock_quantity` has fallen below the trigger.
    #[inline]
    pub fn is_triggered(&self, stock_quantity: i64) -> bool {
        stock_quantity < self.minimum_stock
    }

    /// Validates a rule before insert.
    pub fn validate_values(order_quantity: i64, minimum_stock: i64) -> Result<(), ValidationError> {
        if order_quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "order_quantity".to_string(),
            });
        }
        validate_stock_quantity(minimum_stock).map_err(|_| ValidationError::MustNotBeNegative {
            field: "minimum_stock".to_string(),
        })
    }
}

// =============================================================================
// Order
// =============================================================================

/// A committed customer order. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price × quantity at the moment of commit.
    pub total_price_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the total price as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Inventory Report Row
// =============================================================================

/// One row of the joined inventory view (product, stock, rule, supplier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryRow {
    pub product_id: i64,
    pub name: String,
    pub stock_quantity: i64,
    pub minimum_stock: i64,
    pub order_quantity: i64,
    pub supplier_contact: Option<String>,
}

impl InventoryRow {
    /// Returns true when stock is below the restock trigger.
    #[inline]
    pub fn below_minimum(&self) -> bool {
        self.stock_quantity < self.minimum_stock
    }
}
