//! # Order Quoting
//!
//! The decision half of order processing: given the product and stock level
//! as read inside a transaction, either reject the order or say exactly what
//! the transaction must write.
//!
//! ## Decision Flow
//! ```text
//! OrderRequest { product_id, quantity }
//!      │
//!      ├── quantity <= 0 ─────────────► Validation(MustBePositive)
//!      │
//!      ├── product missing ───────────► ProductNotFound
//!      │
//!      ├── stock missing / too low ───► InsufficientStock
//!      │
//!      ├── price × quantity overflows ► PriceOverflow
//!      │
//!      ▼
//! OrderQuote { total_price, remaining_stock }
//! ```
//!
//! The store applies the quote (decrement + order insert) in the same
//! transaction it read the inputs in.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, StockLevel};
use crate::validation::validate_quantity;

/// A request to buy `quantity` units of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub product_id: i64,
    pub quantity: i64,
}

impl OrderRequest {
    pub fn new(product_id: i64, quantity: i64) -> Self {
        OrderRequest {
            product_id,
            quantity,
        }
    }

    /// Rejects non-positive quantities.
    pub fn validate(&self) -> CoreResult<()> {
        validate_quantity(self.quantity)?;
        Ok(())
    }
}

/// What an accepted order will write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuote {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub total_price: Money,
    /// Stock left after the decrement; never negative.
    pub remaining_stock: i64,
}

/// Validates an order against the product and its current stock level.
///
/// ## Example
/// ```rust
/// use webshop_core::order::{quote_order, OrderRequest};
/// use webshop_core::{Product, StockLevel};
///
/// let product = Product {
///     id: 1,
///     name: "Laptop".to_string(),
///     description: None,
///     price_cents: 120_000,
///     supplier_id: 1,
/// };
/// let stock = StockLevel { id: 1, product_id: 1, stock_quantity: 50 };
///
/// let quote = quote_order(OrderRequest::new(1, 2), Some(&product), Some(&stock)).unwrap();
/// assert_eq!(quote.total_price.cents(), 240_000);
/// assert_eq!(quote.remaining_stock, 48);
/// ```
pub fn quote_order(
    request: OrderRequest,
    product: Option<&Product>,
    stock: Option<&StockLevel>,
) -> CoreResult<OrderQuote> {
    request.validate()?;

    let product = product.ok_or(CoreError::ProductNotFound(request.product_id))?;

    let available = stock.map(|s| s.stock_quantity).unwrap_or(0);
    let stock = match stock {
        Some(s) if s.can_fulfil(request.quantity) => s,
        _ => {
            return Err(CoreError::insufficient_stock(
                product.id,
                available,
                request.quantity,
            ))
        }
    };

    let unit_price = product.price();
    let total_price =
        unit_price
            .checked_mul_quantity(request.quantity)
            .ok_or(CoreError::PriceOverflow {
                unit_price_cents: unit_price.cents(),
                quantity: request.quantity,
            })?;

    Ok(OrderQuote {
        product_id: product.id,
        quantity: request.quantity,
        unit_price,
        total_price,
        remaining_stock: stock.stock_quantity - request.quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn smartphone() -> Product {
        Product {
            id: 2,
            name: "Smartphone".to_string(),
            description: Some("A latest model smartphone".to_string()),
            price_cents: 80_000,
            supplier_id: 1,
        }
    }

    fn stock(qty: i64) -> StockLevel {
        StockLevel {
            id: 2,
            product_id: 2,
            stock_quantity: qty,
        }
    }

    #[test]
    fn test_quote_within_stock() {
        let quote = quote_order(OrderRequest::new(2, 100), Some(&smartphone()), Some(&stock(100)))
            .unwrap();
        assert_eq!(quote.total_price, Money::from_cents(8_000_000));
        assert_eq!(quote.unit_price, Money::from_cents(80_000));
        assert_eq!(quote.remaining_stock, 0);
    }

    #[test]
    fn test_quote_exceeding_stock() {
        let err = quote_order(OrderRequest::new(2, 101), Some(&smartphone()), Some(&stock(100)))
            .unwrap_err();
        assert_eq!(err, CoreError::insufficient_stock(2, 100, 101));
    }

    #[test]
    fn test_quote_missing_stock_level() {
        let err = quote_order(OrderRequest::new(2, 1), Some(&smartphone()), None).unwrap_err();
        assert_eq!(err, CoreError::insufficient_stock(2, 0, 1));
    }

    #[test]
    fn test_quote_missing_product() {
        let err = quote_order(OrderRequest::new(99, 1), None, None).unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound(99));
    }

    #[test]
    fn test_quote_rejects_non_positive_quantity() {
        let err = quote_order(OrderRequest::new(2, 0), Some(&smartphone()), Some(&stock(5)))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
    }

    #[test]
    fn test_quote_overflow() {
        let mut product = smartphone();
        product.price_cents = i64::MAX;
        let err = quote_order(OrderRequest::new(2, 2), Some(&product), Some(&stock(5)))
            .unwrap_err();
        assert!(matches!(err, CoreError::PriceOverflow { quantity: 2, .. }));
    }

    #[test]
    fn test_free_product_costs_nothing() {
        let mut product = smartphone();
        product.price_cents = 0;
        let quote = quote_order(OrderRequest::new(2, 3), Some(&product), Some(&stock(5))).unwrap();
        assert!(quote.total_price.is_zero());
        assert_eq!(quote.remaining_stock, 2);
    }
}
