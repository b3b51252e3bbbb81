//! # Error Types
//!
//! Domain-specific error types for webshop-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  webshop-core errors (this file)                                       │
//! │  ├── CoreError        - Order rule violations                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  webshop-db errors (separate crate)                                    │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── OrderError       - CoreError or DbError from process_order        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → OrderError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These are local validation failures. They are never retried by the
/// order processor; the caller decides whether to try again with a
/// different quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// The product has no stock level, or fewer units than requested.
    ///
    /// ## User Workflow
    /// ```text
    /// Order now (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient stock for product 1: available 3, requested 5"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// The order total does not fit in the money representation.
    #[error("Order total overflows for {quantity} x {unit_price_cents} cents")]
    PriceOverflow { unit_price_cents: i64, quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InsufficientStock error.
    pub fn insufficient_stock(product_id: i64, available: i64, requested: i64) -> Self {
        CoreError::InsufficientStock {
            product_id,
            available,
            requested,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::insufficient_stock(1, 3, 5);
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: available 3, requested 5"
        );

        let err = CoreError::ProductNotFound(42);
        assert_eq!(err.to_string(), "Product not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
