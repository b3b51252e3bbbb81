//! # Validation Module
//!
//! Input validation for catalog records and orders.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE                                                  │
//! │  ├── Names, descriptions, contact info                                 │
//! │  └── Prices ≥ 0, order quantity > 0                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── CHECK (price >= 0), CHECK (stock_quantity >= 0)                   │
//! │  ├── UNIQUE (stock_levels.product_id)                                  │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use webshop_core::validation::{validate_name, validate_quantity};
//!
//! assert!(validate_name("product name", "Laptop").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_NAME_LENGTH, MAX_TEXT_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a supplier or product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_NAME_LENGTH`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an optional product description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_TEXT_LENGTH,
        });
    }

    Ok(())
}

/// Validates a supplier contact address. When present it must not be blank.
pub fn validate_contact_info(contact: &str) -> ValidationResult<()> {
    let contact = contact.trim();

    if contact.is_empty() {
        return Err(ValidationError::Required {
            field: "contact_info".to_string(),
        });
    }

    if contact.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "contact_info".to_string(),
            max: MAX_TEXT_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order quantity (must be > 0).
///
/// ## Example
/// ```rust
/// use webshop_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-5).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in cents (zero is allowed, negative is not).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an on-hand stock quantity.
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock_quantity".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("product name", "Smartphone").is_ok());
        assert_eq!(
            validate_name("product name", "  "),
            Err(ValidationError::Required {
                field: "product name".to_string()
            })
        );
        assert!(validate_name("product name", &"A".repeat(201)).is_err());
        assert!(validate_name("product name", &"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_contact_info() {
        assert!(validate_contact_info("lars.vansomeren@sia-partners.com").is_ok());
        assert!(validate_contact_info("").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(i64::MAX).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }
}
