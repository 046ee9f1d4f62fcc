//! Field-level validation for inventory records.
//!
//! Every rule that guards the store lives here so that the store, the CSV
//! importer, and the natural-language adapter reject the same inputs with
//! the same messages. Each error names the offending SKU and the violated
//! rule.
//!
//! # Examples
//!
//! ```
//! use stockroom_core::*;
//!
//! assert!(validate_sku("B300").is_ok());
//! assert_eq!(validate_sku("  "), Err(ValidationError::EmptySku));
//!
//! // Subtracting more than is in stock is rejected, never clamped.
//! assert!(matches!(
//!     validate_subtraction("B300", 30, 20),
//!     Err(ValidationError::InsufficientStock { .. })
//! ));
//! ```

use thiserror::Error;

use crate::ItemPatch;

/// Item validation errors.
///
/// Each variant describes one violated rule. The `Display` impl provides a
/// human-readable message suitable for the error stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// SKU is empty or whitespace-only.
    #[error("sku cannot be empty")]
    EmptySku,
    /// Name is empty or whitespace-only.
    #[error("name for sku '{sku}' cannot be empty")]
    EmptyName { sku: String },
    /// Quantity below zero.
    #[error("quantity for sku '{sku}' must be >= 0 (got {value})")]
    NegativeQuantity { sku: String, value: i64 },
    /// Price below zero.
    #[error("price for sku '{sku}' must be >= 0 (got {value})")]
    NegativePrice { sku: String, value: f64 },
    /// Price is NaN or infinite.
    #[error("price for sku '{sku}' must be a finite number")]
    NonFinitePrice { sku: String },
    /// Subtract amount is zero or negative.
    #[error("amount to subtract from sku '{sku}' must be > 0 (got {amount})")]
    NonPositiveAmount { sku: String, amount: i64 },
    /// Subtract would drive the quantity below zero.
    #[error("cannot subtract {requested} from sku '{sku}': only {available} in stock")]
    InsufficientStock {
        sku: String,
        requested: i64,
        available: i64,
    },
}

/// Validates that a SKU is non-empty.
pub fn validate_sku(sku: &str) -> Result<(), ValidationError> {
    if sku.trim().is_empty() {
        return Err(ValidationError::EmptySku);
    }
    Ok(())
}

pub fn validate_name(sku: &str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName {
            sku: sku.to_string(),
        });
    }
    Ok(())
}

pub fn validate_quantity(sku: &str, quantity: i64) -> Result<(), ValidationError> {
    if quantity < 0 {
        return Err(ValidationError::NegativeQuantity {
            sku: sku.to_string(),
            value: quantity,
        });
    }
    Ok(())
}

pub fn validate_price(sku: &str, price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::NonFinitePrice {
            sku: sku.to_string(),
        });
    }
    if price < 0.0 {
        return Err(ValidationError::NegativePrice {
            sku: sku.to_string(),
            value: price,
        });
    }
    Ok(())
}

/// Validates every field of a record about to be created or overwritten.
///
/// Rules are checked in column order, so the first violated rule is the
/// one reported.
pub fn validate_new_item(
    sku: &str,
    name: &str,
    quantity: i64,
    price: f64,
) -> Result<(), ValidationError> {
    validate_sku(sku)?;
    validate_name(sku, name)?;
    validate_quantity(sku, quantity)?;
    validate_price(sku, price)?;
    Ok(())
}

/// Validates only the fields a patch supplies.
pub fn validate_patch(sku: &str, patch: &ItemPatch) -> Result<(), ValidationError> {
    validate_sku(sku)?;
    if let Some(name) = &patch.name {
        validate_name(sku, name)?;
    }
    if let Some(quantity) = patch.quantity {
        validate_quantity(sku, quantity)?;
    }
    if let Some(price) = patch.price {
        validate_price(sku, price)?;
    }
    Ok(())
}

/// Checks a subtraction against the stock on hand and returns the new
/// quantity.
pub fn validate_subtraction(sku: &str, amount: i64, available: i64) -> Result<i64, ValidationError> {
    if amount <= 0 {
        return Err(ValidationError::NonPositiveAmount {
            sku: sku.to_string(),
            amount,
        });
    }
    match available.checked_sub(amount) {
        Some(remaining) if remaining >= 0 => Ok(remaining),
        _ => Err(ValidationError::InsufficientStock {
            sku: sku.to_string(),
            requested: amount,
            available,
        }),
    }
}
