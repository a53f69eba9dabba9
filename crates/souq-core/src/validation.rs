//! # Validation Module
//!
//! Input validation utilities, run before any cart state is touched.
//!
//! Invalid input is rejected and reported, never silently clamped: a
//! quantity of 0 on `add_line` is a caller bug, not a removal request.
//!
//! ## Usage
//! ```rust
//! use souq_core::validation::{validate_quantity, validate_coupon_code};
//!
//! validate_quantity(5).unwrap();
//! validate_coupon_code("WELCOME10").unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::Discount;
use crate::{MAX_COUPON_CODE_LEN, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be at least 1 (quantity changes to 0 go through
///   `update_quantity`, which treats them as removal)
/// - Must not exceed the per-line maximum
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// Zero is allowed (free gifts exist); negative prices are not.
pub fn validate_unit_price(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: "unitPrice".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a coupon code before it is sent to the coupon service.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most `MAX_COUPON_CODE_LEN` characters
/// - Alphanumeric plus hyphens and underscores only
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "couponCode".to_string(),
        });
    }

    if code.len() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "couponCode".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "couponCode".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Discount Validators
// =============================================================================

/// Validates a discount before it is written to the cart.
///
/// ## Rules
/// - Fixed amounts must not be negative
/// - Percentages must not exceed 100% (10000 bps)
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Fixed(amount) => {
            if amount.is_negative() {
                return Err(ValidationError::MustBePositive {
                    field: "discountAmount".to_string(),
                });
            }
        }
        Discount::Percentage(bps) => {
            if *bps > 10000 {
                return Err(ValidationError::OutOfRange {
                    field: "discountAmount".to_string(),
                    min: 0,
                    max: 10000,
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
