//! # Pricing Utilities
//!
//! Pure, side-effect-free pricing functions.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      How a Total is Built                           │
//! │                                                                     │
//! │  CartLine ──► effective_unit_price ──► line_total ──► subtotal     │
//! │                                                          │          │
//! │                                            apply_discount│          │
//! │                                                          ▼          │
//! │              grand_total ◄── shipping + tax ◄── discounted subtotal │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is deterministic and total: no I/O, no panics,
//! and no negative results.

use crate::cart::CartLine;
use crate::money::Money;
use crate::types::{Discount, LineKind};

// =============================================================================
// Line Pricing
// =============================================================================

/// Returns the price one unit of this line actually sells for.
///
/// A discounted unit price wins over the regular price when present and
/// positive. `Offer` lines are the exception: offers are pre-discounted
/// bundles, so their regular price is always used even if a discounted
/// price field is set.
pub fn effective_unit_price(line: &CartLine) -> Money {
    if line.kind == LineKind::Offer {
        return Money::from_cents(line.unit_price_cents);
    }

    match line.discounted_unit_price_cents {
        Some(cents) if cents > 0 => Money::from_cents(cents),
        _ => Money::from_cents(line.unit_price_cents),
    }
}

/// Returns the total for one line (effective unit price × quantity).
pub fn line_total(line: &CartLine) -> Money {
    effective_unit_price(line).multiply_quantity(line.quantity)
}

/// Sums the effective line totals, pre-discount.
pub fn subtotal(lines: &[CartLine]) -> Money {
    lines
        .iter()
        .fold(Money::zero(), |acc, line| acc + line_total(line))
}

// =============================================================================
// Discount Application
// =============================================================================

/// Applies a cart discount to a subtotal.
///
/// The result is floored at zero: a fixed discount larger than the
/// subtotal yields a free cart, never a negative charge.
///
/// ## Example
/// ```rust
/// use souq_core::money::Money;
/// use souq_core::pricing::apply_discount;
/// use souq_core::types::Discount;
///
/// let subtotal = Money::from_cents(10000);
/// let ten_percent = Discount::Percentage(1000);
/// assert_eq!(apply_discount(subtotal, &ten_percent).cents(), 9000);
/// ```
pub fn apply_discount(subtotal: Money, discount: &Discount) -> Money {
    match discount {
        Discount::Fixed(amount) => subtotal.saturating_sub_to_zero(*amount),
        Discount::Percentage(bps) => {
            let discounted = subtotal.apply_percentage_discount(*bps);
            // A >100% rate is rejected at the validation boundary; floor
            // anyway so pricing stays total over all inputs.
            if discounted.is_negative() {
                Money::zero()
            } else {
                discounted
            }
        }
    }
}

/// Builds the grand total from its parts.
///
/// Shipping and tax are supplied by an external rate collaborator; the
/// storefront currently passes zero placeholders for both.
pub fn grand_total(discounted_subtotal: Money, shipping: Money, tax: Money) -> Money {
    discounted_subtotal + shipping + tax
}

// =============================================================================
// Unit Tests
// =============================================================================
