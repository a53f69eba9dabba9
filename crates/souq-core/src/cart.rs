//! # Cart
//!
//! The shopping cart: lines, discount state, and derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Cart State Operations                           │
//! │                                                                     │
//! │  Shopper Action            Operation              State Change      │
//! │  ──────────────            ─────────              ────────────      │
//! │  Add to cart ────────────► add_line() ──────────► merge or append   │
//! │  Change quantity ────────► update_quantity() ───► set / remove      │
//! │  Remove line ────────────► remove_line() ───────► drop line         │
//! │  Apply coupon ───────────► set_discount() ──────► overwrite         │
//! │  Order placed / clear ───► clear() ─────────────► empty + reset     │
//! │                                                                     │
//! │  Derived totals are recomputed on read from the lines; they are     │
//! │  never stored, so they can never go stale.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `LineKey` (purchasable + color + variant);
//!   adding the same key again sums quantities into one line
//! - `quantity >= 1` always; an update to 0 or below removes the line
//! - Maximum distinct lines: `MAX_CART_LINES`
//! - Maximum quantity per line: `MAX_LINE_QUANTITY`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::types::{ColorChoice, Discount, LineKind, LocalizedText, OrderLine, VariantChoice};
use crate::validation::{validate_discount, validate_quantity, validate_unit_price};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One purchasable entry in the cart.
///
/// ## Design Notes
/// Prices and display metadata are frozen at the moment of adding
/// (snapshot pattern): if the catalog changes afterwards, the cart keeps
/// showing what the shopper agreed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Id of the purchasable (product or promotional bundle).
    pub purchasable_id: String,

    /// Product or pre-discounted offer bundle.
    pub kind: LineKind,

    /// Quantity in cart, always >= 1.
    pub quantity: i64,

    /// Regular unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Sale unit price in cents, if the purchasable is on discount.
    /// `None` or 0 means "no line discount". Ignored for offers.
    pub discounted_unit_price_cents: Option<i64>,

    /// Selected color, if the product has color options.
    pub color: Option<ColorChoice>,

    /// Selected variant (size, capacity, ...), if any.
    pub variant: Option<VariantChoice>,

    /// Display title at time of adding (frozen).
    pub title: LocalizedText,

    /// Thumbnail image reference for the cart UI.
    pub thumbnail: Option<String>,

    /// When this line was added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Returns the uniqueness key for this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            purchasable_id: self.purchasable_id.clone(),
            color_id: self.color.as_ref().map(|c| c.id.clone()),
            variant_id: self.variant.as_ref().map(|v| v.id.clone()),
        }
    }

    /// Returns the regular unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the price one unit actually sells for.
    #[inline]
    pub fn effective_unit_price(&self) -> Money {
        pricing::effective_unit_price(self)
    }

    /// Returns the line total (effective unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        pricing::line_total(self)
    }

    /// Converts this line into its order submission shape.
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            kind: self.kind,
            purchasable_id: self.purchasable_id.clone(),
            quantity: self.quantity,
            color_id: self.color.as_ref().map(|c| c.id.clone()),
            variant_id: self.variant.as_ref().map(|v| v.id.clone()),
        }
    }
}

// =============================================================================
// Line Key
// =============================================================================

/// The uniqueness key for a cart line.
///
/// Two lines merge only when the purchasable *and* the selected color and
/// variant all match. Different variants of the same product stay as
/// distinct lines with their own display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub purchasable_id: String,
    pub color_id: Option<String>,
    pub variant_id: Option<String>,
}

impl LineKey {
    /// Key for a purchasable with no color/variant selection.
    pub fn bare(purchasable_id: impl Into<String>) -> Self {
        LineKey {
            purchasable_id: purchasable_id.into(),
            color_id: None,
            variant_id: None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Owns the line list and the single active discount. Line order is
/// insertion order; it matters only for display.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart, unique by `LineKey`.
    pub lines: Vec<CartLine>,

    /// The active cart-wide discount. At most one; `Discount::none()`
    /// when no coupon is applied.
    pub discount: Discount,

    /// When the cart was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            discount: Discount::none(),
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a line to the cart, merging with an existing line of the same
    /// `LineKey` by summing quantities.
    ///
    /// ## Errors
    /// - quantity < 1 or negative unit price (rejected, not clamped)
    /// - merged quantity would exceed `MAX_LINE_QUANTITY`
    /// - cart already holds `MAX_CART_LINES` distinct lines
    pub fn add_line(&mut self, line: CartLine) -> CoreResult<()> {
        validate_quantity(line.quantity)?;
        validate_unit_price(line.unit_price_cents)?;
        if let Some(cents) = line.discounted_unit_price_cents {
            validate_unit_price(cents)?;
        }

        let key = line.key();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == key) {
            let new_qty = existing.quantity + line.quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(line);
        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - quantity <= 0: removes the line (idempotent removal)
    /// - key absent: no-op, not an error, whatever the quantity
    /// - quantity above the per-line maximum on an existing line: rejected
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_line(key);
            return Ok(());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| &l.key() == key) {
            if quantity > MAX_LINE_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: quantity,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Removes a line if present. Absent keys are a no-op.
    pub fn remove_line(&mut self, key: &LineKey) {
        self.lines.retain(|l| &l.key() != key);
    }

    /// Empties the cart and resets the discount.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = Discount::none();
        self.created_at = Utc::now();
    }

    /// Overwrites the active discount.
    ///
    /// Whether a coupon was actually resolved for this discount is the
    /// caller's responsibility; this only rejects malformed values
    /// (negative fixed amounts, rates above 100%).
    pub fn set_discount(&mut self, discount: Discount) -> CoreResult<()> {
        validate_discount(&discount)?;
        self.discount = discount;
        Ok(())
    }

    /// Replaces the whole line list, e.g. when the persistence
    /// collaborator restores a cart at session start.
    ///
    /// Lines go through the same validation and merge rules as
    /// `add_line`; if any line is invalid the cart is left untouched.
    pub fn replace_lines(&mut self, lines: Vec<CartLine>) -> CoreResult<()> {
        let mut staged = Cart::new();
        for line in lines {
            staged.add_line(line)?;
        }
        self.lines = staged.lines;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Derived Reads
    // -------------------------------------------------------------------------

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Finds a line by key.
    pub fn find_line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.key() == key)
    }

    /// Checks whether a line with this key exists.
    pub fn has_line(&self, key: &LineKey) -> bool {
        self.find_line(key).is_some()
    }

    /// Returns the quantity of a line, or 0 if absent.
    pub fn quantity_of(&self, key: &LineKey) -> i64 {
        self.find_line(key).map(|l| l.quantity).unwrap_or(0)
    }

    /// Subtotal (sum of effective line totals, pre-discount).
    pub fn subtotal(&self) -> Money {
        pricing::subtotal(&self.lines)
    }

    /// The amount the active discount takes off the current subtotal.
    pub fn discount_amount(&self) -> Money {
        self.discount.amount_off(self.subtotal())
    }

    /// Subtotal after the active discount, floored at zero.
    pub fn discounted_subtotal(&self) -> Money {
        pricing::apply_discount(self.subtotal(), &self.discount)
    }

    /// Grand total including externally supplied shipping and tax.
    pub fn total(&self, shipping: Money, tax: Money) -> Money {
        pricing::grand_total(self.discounted_subtotal(), shipping, tax)
    }

    /// Builds the order submission lines for the current cart.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines.iter().map(CartLine::to_order_line).collect()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Summary / Totals DTOs
// =============================================================================

/// Lightweight cart header for badge counts and empty-state checks.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total_items: i64,
    pub line_count: usize,
    pub is_empty: bool,
    pub has_lines: bool,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            total_items: cart.total_items(),
            line_count: cart.line_count(),
            is_empty: cart.is_empty(),
            has_lines: !cart.is_empty(),
        }
    }
}

/// The full price breakdown shown on the review step.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub shipping_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

impl CartTotals {
    /// Computes the breakdown for a cart with the given shipping/tax.
    pub fn compute(cart: &Cart, shipping: Money, tax: Money) -> Self {
        CartTotals {
            subtotal_cents: cart.subtotal().cents(),
            discount_cents: cart.discount_amount().cents(),
            shipping_cents: shipping.cents(),
            tax_cents: tax.cents(),
            total_cents: cart.total(shipping, tax).cents(),
        }
    }
}

// =============================================================================
// Test Support
// =============================================================================


// =============================================================================
// Unit Tests
// =============================================================================
