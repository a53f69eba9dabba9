//! # Domain Types
//!
//! Shared domain types for the cart/checkout core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │    Discount    │   │  OrderRequest  │   │    Address     │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  Fixed(cents)  │   │  user_id       │   │  street/city   │      │
//! │  │  Percentage    │   │  items[]       │   │  postal_code   │      │
//! │  │  (basis pts)   │   │  payment_id?   │   │  country       │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! │                                                                     │
//! │  LineKind: Product | Offer     PaymentMethod: CashOnDelivery |     │
//! │  (explicit tag, no duck        CreditCard                          │
//! │   typing on field presence)                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Purchasable Kind
// =============================================================================

/// The two kinds of orderable entities.
///
/// A `Product` is a regular catalog item; an `Offer` is a pre-discounted
/// promotional bundle. The kind is an explicit tag so downstream code never
/// has to sniff payload fields to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Product,
    Offer,
}

// =============================================================================
// Discount
// =============================================================================

/// An applied cart discount.
///
/// At most one discount is active per cart. "No discount" is represented
/// as a fixed discount of zero, matching what `Cart::clear` resets to.
///
/// ## Wire Shape
/// ```json
/// { "type": "fixed", "amount": 500 }
/// { "type": "percentage", "amount": 1000 }
/// ```
/// Fixed amounts are in cents; percentages are in basis points
/// (1000 = 10%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Discount {
    /// A flat amount off the subtotal, in cents.
    Fixed(Money),
    /// A percentage off the subtotal, in basis points.
    Percentage(u32),
}

impl Discount {
    /// The no-discount value.
    #[inline]
    pub const fn none() -> Self {
        Discount::Fixed(Money::zero())
    }

    /// Checks whether this discount has no effect.
    pub const fn is_none(&self) -> bool {
        match self {
            Discount::Fixed(amount) => amount.is_zero(),
            Discount::Percentage(bps) => *bps == 0,
        }
    }

    /// Returns the amount this discount takes off the given subtotal.
    ///
    /// Never exceeds the subtotal itself, so applying the discount can
    /// never produce a negative total.
    pub fn amount_off(&self, subtotal: Money) -> Money {
        match self {
            Discount::Fixed(amount) => {
                if *amount > subtotal {
                    subtotal
                } else {
                    *amount
                }
            }
            Discount::Percentage(bps) => subtotal - subtotal.apply_percentage_discount(*bps),
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

/// The resolved effect of a coupon lookup.
///
/// Transient: held by the checkout orchestrator and pushed into the cart's
/// discount state, never persisted independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDescriptor {
    /// The coupon code as entered by the shopper (trimmed).
    pub code: String,
    /// The discount the coupon grants.
    pub discount: Discount,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the shopper pays for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery. No processor involvement.
    CashOnDelivery,
    /// Card payment through the hosted payment processor.
    CreditCard,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::CashOnDelivery
    }
}

// =============================================================================
// Selections & Display Metadata
// =============================================================================

/// A selected product color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ColorChoice {
    pub id: String,
    /// Display name, e.g. "Midnight Blue".
    pub label: String,
    /// Hex color code for the swatch, e.g. "#1a2b3c".
    pub code: Option<String>,
}

/// A selected product variant (size, capacity, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantChoice {
    pub id: String,
    /// Display name, e.g. "XL" or "256 GB".
    pub label: String,
}

/// A bilingual display string. The storefront serves English and Arabic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

// =============================================================================
// Address
// =============================================================================

/// Shipping/billing address category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddressType {
    Home,
    Work,
    Other,
}

/// A saved shopper address, as served by the address book collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub address_type: AddressType,
    pub is_default: bool,
}

// =============================================================================
// Order Submission
// =============================================================================

/// One line of an outbound order submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub kind: LineKind,
    pub purchasable_id: String,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
}

/// The outbound order submission payload.
///
/// `payment_id` is present only on the card path, carrying the confirmed
/// payment's identifier so the order service can tie the order to the
/// captured payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: String,
    pub address_id: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

/// A created order, as returned by the order service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
