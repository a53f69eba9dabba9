//! # souq-core: Pure Pricing & Cart Logic
//!
//! This crate is the **heart** of the storefront's cart/orders subsystem.
//! It contains all pricing and cart business logic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Souq Storefront Architecture                     │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                    Storefront UI                              │ │
//! │  │   Cart view ──► Address step ──► Payment step ──► Review      │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                       souq-checkout                           │ │
//! │  │   CartStore · CouponResolver · PaymentAdapter · Checkout      │ │
//! │  └──────────────────────────────┬────────────────────────────────┘ │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐ │
//! │  │                ★ souq-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐      │ │
//! │  │   │  money  │  │ pricing │  │  cart   │  │ validation │      │ │
//! │  │   │  Money  │  │ totals  │  │  Cart   │  │   rules    │      │ │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘      │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                        │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer-cents arithmetic (no floating point!)
//! - [`pricing`] - Pure line/subtotal/discount/total functions
//! - [`cart`] - Cart lines, merge semantics, derived totals
//! - [`types`] - Domain types (Discount, OrderRequest, Address, ...)
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: network, persistence, and processor access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64); rates are
//!    basis points
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSummary, CartTotals, LineKey};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts and keeps order submissions a reasonable size.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum accepted coupon code length.
pub const MAX_COUPON_CODE_LEN: usize = 64;

/// Currency passed to the payment processor until multi-currency lands.
pub const DEFAULT_CURRENCY: &str = "usd";
