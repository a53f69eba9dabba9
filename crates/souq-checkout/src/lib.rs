//! # souq-checkout: Cart Store & Checkout Orchestration
//!
//! Everything between the pure pricing core and the outside world: the
//! shared cart store, coupon resolution, the payment adapter, and the
//! checkout state machine that drives an order from address selection to
//! submission.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   ★ souq-checkout (THIS CRATE) ★                    │
//! │                                                                     │
//! │  ┌──────────┐   ┌───────────────┐  ┌──────────────┐  ┌──────────┐  │
//! │  │ CartStore│   │ CouponResolver│  │PaymentAdapter│  │ Checkout │  │
//! │  │ (shared) │◄──│  (validated)  │  │ (processor)  │◄─│ (driver) │  │
//! │  └────┬─────┘   └───────┬───────┘  └──────┬───────┘  └────┬─────┘  │
//! │       │                 │                 │               │        │
//! │       ▼                 ▼                 ▼               ▼        │
//! │   souq-core       CouponService    PaymentProcessor  OrderService  │
//! │   (pure math)     (remote trait)   (remote trait)    AddressService│
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All network collaborators are traits ([`services`], [`payment`]); the
//! host application injects implementations, tests inject stubs. Nothing
//! in this crate opens a socket on its own.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod coupon;
pub mod error;
pub mod payment;
pub mod services;
pub mod store;

#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{Checkout, CheckoutSession, CheckoutStep, SubmissionStatus};
pub use coupon::CouponResolver;
pub use error::{CheckoutError, CheckoutResult, CouponError, ProcessorError, ServiceError};
pub use payment::{
    BillingDetails, ClientSecret, ConfirmedPayment, PaymentAdapter, PaymentContext,
    PaymentProcessor,
};
pub use services::{AddressInput, AddressService, CouponService, OrderService};
pub use store::CartStore;
