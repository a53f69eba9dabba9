//! # Checkout Error Types
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Error Flow                            │
//! │                                                                     │
//! │  Validation ──── missing user/address, empty cart                   │
//! │                  never sent to network, shopper completes input     │
//! │                                                                     │
//! │  Coupon ──────── lookup failures (not found / expired / limit)      │
//! │                  cart discount stays untouched                      │
//! │                                                                     │
//! │  Payment ─────── intent creation or confirmation failed             │
//! │                  no order created, safe to retry                    │
//! │                                                                     │
//! │  Order ───────── order creation failed BEFORE any payment capture   │
//! │                  cart untouched, safe to retry                      │
//! │                                                                     │
//! │  ReconciliationGap ── payment captured but order creation failed    │
//! │                  MUST NOT replay the card flow (double charge);     │
//! │                  retry order creation alone with the payment id,    │
//! │                  or hand off to support                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use souq_core::{CoreError, ValidationError};
use thiserror::Error;

// =============================================================================
// Collaborator Errors
// =============================================================================

/// A remote collaborator call failed.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The call never completed (timeout, connectivity).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with an error status.
    #[error("Service rejected the request: {message}")]
    Rejected { message: String },
}

/// Coupon lookup failures, keyed so the UI can phrase each one.
#[derive(Debug, Clone, Error)]
pub enum CouponError {
    #[error("Coupon '{0}' not found")]
    NotFound(String),

    #[error("Coupon '{0}' has expired")]
    Expired(String),

    #[error("Coupon '{0}' has reached its usage limit")]
    UsageLimitExceeded(String),

    /// Malformed code rejected before any network call.
    #[error("Invalid coupon code: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Coupon lookup failed: {0}")]
    Service(#[from] ServiceError),
}

/// Payment processor failures.
#[derive(Debug, Clone, Error)]
pub enum ProcessorError {
    /// The hosted card elements are not mounted yet. A precondition
    /// error, distinct from a declined payment.
    #[error("Payment elements are not ready")]
    NotReady,

    #[error("Payment intent creation failed: {0}")]
    IntentFailed(String),

    /// Confirmation failed or the shopper cancelled the challenge.
    #[error("Payment confirmation failed: {0}")]
    ConfirmationFailed(String),

    #[error("Invalid payment amount: {reason}")]
    InvalidAmount { reason: String },
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Everything that can go wrong while driving a checkout session.
///
/// All lower-level errors are caught at the orchestrator boundary and
/// surface as one of these; none crash the session, and the shopper can
/// retry from the review step unless the variant says otherwise.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Shopper input is incomplete. Never sent to network.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Place-order was invoked with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A second place-order call while one is in flight. Rejected
    /// locally, not sent to network.
    #[error("An order submission is already in progress")]
    SubmissionInFlight,

    /// The selected address disappeared between selection and billing
    /// resolution. Should not normally occur.
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// The address book could not be read while resolving billing
    /// fields on the card path.
    #[error("Address lookup failed: {0}")]
    AddressLookup(#[source] ServiceError),

    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error(transparent)]
    Payment(#[from] ProcessorError),

    /// Order creation failed before any payment was captured.
    /// Cart and discount are untouched; safe to retry.
    #[error("Order creation failed: {0}")]
    Order(#[from] ServiceError),

    /// Payment captured, order creation failed. The one case where a
    /// naive retry would double-charge: the card flow must not be
    /// replayed. The orchestrator keeps `payment_id` on the session and
    /// a resubmission retries order creation alone; the id is surfaced
    /// here too for manual reconciliation.
    #[error("Payment {payment_id} was received but order creation failed: {message}")]
    ReconciliationGap { payment_id: String, message: String },

    /// Cart/pricing invariant violation bubbled up from souq-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CheckoutError {
    /// Whether retrying the whole place-order flow is safe.
    ///
    /// False only for the reconciliation gap, where a replay of the card
    /// path would charge the shopper twice.
    pub fn is_retry_safe(&self) -> bool {
        !matches!(self, CheckoutError::ReconciliationGap { .. })
    }
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
