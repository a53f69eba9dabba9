//! # Payment Adapter
//!
//! A stateless pass-through over the third-party payment processor.
//!
//! ## Card Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Hosted-Elements Card Payment                       │
//! │                                                                     │
//! │  create_intent(grand total) ──► processor ──► client secret        │
//! │          │                                                          │
//! │          ▼                                                          │
//! │  confirm(client secret, billing details) ──► processor SDK          │
//! │          │                    (may run a 3-D Secure challenge)      │
//! │          ▼                                                          │
//! │  ConfirmedPayment { payment_id } ──► order submission               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The adapter holds no state beyond the processor handle. Its job is
//! input validation and keeping the intent amount honest: the amount is
//! taken at call time, never from a cached total.

use async_trait::async_trait;
use tracing::{debug, warn};

use souq_core::{Address, Money};

use crate::error::ProcessorError;

// =============================================================================
// Processor Boundary
// =============================================================================

/// Order context attached to a payment intent, so processor-side records
/// can be traced back to the session that created them.
#[derive(Debug, Clone)]
pub struct PaymentContext {
    pub user_id: String,
    pub address_id: String,
    pub session_id: String,
}

/// A created payment intent, identified by its client secret.
#[derive(Debug, Clone)]
pub struct ClientSecret(pub String);

/// A processor-confirmed payment.
#[derive(Debug, Clone)]
pub struct ConfirmedPayment {
    /// Processor-side payment identifier, carried on the order request.
    pub payment_id: String,
}

/// Billing fields the processor requires to confirm a card payment.
#[derive(Debug, Clone)]
pub struct BillingDetails {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl BillingDetails {
    /// Builds billing details from a saved address plus the cardholder
    /// name entered on the payment step.
    pub fn from_address(address: &Address, cardholder_name: &str) -> Self {
        BillingDetails {
            name: cardholder_name.to_string(),
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }
}

/// The processor client (hosted-elements card SDK shape).
///
/// Implementations wrap the real SDK; tests use scripted stubs.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Whether the hosted card input elements are mounted and usable.
    fn elements_ready(&self) -> bool;

    /// Creates a payment intent for the given amount.
    async fn create_payment_intent(
        &self,
        amount: Money,
        currency: &str,
        context: &PaymentContext,
    ) -> Result<ClientSecret, ProcessorError>;

    /// Confirms a card payment. May involve a shopper challenge
    /// (3-D Secure) on the processor side before it returns.
    async fn confirm_card_payment(
        &self,
        client_secret: &ClientSecret,
        billing: &BillingDetails,
    ) -> Result<ConfirmedPayment, ProcessorError>;
}

// =============================================================================
// Payment Adapter
// =============================================================================

/// Validating wrapper around a [`PaymentProcessor`].
#[derive(Debug, Clone)]
pub struct PaymentAdapter<P> {
    processor: P,
}

impl<P: PaymentProcessor> PaymentAdapter<P> {
    pub fn new(processor: P) -> Self {
        PaymentAdapter { processor }
    }

    /// Whether the card input elements are ready for confirmation.
    pub fn elements_ready(&self) -> bool {
        self.processor.elements_ready()
    }

    /// Creates a payment intent for the *current* grand total.
    ///
    /// A non-positive amount is a caller bug (empty cart or a discount
    /// anomaly) and is rejected before the processor sees it.
    pub async fn create_intent(
        &self,
        amount: Money,
        currency: &str,
        context: &PaymentContext,
    ) -> Result<ClientSecret, ProcessorError> {
        if !amount.is_positive() {
            return Err(ProcessorError::InvalidAmount {
                reason: format!("amount must be positive, got {}", amount),
            });
        }

        debug!(amount = %amount, currency = %currency, session = %context.session_id, "creating payment intent");
        self.processor
            .create_payment_intent(amount, currency, context)
            .await
    }

    /// Confirms a payment intent with the shopper's billing details.
    ///
    /// An unmounted processor surfaces as the distinct
    /// [`ProcessorError::NotReady`] precondition error, never as a
    /// generic confirmation failure.
    pub async fn confirm(
        &self,
        client_secret: &ClientSecret,
        billing: &BillingDetails,
    ) -> Result<ConfirmedPayment, ProcessorError> {
        if !self.processor.elements_ready() {
            warn!("confirm called before payment elements were mounted");
            return Err(ProcessorError::NotReady);
        }

        self.processor
            .confirm_card_payment(client_secret, billing)
            .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
