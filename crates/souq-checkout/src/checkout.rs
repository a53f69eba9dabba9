//! # Checkout Orchestrator
//!
//! A step-sequenced state machine coordinating address selection, payment
//! method selection, coupon application, and order submission.
//!
//! ## Step Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Step Machine                           │
//! │                                                                     │
//! │  ┌──────────┐      ┌──────────┐      ┌──────────┐     ┌──────────┐ │
//! │  │ Shipping │─────►│ Payment  │─────►│  Review  │────►│ Complete │ │
//! │  │   (1)    │◄─────│   (2)    │◄─────│   (3)    │     │(terminal)│ │
//! │  └──────────┘      └──────────┘      └──────────┘     └──────────┘ │
//! │                                                                     │
//! │  1→2 requires a selected address                                    │
//! │  2→3 requires cash OR (card AND payment elements mounted)           │
//! │  3→Complete only through place_order(), never step navigation       │
//! │  "previous" clamps at Shipping                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Place-Order Algorithm (two divergent payment paths)
//! ```text
//! validate user + address + non-empty cart
//!        │
//!        ├── cash ──► create order ──► clear cart, mark complete
//!        │
//!        └── card ──► create intent (CURRENT grand total)
//!                 ──► resolve billing address
//!                 ──► confirm payment (3-D Secure may run here)
//!                 ──► create order with confirmed payment id
//!                       │
//!                       └── failure HERE is a ReconciliationGap:
//!                           payment captured, no order. Distinct error,
//!                           cart kept, card flow must not be replayed.
//! ```
//!
//! Every network call is awaited sequentially: each step's output is the
//! next step's input. A second `place_order` while one is in flight is
//! rejected locally via the submission status.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use souq_core::{
    Address, CartTotals, Discount, Money, Order, OrderRequest, PaymentMethod, ValidationError,
    DEFAULT_CURRENCY,
};

use crate::coupon::CouponResolver;
use crate::error::{CheckoutError, CheckoutResult};
use crate::payment::{BillingDetails, PaymentAdapter, PaymentContext, PaymentProcessor};
use crate::services::{AddressService, CouponService, OrderService};
use crate::store::CartStore;

// =============================================================================
// Steps & Status
// =============================================================================

/// The three navigable checkout steps. Completion is not a step: it is
/// the `order_complete` terminal flag, reached only through
/// [`Checkout::place_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Review,
}

impl CheckoutStep {
    /// 1-based step number, as shown in the progress indicator.
    pub const fn number(&self) -> u8 {
        match self {
            CheckoutStep::Shipping => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Review => 3,
        }
    }
}

/// Submission progress as one explicit status, not scattered booleans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum SubmissionStatus {
    Idle,
    InFlight,
    Succeeded,
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionStatus::InFlight)
    }
}

// =============================================================================
// Session
// =============================================================================

/// Orchestrator-owned session state. Not persisted across restarts;
/// created when checkout begins and reset when it is abandoned or
/// completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Correlation id for logs and processor-side order context.
    pub id: String,
    pub step: CheckoutStep,
    pub selected_address_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub applied_coupon: Option<String>,
    pub cardholder_name: Option<String>,
    pub status: SubmissionStatus,
    /// Payment captured by a failed card submission, awaiting an order.
    /// While set, a card resubmission reuses this payment instead of
    /// charging the shopper again.
    pub pending_payment_id: Option<String>,
    /// Terminal flag, set only after a successful order.
    pub order_complete: bool,
}

impl CheckoutSession {
    fn new() -> Self {
        CheckoutSession {
            id: Uuid::new_v4().to_string(),
            step: CheckoutStep::Shipping,
            selected_address_id: None,
            payment_method: PaymentMethod::default(),
            applied_coupon: None,
            cardholder_name: None,
            status: SubmissionStatus::Idle,
            pending_payment_id: None,
            order_complete: false,
        }
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// The checkout orchestrator.
///
/// Reads the cart through its injected [`CartStore`] handle and issues
/// only whole-operation commands to it (`clear`, `set_discount`); it
/// never edits individual lines. All outward calls go through the
/// injected collaborators.
#[derive(Debug)]
pub struct Checkout<A, C, O, P> {
    session: CheckoutSession,
    cart: CartStore,
    addresses: A,
    coupons: CouponResolver<C>,
    orders: O,
    payments: PaymentAdapter<P>,
    /// From the auth collaborator; `None` while signed out.
    user_id: Option<String>,
    /// Zero placeholders until the rate collaborator supplies real values.
    shipping: Money,
    tax: Money,
    currency: String,
}

impl<A, C, O, P> Checkout<A, C, O, P>
where
    A: AddressService,
    C: CouponService,
    O: OrderService,
    P: PaymentProcessor,
{
    pub fn new(
        cart: CartStore,
        addresses: A,
        coupons: C,
        orders: O,
        processor: P,
        user_id: Option<String>,
    ) -> Self {
        Checkout {
            session: CheckoutSession::new(),
            cart,
            addresses,
            coupons: CouponResolver::new(coupons),
            orders,
            payments: PaymentAdapter::new(processor),
            user_id,
            shipping: Money::zero(),
            tax: Money::zero(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Price breakdown for the review step, with current shipping/tax.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(self.shipping, self.tax)
    }

    // -------------------------------------------------------------------------
    // Session Inputs
    // -------------------------------------------------------------------------

    pub fn select_address(&mut self, address_id: impl Into<String>) {
        self.session.selected_address_id = Some(address_id.into());
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.session.payment_method = method;
    }

    pub fn set_cardholder_name(&mut self, name: impl Into<String>) {
        self.session.cardholder_name = Some(name.into());
    }

    /// Overrides the zero shipping/tax placeholders when the external
    /// rate collaborator has real values.
    pub fn set_rates(&mut self, shipping: Money, tax: Money) {
        self.shipping = shipping;
        self.tax = tax;
    }

    // -------------------------------------------------------------------------
    // Step Navigation
    // -------------------------------------------------------------------------

    /// Whether the current step's forward gate is satisfied.
    pub fn can_advance(&self) -> bool {
        match self.session.step {
            CheckoutStep::Shipping => self.session.selected_address_id.is_some(),
            CheckoutStep::Payment => match self.session.payment_method {
                PaymentMethod::CashOnDelivery => true,
                PaymentMethod::CreditCard => self.payments.elements_ready(),
            },
            // Leaving Review happens only through place_order.
            CheckoutStep::Review => false,
        }
    }

    /// Advances to the next step if its gate is satisfied.
    pub fn next_step(&mut self) -> CheckoutResult<CheckoutStep> {
        let next = match self.session.step {
            CheckoutStep::Shipping => {
                if self.session.selected_address_id.is_none() {
                    return Err(ValidationError::Required {
                        field: "addressId".to_string(),
                    }
                    .into());
                }
                CheckoutStep::Payment
            }
            CheckoutStep::Payment => {
                if self.session.payment_method == PaymentMethod::CreditCard
                    && !self.payments.elements_ready()
                {
                    return Err(crate::error::ProcessorError::NotReady.into());
                }
                CheckoutStep::Review
            }
            CheckoutStep::Review => CheckoutStep::Review,
        };

        self.session.step = next;
        Ok(next)
    }

    /// Steps backward, clamping at Shipping.
    pub fn previous_step(&mut self) -> CheckoutStep {
        let previous = match self.session.step {
            CheckoutStep::Shipping | CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
        };
        self.session.step = previous;
        previous
    }

    // -------------------------------------------------------------------------
    // Coupons
    // -------------------------------------------------------------------------

    /// Resolves and applies a coupon to the cart.
    ///
    /// Re-applying the code that is already active is a no-op and does
    /// not issue a second lookup. On any failure the cart's discount is
    /// left exactly as it was.
    pub async fn apply_coupon(&mut self, code: &str) -> CheckoutResult<()> {
        let trimmed = code.trim();
        if self.session.applied_coupon.as_deref() == Some(trimmed) {
            debug!(code = %trimmed, "coupon already applied, skipping lookup");
            return Ok(());
        }

        let user_id = self.require_user()?.to_string();
        let descriptor = self.coupons.resolve(trimmed, &user_id).await?;

        self.cart.set_discount(descriptor.discount)?;
        self.session.applied_coupon = Some(descriptor.code);
        info!(session = %self.session.id, coupon = ?self.session.applied_coupon, "coupon applied");
        Ok(())
    }

    /// Removes the active coupon and resets the cart discount,
    /// regardless of prior state.
    pub fn remove_coupon(&mut self) -> CheckoutResult<()> {
        self.session.applied_coupon = None;
        self.cart.set_discount(Discount::none())?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Place Order
    // -------------------------------------------------------------------------

    /// Submits the order, branching on the selected payment method.
    ///
    /// Safe against double submission: a call while another is in flight
    /// fails fast with [`CheckoutError::SubmissionInFlight`] and touches
    /// nothing. On success the cart is cleared and the session is
    /// terminal; on failure the cart is untouched and the shopper can
    /// retry from the review step. After a
    /// [`CheckoutError::ReconciliationGap`] the captured payment id is
    /// remembered on the session, so a card resubmission retries order
    /// creation only and never charges the shopper a second time.
    pub async fn place_order(&mut self) -> CheckoutResult<Order> {
        if self.session.status.is_in_flight() {
            warn!(session = %self.session.id, "rejected re-entrant place_order");
            return Err(CheckoutError::SubmissionInFlight);
        }

        self.session.status = SubmissionStatus::InFlight;
        let result = self.submit_order().await;

        match &result {
            Ok(order) => {
                self.session.status = SubmissionStatus::Succeeded;
                self.session.order_complete = true;
                info!(session = %self.session.id, order = %order.id, "order placed");
            }
            Err(err) => {
                self.session.status = SubmissionStatus::Failed(err.to_string());
                error!(session = %self.session.id, error = %err, "place_order failed");
            }
        }

        result
    }

    async fn submit_order(&mut self) -> CheckoutResult<Order> {
        let user_id = self.require_user()?.to_string();
        let address_id = self
            .session
            .selected_address_id
            .clone()
            .ok_or(ValidationError::Required {
                field: "addressId".to_string(),
            })?;

        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut request = OrderRequest {
            user_id: user_id.clone(),
            address_id: address_id.clone(),
            payment_method: self.session.payment_method,
            items: self.cart.order_lines(),
            coupon_code: self.session.applied_coupon.clone(),
            payment_id: None,
        };

        match self.session.payment_method {
            PaymentMethod::CashOnDelivery => {
                debug!(session = %self.session.id, "submitting cash-on-delivery order");
                let order = self.orders.create(&request).await?;
                self.finish(&order);
                Ok(order)
            }
            PaymentMethod::CreditCard => {
                let payment_id = match self.session.pending_payment_id.clone() {
                    // A previous submission already captured a payment
                    // but failed to create the order. Reuse it; running
                    // the intent/confirm steps again would charge the
                    // shopper a second time.
                    Some(payment_id) => {
                        info!(
                            session = %self.session.id,
                            payment = %payment_id,
                            "retrying order creation with previously captured payment"
                        );
                        payment_id
                    }
                    None => self.charge_card(&user_id, &address_id).await?,
                };

                // Order referencing the captured payment. Failure here
                // is the reconciliation gap; the payment id is kept on
                // the session so a retry skips the charge.
                request.payment_id = Some(payment_id.clone());
                match self.orders.create(&request).await {
                    Ok(order) => {
                        self.session.pending_payment_id = None;
                        self.finish(&order);
                        Ok(order)
                    }
                    Err(err) => {
                        error!(
                            session = %self.session.id,
                            payment = %payment_id,
                            error = %err,
                            "payment captured but order creation failed"
                        );
                        self.session.pending_payment_id = Some(payment_id.clone());
                        Err(CheckoutError::ReconciliationGap {
                            payment_id,
                            message: err.to_string(),
                        })
                    }
                }
            }
        }
    }

    /// Runs the intent/confirm half of the card path and returns the
    /// captured payment's identifier.
    async fn charge_card(&self, user_id: &str, address_id: &str) -> CheckoutResult<String> {
        // (a) Intent for the grand total as it stands right now.
        let amount = self.cart.total(self.shipping, self.tax);
        let context = PaymentContext {
            user_id: user_id.to_string(),
            address_id: address_id.to_string(),
            session_id: self.session.id.clone(),
        };
        let secret = self
            .payments
            .create_intent(amount, &self.currency, &context)
            .await?;

        // (b) Billing fields from the selected address.
        let address = self.resolve_address(user_id, address_id).await?;
        let cardholder = self.session.cardholder_name.clone().unwrap_or_default();
        let billing = BillingDetails::from_address(&address, &cardholder);

        // (c) Confirmation. Failure here leaves an unconfirmed intent at
        // the processor (it expires on their side) and nothing on ours.
        let confirmed = self.payments.confirm(&secret, &billing).await?;
        Ok(confirmed.payment_id)
    }

    /// Success epilogue shared by both payment paths.
    fn finish(&mut self, order: &Order) {
        self.cart.clear();
        self.session.applied_coupon = None;
        debug!(session = %self.session.id, order = %order.id, "cart cleared after order");
    }

    fn require_user(&self) -> Result<&str, ValidationError> {
        self.user_id
            .as_deref()
            .ok_or(ValidationError::Required {
                field: "userId".to_string(),
            })
    }

    async fn resolve_address(
        &self,
        user_id: &str,
        address_id: &str,
    ) -> CheckoutResult<Address> {
        let all = self
            .addresses
            .list(user_id)
            .await
            .map_err(CheckoutError::AddressLookup)?;
        all.into_iter()
            .find(|a| a.id == address_id)
            .ok_or_else(|| CheckoutError::AddressNotFound(address_id.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
