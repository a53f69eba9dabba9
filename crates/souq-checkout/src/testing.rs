//! # Test Support
//!
//! Hand-rolled stub collaborators shared by the unit tests. Each stub is
//! cheaply cloneable and shares its recorded calls across clones, so a
//! test can keep a handle and inspect what the orchestrator sent.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use souq_core::{
    Address, AddressType, CartLine, Discount, DiscountDescriptor, LineKind, LocalizedText, Money,
    Order, OrderRequest,
};

use crate::error::{CouponError, ProcessorError, ServiceError};
use crate::payment::{BillingDetails, ClientSecret, ConfirmedPayment, PaymentContext, PaymentProcessor};
use crate::services::{AddressInput, AddressService, CouponService, OrderService};

/// Initializes tracing output for tests. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Line & Address Builders
// =============================================================================

/// A plain product line with no color/variant selection.
pub fn product_line(id: &str, quantity: i64, unit_price_cents: i64) -> CartLine {
    CartLine {
        purchasable_id: id.to_string(),
        kind: LineKind::Product,
        quantity,
        unit_price_cents,
        discounted_unit_price_cents: None,
        color: None,
        variant: None,
        title: LocalizedText {
            en: format!("Product {}", id),
            ar: format!("منتج {}", id),
        },
        thumbnail: None,
        added_at: Utc::now(),
    }
}

/// A saved address with the given id.
pub fn test_address(id: &str) -> Address {
    Address {
        id: id.to_string(),
        street: "14 Corniche Road".to_string(),
        city: "Alexandria".to_string(),
        state: "Alexandria".to_string(),
        postal_code: "21500".to_string(),
        country: "EG".to_string(),
        address_type: AddressType::Home,
        is_default: true,
    }
}

// =============================================================================
// Stub Address Book
// =============================================================================

#[derive(Debug, Clone)]
pub struct StubAddresses {
    addresses: Arc<Mutex<Vec<Address>>>,
}

impl StubAddresses {
    pub fn with(addresses: Vec<Address>) -> Self {
        StubAddresses {
            addresses: Arc::new(Mutex::new(addresses)),
        }
    }
}

#[async_trait]
impl AddressService for StubAddresses {
    async fn list(&self, _user_id: &str) -> Result<Vec<Address>, ServiceError> {
        Ok(self.addresses.lock().unwrap().clone())
    }

    async fn create(&self, _user_id: &str, input: AddressInput) -> Result<Address, ServiceError> {
        let address = Address {
            id: Uuid::new_v4().to_string(),
            street: input.street,
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
            address_type: input.address_type,
            is_default: input.is_default,
        };
        self.addresses.lock().unwrap().push(address.clone());
        Ok(address)
    }

    async fn update(
        &self,
        _user_id: &str,
        address_id: &str,
        input: AddressInput,
    ) -> Result<Address, ServiceError> {
        let mut addresses = self.addresses.lock().unwrap();
        let address = addresses
            .iter_mut()
            .find(|a| a.id == address_id)
            .ok_or_else(|| ServiceError::Rejected {
                message: format!("address {} not found", address_id),
            })?;
        address.street = input.street;
        address.city = input.city;
        address.state = input.state;
        address.postal_code = input.postal_code;
        address.country = input.country;
        address.address_type = input.address_type;
        address.is_default = input.is_default;
        Ok(address.clone())
    }

    async fn delete(&self, _user_id: &str, address_id: &str) -> Result<(), ServiceError> {
        self.addresses.lock().unwrap().retain(|a| a.id != address_id);
        Ok(())
    }
}

// =============================================================================
// Stub Coupon Catalog
// =============================================================================

#[derive(Debug, Clone)]
pub struct StubCoupons {
    grant: Option<(String, Discount)>,
    failure: Option<CouponError>,
    lookups: Arc<AtomicUsize>,
}

impl StubCoupons {
    /// Grants `discount` for exactly `code`; anything else is NotFound.
    pub fn granting(code: &str, discount: Discount) -> Self {
        StubCoupons {
            grant: Some((code.to_string(), discount)),
            failure: None,
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fails every lookup with the given error.
    pub fn failing(error: CouponError) -> Self {
        StubCoupons {
            grant: None,
            failure: Some(error),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many lookups actually hit this service.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CouponService for StubCoupons {
    async fn get(&self, code: &str, _user_id: &str) -> Result<DiscountDescriptor, CouponError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        match &self.grant {
            Some((granted_code, discount)) if granted_code == code => Ok(DiscountDescriptor {
                code: granted_code.clone(),
                discount: *discount,
            }),
            _ => Err(CouponError::NotFound(code.to_string())),
        }
    }
}

// =============================================================================
// Stub Order Service
// =============================================================================

#[derive(Debug, Clone)]
pub struct StubOrders {
    failure: Option<ServiceError>,
    transient_failure: Arc<Mutex<Option<ServiceError>>>,
    requests: Arc<Mutex<Vec<OrderRequest>>>,
}

impl StubOrders {
    pub fn succeeding() -> Self {
        StubOrders {
            failure: None,
            transient_failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every create call.
    pub fn failing(error: ServiceError) -> Self {
        StubOrders {
            failure: Some(error),
            transient_failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails the first create call, then succeeds.
    pub fn failing_once(error: ServiceError) -> Self {
        StubOrders {
            failure: None,
            transient_failure: Arc::new(Mutex::new(Some(error))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The requests that reached the service, failed attempts included.
    pub fn submitted(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderService for StubOrders {
    async fn create(&self, request: &OrderRequest) -> Result<Order, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(error) = self.transient_failure.lock().unwrap().take() {
            return Err(error);
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        Ok(Order {
            id: format!("ord_{}", Uuid::new_v4()),
            total_cents: 0,
            created_at: Utc::now(),
        })
    }
}

// =============================================================================
// Stub Payment Processor
// =============================================================================

#[derive(Debug, Clone)]
pub struct StubProcessor {
    ready: Arc<AtomicBool>,
    intent_error: Option<String>,
    confirm_error: Option<String>,
    intent_amounts: Arc<Mutex<Vec<i64>>>,
    confirms: Arc<AtomicUsize>,
}

impl StubProcessor {
    /// Mounted elements, every call succeeds.
    pub fn succeeding() -> Self {
        StubProcessor {
            ready: Arc::new(AtomicBool::new(true)),
            intent_error: None,
            confirm_error: None,
            intent_amounts: Arc::new(Mutex::new(Vec::new())),
            confirms: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_elements_ready(self, ready: bool) -> Self {
        self.ready.store(ready, Ordering::SeqCst);
        self
    }

    pub fn with_intent_error(mut self, message: &str) -> Self {
        self.intent_error = Some(message.to_string());
        self
    }

    pub fn with_confirm_error(mut self, message: &str) -> Self {
        self.confirm_error = Some(message.to_string());
        self
    }

    /// Amounts (in cents) of every intent created.
    pub fn intent_amounts(&self) -> Vec<i64> {
        self.intent_amounts.lock().unwrap().clone()
    }

    /// How many confirmations were attempted.
    pub fn confirm_count(&self) -> usize {
        self.confirms.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentProcessor for StubProcessor {
    fn elements_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn create_payment_intent(
        &self,
        amount: Money,
        _currency: &str,
        _context: &PaymentContext,
    ) -> Result<ClientSecret, ProcessorError> {
        if let Some(message) = &self.intent_error {
            return Err(ProcessorError::IntentFailed(message.clone()));
        }

        self.intent_amounts.lock().unwrap().push(amount.cents());
        Ok(ClientSecret(format!("cs_{}", Uuid::new_v4())))
    }

    async fn confirm_card_payment(
        &self,
        _client_secret: &ClientSecret,
        _billing: &BillingDetails,
    ) -> Result<ConfirmedPayment, ProcessorError> {
        self.confirms.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.confirm_error {
            return Err(ProcessorError::ConfirmationFailed(message.clone()));
        }

        Ok(ConfirmedPayment {
            payment_id: format!("pi_{}", Uuid::new_v4()),
        })
    }
}
