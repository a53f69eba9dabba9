//! # Collaborator Traits
//!
//! The checkout flow talks to the outside world only through these
//! traits. The host application supplies implementations backed by its
//! REST endpoints; tests supply in-memory stubs.
//!
//! All traits are object-safe (`async_trait`) so hosts can mix static
//! and dynamic dispatch as they see fit.

use async_trait::async_trait;

use souq_core::{Address, DiscountDescriptor, Order, OrderRequest};

use crate::error::{CouponError, ServiceError};

// =============================================================================
// Order Service
// =============================================================================

/// Creates orders in the order backend.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Submits an order. The request already carries the confirmed
    /// payment id on the card path.
    async fn create(&self, request: &OrderRequest) -> Result<Order, ServiceError>;
}

// =============================================================================
// Coupon Service
// =============================================================================

/// Looks up coupon codes against the remote coupon catalog.
///
/// Lookups are keyed by `(code, user_id)`: the catalog enforces per-user
/// usage limits and active/date-window rules and reports them as typed
/// failures.
#[async_trait]
pub trait CouponService: Send + Sync {
    async fn get(&self, code: &str, user_id: &str) -> Result<DiscountDescriptor, CouponError>;
}

// =============================================================================
// Address Service
// =============================================================================

/// A new or updated address payload.
#[derive(Debug, Clone)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub address_type: souq_core::AddressType,
    pub is_default: bool,
}

/// The shopper's address book.
#[async_trait]
pub trait AddressService: Send + Sync {
    async fn list(&self, user_id: &str) -> Result<Vec<Address>, ServiceError>;

    async fn create(&self, user_id: &str, input: AddressInput) -> Result<Address, ServiceError>;

    async fn update(
        &self,
        user_id: &str,
        address_id: &str,
        input: AddressInput,
    ) -> Result<Address, ServiceError>;

    async fn delete(&self, user_id: &str, address_id: &str) -> Result<(), ServiceError>;
}
