//! # Coupon Resolver
//!
//! Resolves a shopper-entered coupon code into a discount descriptor via
//! the remote coupon catalog.
//!
//! The resolver never touches cart state: on success the orchestrator
//! pushes the descriptor into the cart; on any failure the cart's
//! discount state is left exactly as it was (no partial application).

use tracing::{debug, warn};

use souq_core::{validation::validate_coupon_code, DiscountDescriptor};

use crate::error::CouponError;
use crate::services::CouponService;

/// Wraps a [`CouponService`] with local validation.
#[derive(Debug, Clone)]
pub struct CouponResolver<C> {
    service: C,
}

impl<C: CouponService> CouponResolver<C> {
    pub fn new(service: C) -> Self {
        CouponResolver { service }
    }

    /// Resolves a coupon code for a shopper.
    ///
    /// The code is trimmed and format-checked locally before the network
    /// round-trip, so garbage input never reaches the catalog. Lookup
    /// failures come back typed (not found / expired / usage limit) so
    /// the UI can phrase each one next to the coupon input.
    pub async fn resolve(
        &self,
        code: &str,
        user_id: &str,
    ) -> Result<DiscountDescriptor, CouponError> {
        validate_coupon_code(code)?;
        let code = code.trim();

        debug!(code = %code, "resolving coupon");
        match self.service.get(code, user_id).await {
            Ok(descriptor) => {
                debug!(code = %code, "coupon resolved");
                Ok(descriptor)
            }
            Err(err) => {
                warn!(code = %code, error = %err, "coupon resolution failed");
                Err(err)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
