//! # Cart Store
//!
//! A shareable handle over the cart.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because the UI layer and the
//! checkout orchestrator both hold a handle to the same cart, and only
//! one of them may mutate it at a time. Every operation is synchronous
//! and runs to completion under the lock, so derived totals can never be
//! observed mid-mutation.
//!
//! There is deliberately no singleton here: construct a `CartStore` and
//! inject it wherever it is needed. That keeps sessions isolated and
//! tests hermetic.

use std::sync::{Arc, Mutex};

use souq_core::{
    Cart, CartLine, CartSummary, CartTotals, CoreResult, Discount, LineKey, Money, OrderLine,
};

/// Shareable, mutex-guarded cart handle.
///
/// Cloning the store clones the handle, not the cart: all clones observe
/// and mutate the same underlying state.
#[derive(Debug, Clone)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
}

impl CartStore {
    /// Creates a store around a new empty cart.
    pub fn new() -> Self {
        CartStore {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    // -------------------------------------------------------------------------
    // Lock Helpers
    // -------------------------------------------------------------------------

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let subtotal = store.with_cart(|cart| cart.subtotal());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    // -------------------------------------------------------------------------
    // Mutations (delegating to souq_core::Cart)
    // -------------------------------------------------------------------------

    /// Adds a line, merging by `LineKey`.
    pub fn add_line(&self, line: CartLine) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.add_line(line))
    }

    /// Sets a line's quantity; 0 or below removes it.
    pub fn update_quantity(&self, key: &LineKey, quantity: i64) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.update_quantity(key, quantity))
    }

    /// Removes a line if present.
    pub fn remove_line(&self, key: &LineKey) {
        self.with_cart_mut(|cart| cart.remove_line(key));
    }

    /// Empties the cart and resets the discount.
    pub fn clear(&self) {
        self.with_cart_mut(|cart| cart.clear());
    }

    /// Overwrites the active discount.
    pub fn set_discount(&self, discount: Discount) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.set_discount(discount))
    }

    /// Restores lines from the persistence collaborator at session start.
    pub fn load_lines(&self, lines: Vec<CartLine>) -> CoreResult<()> {
        self.with_cart_mut(|cart| cart.replace_lines(lines))
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.with_cart(|cart| cart.is_empty())
    }

    /// Quantity of a line, 0 if absent.
    pub fn quantity_of(&self, key: &LineKey) -> i64 {
        self.with_cart(|cart| cart.quantity_of(key))
    }

    /// Checks whether a line with this key exists.
    pub fn has_line(&self, key: &LineKey) -> bool {
        self.with_cart(|cart| cart.has_line(key))
    }

    /// The currently applied discount.
    pub fn discount(&self) -> Discount {
        self.with_cart(|cart| cart.discount)
    }

    /// Lightweight header (badge count, empty-state flags).
    pub fn summary(&self) -> CartSummary {
        self.with_cart(|cart| CartSummary::from(cart))
    }

    /// Full price breakdown with the given shipping/tax.
    pub fn totals(&self, shipping: Money, tax: Money) -> CartTotals {
        self.with_cart(|cart| CartTotals::compute(cart, shipping, tax))
    }

    /// Grand total with the given shipping/tax.
    pub fn total(&self, shipping: Money, tax: Money) -> Money {
        self.with_cart(|cart| cart.total(shipping, tax))
    }

    /// Order submission lines for the current cart contents.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.with_cart(|cart| cart.order_lines())
    }

    /// A deep copy of the current cart, for change detection in tests
    /// and for the persistence collaborator to observe new state.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(|cart| cart.clone())
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::product_line;

    #[test]
    fn test_clones_share_state() {
        let store = CartStore::new();
        let other = store.clone();

        store.add_line(product_line("p-1", 2, 999)).unwrap();
        assert_eq!(other.quantity_of(&LineKey::bare("p-1")), 2);
    }

    #[test]
    fn test_totals_passthrough() {
        let store = CartStore::new();
        store.add_line(product_line("p-1", 2, 5000)).unwrap();
        store.set_discount(Discount::Percentage(1000)).unwrap();

        let totals = store.totals(Money::zero(), Money::zero());
        assert_eq!(totals.subtotal_cents, 10000);
        assert_eq!(totals.total_cents, 9000);
    }

    #[test]
    fn test_summary_counts() {
        let store = CartStore::new();
        store.add_line(product_line("p-1", 2, 999)).unwrap();
        store.add_line(product_line("p-2", 1, 500)).unwrap();

        let summary = store.summary();
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.line_count, 2);
        assert!(summary.has_lines);
    }

    #[test]
    fn test_clear_resets_discount() {
        let store = CartStore::new();
        store.add_line(product_line("p-1", 1, 999)).unwrap();
        store.set_discount(Discount::Fixed(Money::from_cents(100))).unwrap();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.discount(), Discount::none());
    }
}
