//! Checkout processing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use paperback_core::Price;

use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::models::{Cart, Order};
use crate::services::cart::CartStore;
use crate::services::pricing::calculate_totals;
use crate::storage::{Storage, StorageError, StorageExt, keys};

/// Errors that can occur while processing a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A required form field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The amount paid does not parse as a number.
    #[error("amount paid is not a valid number")]
    InvalidAmount,

    /// The amount paid is less than the total due.
    #[error("amount paid is less than the total cost")]
    InsufficientPayment,

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Raw checkout form input, as entered by the customer.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub city: String,
    /// Amount tendered, still a string; parsing is part of validation.
    pub amount_paid: String,
}

/// Validates checkout input, enforces payment sufficiency, and commits the
/// order.
pub struct CheckoutProcessor<'a, S: Storage> {
    storage: &'a S,
    pricing: PricingConfig,
}

impl<'a, S: Storage> CheckoutProcessor<'a, S> {
    /// Create a checkout processor over `storage` with the given pricing
    /// rules.
    #[must_use]
    pub const fn new(storage: &'a S, pricing: PricingConfig) -> Self {
        Self { storage, pricing }
    }

    /// Process a checkout for `cart`.
    ///
    /// Validation runs in order and stops at the first failure: required
    /// fields, then amount parsing, then payment sufficiency against the
    /// cart's totals. Callers must not offer checkout for an empty cart;
    /// that precondition is theirs, not re-checked here.
    ///
    /// On success the order is persisted as the last order (overwriting any
    /// prior one - only the most recent order is retained) and the stored
    /// cart is cleared. The two writes are sequenced order-first so a crash
    /// between them can leave a cleared-but-unrecorded cart behind, never a
    /// paid-for cart that silently comes back; there is no transaction
    /// spanning both.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] for validation failures, insufficient
    /// payment, or a storage failure.
    pub fn checkout(
        &self,
        cart: &Cart,
        form: &CheckoutForm,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<Order, CheckoutError> {
        let name = require(&form.name, "name")?;
        let address = require(&form.address, "address")?;
        let city = require(&form.city, "city")?;

        let amount_paid: Decimal = form
            .amount_paid
            .trim()
            .parse()
            .map_err(|_| CheckoutError::InvalidAmount)?;
        let amount_paid = Price::new(amount_paid);

        let totals = calculate_totals(cart, catalog, &self.pricing);
        if amount_paid < totals.total {
            return Err(CheckoutError::InsufficientPayment);
        }

        let order = Order {
            name,
            address,
            city,
            amount_paid,
            change: amount_paid - totals.total,
            cart: cart.clone(),
            totals,
            date: now,
        };

        self.storage.set(keys::LAST_ORDER, &order)?;
        CartStore::new(self.storage).clear()?;

        Ok(order)
    }

    /// Read the most recently committed order, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    pub fn last_order(&self) -> Result<Option<Order>, StorageError> {
        self.storage.get_or_default(keys::LAST_ORDER)
    }
}

/// Trim a field and reject it when empty.
fn require(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}
