//! Order and totals types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paperback_core::Price;

use super::Cart;

/// The breakdown the pricing engine produces for a cart.
///
/// Derived data: totals are never persisted on their own, only as part of
/// an [`Order`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of unit price times quantity over all cart lines.
    pub sub_total: Price,
    /// Discount applied to the subtotal (zero unless over the threshold).
    pub discount: Price,
    /// Tax on the post-discount amount.
    pub tax: Price,
    /// Amount due: taxable amount plus tax.
    pub total: Price,
}

impl Totals {
    /// The subtotal after discount - the base on which tax is computed.
    #[must_use]
    pub fn taxable(&self) -> Price {
        self.sub_total - self.discount
    }
}

/// A completed checkout.
///
/// Only the most recent order is retained; each checkout overwrites the
/// previous one under the `lastOrder` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Customer name as entered on the checkout form.
    pub name: String,
    /// Shipping street address.
    pub address: String,
    /// Shipping city.
    pub city: String,
    /// What the customer handed over.
    pub amount_paid: Price,
    /// `amount_paid` minus the total. Never negative.
    pub change: Price,
    /// Snapshot of the cart at the moment of checkout.
    pub cart: Cart,
    /// The totals the payment was validated against.
    pub totals: Totals,
    /// When the order was placed.
    pub date: DateTime<Utc>,
}
