//! The pricing engine.

use rust_decimal::Decimal;

use paperback_core::Price;

use crate::catalog::Catalog;
use crate::config::PricingConfig;
use crate::models::{Cart, Totals};

/// Compute the totals breakdown for a cart.
///
/// - `sub_total`: unit price times quantity, summed over the cart. Lines
///   referencing an unknown product ID contribute nothing.
/// - `discount`: `sub_total * discount_rate`, applied only when the
///   subtotal is strictly greater than the threshold. A subtotal exactly
///   on the threshold gets no discount.
/// - `tax`: `tax_rate` on the post-discount (taxable) amount.
/// - `total`: taxable amount plus tax.
///
/// Pure and deterministic; there are no error conditions.
#[must_use]
pub fn calculate_totals(cart: &Cart, catalog: &Catalog, config: &PricingConfig) -> Totals {
    let sub_total: Price = cart
        .into_iter()
        .filter_map(|item| {
            catalog
                .get(item.product_id)
                .map(|product| product.price * Decimal::from(item.quantity))
        })
        .sum();

    let discount = if sub_total > config.discount_threshold {
        sub_total * config.discount_rate
    } else {
        Price::ZERO
    };

    let taxable = sub_total - discount;
    let tax = taxable * config.tax_rate;

    Totals {
        sub_total,
        discount,
        tax,
        total: taxable + tax,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use paperback_core::ProductId;

    fn cart_of(entries: &[(i32, u32)]) -> Cart {
        let mut cart = Cart::new();
        for &(id, quantity) in entries {
            for _ in 0..quantity {
                cart.add(ProductId::new(id));
            }
        }
        cart
    }

    fn totals(entries: &[(i32, u32)]) -> Totals {
        calculate_totals(
            &cart_of(entries),
            &Catalog::builtin(),
            &PricingConfig::default(),
        )
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let t = totals(&[]);
        assert_eq!(t.sub_total, Price::ZERO);
        assert_eq!(t.discount, Price::ZERO);
        assert_eq!(t.tax, Price::ZERO);
        assert_eq!(t.total, Price::ZERO);
    }

    #[test]
    fn test_maze_runner_times_two() {
        // 2 x 210 = 420 > 300, so the discount kicks in
        let t = totals(&[(1, 2)]);
        assert_eq!(t.sub_total, Price::from(420));
        assert_eq!(t.discount, Price::from(42));
        assert_eq!(t.taxable(), Price::from(378));
        assert_eq!(t.tax, Price::new(Decimal::new(5670, 2))); // 56.70
        assert_eq!(t.total, Price::new(Decimal::new(43470, 2))); // 434.70
    }

    #[test]
    fn test_subtotal_exactly_on_threshold_gets_no_discount() {
        // Fourth Wing is exactly 300
        let t = totals(&[(4, 1)]);
        assert_eq!(t.sub_total, Price::from(300));
        assert_eq!(t.discount, Price::ZERO);
        assert_eq!(t.tax, Price::from(45));
        assert_eq!(t.total, Price::from(345));
    }

    #[test]
    fn test_subtotal_just_over_threshold_gets_discount() {
        let catalog = Catalog::builtin();
        let cart = cart_of(&[(1, 1)]);
        let config = PricingConfig {
            discount_threshold: Price::new(Decimal::new(20999, 2)), // 209.99
            ..PricingConfig::default()
        };

        let t = calculate_totals(&cart, &catalog, &config);
        assert!(t.discount > Price::ZERO);
        assert_eq!(t.discount, Price::from(21));
    }

    #[test]
    fn test_unknown_product_id_contributes_nothing() {
        let t = totals(&[(99, 3), (1, 1)]);
        assert_eq!(t.sub_total, Price::from(210));
    }

    #[test]
    fn test_totals_algebra_holds() {
        for entries in [&[(1, 2), (9, 1)][..], &[(4, 1)][..], &[(16, 5)][..]] {
            let t = totals(entries);
            assert_eq!(t.total, t.taxable() + t.tax);
            assert_eq!(
                t.tax,
                t.taxable() * PricingConfig::default().tax_rate
            );
        }
    }
}
