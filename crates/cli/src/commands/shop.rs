//! Catalog, cart, checkout, and invoice commands.

use chrono::Utc;
use rust_decimal::Decimal;

use paperback_core::ProductId;
use paperback_store::StoreError;
use paperback_store::catalog::Catalog;
use paperback_store::config::PricingConfig;
use paperback_store::models::{Cart, Order, Totals};
use paperback_store::services::{CartStore, CheckoutForm, CheckoutProcessor, calculate_totals};
use paperback_store::storage::Storage;

/// Print the full catalog.
#[allow(clippy::print_stdout)]
pub fn catalog(catalog: &Catalog) {
    println!("{:<4} {:<50} {:>10}", "ID", "Title", "Price");
    for product in catalog {
        println!(
            "{:<4} {:<50} {:>10}",
            product.id.as_i32(),
            product.name,
            product.price.display()
        );
    }
}

/// Add one unit of `product_id` to the stored cart.
#[allow(clippy::print_stdout)]
pub fn cart_add<S: Storage>(
    storage: &S,
    catalog: &Catalog,
    product_id: i32,
) -> Result<(), StoreError> {
    let id = ProductId::new(product_id);
    let Some(product) = catalog.get(id) else {
        println!("No product with ID {product_id}.");
        return Ok(());
    };

    let quantity = CartStore::new(storage).add_item(id)?;
    println!("Added {} (x{quantity} in cart).", product.name);
    Ok(())
}

/// Print the stored cart with its totals.
#[allow(clippy::print_stdout)]
pub fn cart_show<S: Storage>(
    storage: &S,
    catalog: &Catalog,
    pricing: PricingConfig,
) -> Result<(), StoreError> {
    let cart = CartStore::new(storage).get()?;
    if cart.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    print_lines(&cart, catalog);
    print_totals(&calculate_totals(&cart, catalog, &pricing));
    Ok(())
}

/// Empty the stored cart.
#[allow(clippy::print_stdout)]
pub fn cart_clear<S: Storage>(storage: &S) -> Result<(), StoreError> {
    CartStore::new(storage).clear()?;
    println!("Cart cleared.");
    Ok(())
}

/// Check out the stored cart.
#[allow(clippy::print_stdout)]
pub fn checkout<S: Storage>(
    storage: &S,
    catalog: &Catalog,
    pricing: PricingConfig,
    name: String,
    address: String,
    city: String,
    amount: String,
) -> Result<(), StoreError> {
    let cart = CartStore::new(storage).get()?;
    if cart.is_empty() {
        println!("Your cart is empty; nothing to check out.");
        return Ok(());
    }

    let form = CheckoutForm {
        name,
        address,
        city,
        amount_paid: amount,
    };
    let order = CheckoutProcessor::new(storage, pricing).checkout(&cart, &form, catalog, Utc::now())?;

    println!("Order placed. Thank you, {}!", order.name);
    println!(
        "Paid {}, change {}.",
        order.amount_paid.display(),
        order.change.display()
    );
    Ok(())
}

/// Print the invoice for the most recent order.
#[allow(clippy::print_stdout)]
pub fn invoice<S: Storage>(
    storage: &S,
    catalog: &Catalog,
    pricing: PricingConfig,
) -> Result<(), StoreError> {
    let Some(order) = CheckoutProcessor::new(storage, pricing).last_order()? else {
        println!("No orders yet.");
        return Ok(());
    };

    print_invoice(&order, catalog);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_invoice(order: &Order, catalog: &Catalog) {
    println!("Invoice for {}", order.name);
    println!("{}, {}", order.address, order.city);
    println!("Placed {}", order.date.format("%Y-%m-%d %H:%M UTC"));
    println!();
    print_lines(&order.cart, catalog);
    print_totals(&order.totals);
    println!("{:<12} {:>10}", "Paid", order.amount_paid.display());
    println!("{:<12} {:>10}", "Change", order.change.display());
}

#[allow(clippy::print_stdout)]
fn print_lines(cart: &Cart, catalog: &Catalog) {
    for item in cart {
        // Lines for products no longer in the catalog print by ID; the
        // pricing engine skips them the same way.
        match catalog.get(item.product_id) {
            Some(product) => println!(
                "{:>3} x {:<46} {:>10}",
                item.quantity,
                product.name,
                (product.price * Decimal::from(item.quantity)).display()
            ),
            None => println!(
                "{:>3} x {:<46} {:>10}",
                item.quantity,
                format!("(unknown product {})", item.product_id),
                "-"
            ),
        }
    }
    println!();
}

#[allow(clippy::print_stdout)]
fn print_totals(totals: &Totals) {
    println!("{:<12} {:>10}", "Subtotal", totals.sub_total.display());
    println!("{:<12} {:>10}", "Discount", totals.discount.display());
    println!("{:<12} {:>10}", "Tax", totals.tax.display());
    println!("{:<12} {:>10}", "Total", totals.total.display());
}
