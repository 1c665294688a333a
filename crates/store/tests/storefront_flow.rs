//! End-to-end flows over a shared in-memory store: register, get locked
//! out, wait out the window, log in, shop, and check out.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;

use paperback_core::{Price, ProductId};
use paperback_store::catalog::Catalog;
use paperback_store::config::{LockoutConfig, PricingConfig};
use paperback_store::services::{
    AuthError, AuthSession, CartStore, CheckoutError, CheckoutForm, CheckoutProcessor,
    RegistrationError, RegistrationForm, UserRegistry, calculate_totals,
};
use paperback_store::storage::{MemoryStorage, Storage, keys};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

fn today() -> NaiveDate {
    t0().date_naive()
}

fn registration(trn: &str) -> RegistrationForm {
    RegistrationForm {
        first_name: "Amara".to_string(),
        last_name: "Chen".to_string(),
        dob: "1990-03-14".to_string(),
        email: "amara@example.com".to_string(),
        trn: trn.to_string(),
        password: "hunter2!".to_string(),
        confirm_password: "hunter2!".to_string(),
    }
}

#[test]
fn register_lock_expire_login_shop_checkout() {
    let storage = MemoryStorage::new();
    let catalog = Catalog::builtin();

    // Register
    let registry = UserRegistry::new(&storage);
    let user = registry.register(&registration("987654321"), today()).unwrap();
    assert_eq!(user.username.as_str(), "987654321");

    // Three bad passwords lock the account
    let session = AuthSession::new(&storage, LockoutConfig::default());
    for _ in 0..2 {
        let err = session.login("987654321", "wrong", t0()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials { .. }));
    }
    let err = session.login("987654321", "wrong", t0()).unwrap_err();
    assert!(matches!(err, AuthError::AccountLocked { .. }));

    // Even the right password is rejected inside the window
    let inside = t0() + TimeDelta::minutes(10);
    let err = session.login("987654321", "hunter2!", inside).unwrap_err();
    assert!(matches!(err, AuthError::AccountLocked {
        remaining_minutes: 5
    }));

    // After the window the same attempt goes through
    let after = t0() + TimeDelta::minutes(16);
    session.login("987654321", "hunter2!", after).unwrap();
    assert!(session.current_user().unwrap().is_some());

    // Shop: two Maze Runners and one Hunger Games
    let cart_store = CartStore::new(&storage);
    cart_store.add_item(ProductId::new(1)).unwrap();
    cart_store.add_item(ProductId::new(1)).unwrap();
    cart_store.add_item(ProductId::new(9)).unwrap();

    let cart = cart_store.get().unwrap();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.total_quantity(), 3);

    // 2*210 + 600 = 1020; 10% off; 15% tax on 918 -> 1055.70
    let totals = calculate_totals(&cart, &catalog, &PricingConfig::default());
    assert_eq!(totals.sub_total, Price::from(1020));
    assert_eq!(totals.total, Price::new(Decimal::new(105_570, 2)));

    // Check out
    let processor = CheckoutProcessor::new(&storage, PricingConfig::default());
    let form = CheckoutForm {
        name: "Amara Chen".to_string(),
        address: "12 Harbour St".to_string(),
        city: "Kingston".to_string(),
        amount_paid: "1100".to_string(),
    };
    let order = processor.checkout(&cart, &form, &catalog, after).unwrap();
    assert_eq!(order.change, Price::new(Decimal::new(4430, 2))); // 44.30

    // The committing side effects: order persisted, cart cleared
    assert!(processor.last_order().unwrap().is_some());
    assert!(cart_store.get().unwrap().is_empty());
}

#[test]
fn duplicate_trn_is_rejected_on_second_registration() {
    let storage = MemoryStorage::new();
    let registry = UserRegistry::new(&storage);

    registry.register(&registration("987654321"), today()).unwrap();

    let mut second = registration("987654321");
    second.email = "other@example.com".to_string();
    let err = registry.register(&second, today()).unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateTrn));
}

#[test]
fn checkout_rejects_underpayment_and_leaves_cart_alone() {
    let storage = MemoryStorage::new();
    let catalog = Catalog::builtin();

    let cart_store = CartStore::new(&storage);
    cart_store.add_item(ProductId::new(4)).unwrap(); // 300, no discount, total 345

    let processor = CheckoutProcessor::new(&storage, PricingConfig::default());
    let form = CheckoutForm {
        name: "A".to_string(),
        address: "B".to_string(),
        city: "C".to_string(),
        amount_paid: "344.99".to_string(),
    };
    let err = processor
        .checkout(&cart_store.get().unwrap(), &form, &catalog, t0())
        .unwrap_err();
    assert!(matches!(err, CheckoutError::InsufficientPayment));

    // Nothing committed
    assert!(processor.last_order().unwrap().is_none());
    assert!(!cart_store.get().unwrap().is_empty());
}

#[test]
fn persisted_shapes_match_the_historical_data_file() {
    let storage = MemoryStorage::new();

    UserRegistry::new(&storage)
        .register(&registration("987654321"), today())
        .unwrap();
    CartStore::new(&storage)
        .add_item(ProductId::new(1))
        .unwrap();

    let users = storage.get_raw(keys::USERS).unwrap().unwrap();
    let first = &users[0];
    assert_eq!(first["fullName"], "Amara Chen");
    assert_eq!(first["trn"], "987654321");
    assert_eq!(first["username"], "987654321");

    let cart = storage.get_raw(keys::CART).unwrap().unwrap();
    assert_eq!(cart[0]["productId"], 1);
    assert_eq!(cart[0]["quantity"], 1);
}

#[test]
fn lockout_survives_a_restart_of_the_services() {
    let storage = MemoryStorage::new();

    {
        let session = AuthSession::new(&storage, LockoutConfig::default());
        for _ in 0..3 {
            let _ = session.login("555666777", "nope", t0());
        }
    }

    // Fresh service handles over the same storage still see the lock
    let session = AuthSession::new(&storage, LockoutConfig::default());
    let err = session.login("555666777", "nope", t0()).unwrap_err();
    assert!(matches!(err, AuthError::AccountLocked { .. }));
}
