//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `pricing` - Cart totals (subtotal, discount, tax, total)
//! - `cart` - The persisted shopping cart
//! - `checkout` - Form validation, payment check, order creation
//! - `registry` - Account registration and its validation rules
//! - `lockout` - Failed-attempt tracking and timed account locking
//! - `auth` - Login, logout, and the current-user session slot

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod lockout;
pub mod pricing;
pub mod registry;

pub use auth::{AuthError, AuthSession};
pub use cart::CartStore;
pub use checkout::{CheckoutError, CheckoutForm, CheckoutProcessor};
pub use lockout::LockoutPolicy;
pub use pricing::calculate_totals;
pub use registry::{RegistrationError, RegistrationForm, UserRegistry};
