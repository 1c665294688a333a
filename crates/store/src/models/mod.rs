//! Domain models for the storefront.
//!
//! Persisted types serialize with the camelCase field names the storefront
//! has always written (`productId`, `subTotal`, `lockTime`, ...), so an
//! existing data file stays readable.

mod cart;
mod lockout;
mod order;
mod product;
mod user;

pub use cart::{Cart, CartItem};
pub use lockout::{FailureOutcome, Gate, LockState, LockoutRecord};
pub use order::{Order, Totals};
pub use product::Product;
pub use user::User;
