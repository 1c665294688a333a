//! Shared newtype wrappers.
//!
//! Each type here validates on construction so the rest of the workspace can
//! rely on the invariant instead of re-checking raw strings and integers.

mod id;
mod price;
mod trn;

pub use id::ProductId;
pub use price::Price;
pub use trn::{Trn, TrnError};
