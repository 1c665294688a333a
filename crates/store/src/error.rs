//! Unified error handling.
//!
//! Each service has its own error enum; `StoreError` aggregates them so a
//! shell can hold one error type across a whole interaction. Every variant
//! is recoverable and carries a user-presentable message - validation
//! failures are values, never panics.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::registry::RegistrationError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Checkout validation or processing failed.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// Registration validation failed.
    #[error("{0}")]
    Registration(#[from] RegistrationError),

    /// Login failed.
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
