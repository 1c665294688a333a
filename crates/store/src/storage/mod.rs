//! Key-value persistence for the storefront.
//!
//! The storefront keeps all of its state in a single string-keyed store of
//! JSON values, the way a browser build would use `localStorage`. The
//! [`Storage`] trait abstracts that store so services can be wired to a
//! [`FileStorage`] in the shell and a [`MemoryStorage`] in tests without
//! touching component logic.
//!
//! There are no transactional guarantees: each `set`/`remove` is an
//! independent write, and two logically concurrent writers race with
//! last-writer-wins semantics. That is an accepted property of the storage
//! model, not something the services try to repair.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys for persisted records.
pub mod keys {
    /// Key for the active shopping cart.
    pub const CART: &str = "cart";

    /// Key for the registered user collection.
    pub const USERS: &str = "users";

    /// Key for the most recent completed order.
    pub const LAST_ORDER: &str = "lastOrder";

    /// Key for the per-username login lockout records.
    pub const LOGIN_LOCKOUT: &str = "loginLockout";

    /// Key for the currently authenticated user.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (file store only).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for writing.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string-keyed JSON value store.
///
/// Methods take `&self`; implementations use interior mutability so one
/// store handle can be shared by every service.
pub trait Storage {
    /// Read the raw JSON value at `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    fn get_raw(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Write the raw JSON value at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be written.
    fn set_raw(&self, key: &str, value: serde_json::Value) -> Result<(), StorageError>;

    /// Delete the value at `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed convenience methods over [`Storage`].
pub trait StorageExt: Storage {
    /// Read and deserialize the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if the stored value does not
    /// match the expected shape, or [`StorageError::Io`] on read failure.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_raw(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Read the value at `key`, falling back to `T::default()` when the key
    /// is absent or the stored value is malformed.
    ///
    /// Malformed content is logged and treated as absent. Reads have always
    /// been permissive here: a corrupt record degrades to the empty value
    /// instead of wedging the storefront.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StorageError> {
        match self.get_raw(key)? {
            Some(value) => match serde_json::from_value(value) {
                Ok(parsed) => Ok(parsed),
                Err(err) => {
                    tracing::warn!(key, %err, "malformed record in storage, using default");
                    Ok(T::default())
                }
            },
            None => Ok(T::default()),
        }
    }

    /// Serialize and write `value` at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if the value cannot be
    /// serialized, or [`StorageError::Io`] on write failure.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        self.set_raw(key, serde_json::to_value(value)?)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}
