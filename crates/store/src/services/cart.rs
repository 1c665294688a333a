//! The persisted shopping cart.

use paperback_core::ProductId;

use crate::models::Cart;
use crate::storage::{Storage, StorageError, StorageExt, keys};

/// Storage-backed cart operations.
///
/// Borrows the storage handle so one store can back every service.
pub struct CartStore<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> CartStore<'a, S> {
    /// Create a cart store over `storage`.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Read the active cart. Absent or malformed storage yields an empty
    /// cart, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    pub fn get(&self) -> Result<Cart, StorageError> {
        self.storage.get_or_default(keys::CART)
    }

    /// Persist `cart`, replacing the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cart cannot be written.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        self.storage.set(keys::CART, cart)
    }

    /// Delete the stored cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::CART)
    }

    /// Add one unit of `product_id` to the stored cart and persist it.
    ///
    /// Returns the line's new quantity; the caller decides how to tell the
    /// shopper (there is no blocking alert in the core).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the cart cannot be read or written.
    pub fn add_item(&self, product_id: ProductId) -> Result<u32, StorageError> {
        let mut cart = self.get()?;
        let quantity = cart.add(product_id);
        self.save(&cart)?;
        Ok(quantity)
    }
}
