//! Product catalog entry.

use serde::{Deserialize, Serialize};

use paperback_core::{Price, ProductId};

/// A product in the static catalog.
///
/// The catalog is immutable at runtime; `image` is a presentation-layer
/// reference the core carries through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name, including the author.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image reference for the presentation layer.
    pub image: String,
}
