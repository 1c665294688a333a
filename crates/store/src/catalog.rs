//! The product catalog.

use paperback_core::{Price, ProductId};

use crate::models::Product;

/// The static product catalog.
///
/// Immutable at runtime. Services look products up by ID; lines referencing
/// an unknown ID are skipped rather than rejected, so a stale cart survives
/// a catalog change.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in sixteen-book catalog the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            book(1, "Maze Runner - James Dashner", 210, "maze runner.jpg"),
            book(2, "All Systems Red - Martha Wells", 230, "all systems red.jpg"),
            book(3, "The Love Hypothesis - Ali Hazelwood", 350, "love hypothesis.jpg"),
            book(4, "Fourth Wing - Rebecca Yarros", 300, "fourth wing.jpg"),
            book(5, "Star Wars: Heir to the Empire - Timothy Zahn", 215, "star wars.jpeg"),
            book(6, "Surviving to Drive - Guenther Steiner", 500, "f1 drive.jpg"),
            book(7, "The Sun is also a Star - Nicola Yoon", 480, "sun is also.jpeg"),
            book(8, "Lord of the Flies - William Golding", 520, "lord of the flies.jpeg"),
            book(9, "Hunger Games - Suzanne Collins", 600, "hunger games.jpg"),
            book(10, "The Fault in Our Stars - John Green", 640, "fault in.jpg"),
            book(11, "Scythe - Neal Shusterman", 590, "scythe.jpg"),
            book(12, "You Should See Me in Crown - Leah Johnson", 450, "you should.jpg"),
            book(13, "Red Queen - Victoria Aveyard", 420, "red queen.jpg"),
            book(14, "The Lightening Theif - Rick Riordan", 550, "pery jackson.jpg"),
            book(15, "Bride - Ali Hazelwood", 620, "bride.jpg"),
            book(16, "Love on the Brain - Ali Hazelwood", 480, "love on brain.jpg"),
        ])
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Iterate over all products in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

fn book(id: i32, name: &str, price: i64, image: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::from(price),
        image: image.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_sixteen_books() {
        assert_eq!(Catalog::builtin().len(), 16);
    }

    #[test]
    fn test_get_known_id() {
        let catalog = Catalog::builtin();
        let product = catalog.get(ProductId::new(1)).unwrap();
        assert_eq!(product.name, "Maze Runner - James Dashner");
        assert_eq!(product.price, Price::from(210));
    }

    #[test]
    fn test_get_unknown_id() {
        assert!(Catalog::builtin().get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<i32> = catalog.iter().map(|p| p.id.as_i32()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
