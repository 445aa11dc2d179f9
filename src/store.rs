//! In-memory product store.
//!
//! An ordered `Vec` behind a [`parking_lot::RwLock`]. Requests run on a
//! multi-threaded runtime, so every read takes the read lock and every
//! mutation takes the write lock for its whole check-and-modify step. No lock
//! is held across an `.await`.

use parking_lot::RwLock;
use uuid::Uuid;

use crate::product::{MissingFields, Product, ProductFields, ProductInput, seed};

/// Process-lifetime product collection. Insertion order is preserved and ids
/// are unique.
#[derive(Debug, Default)]
pub struct Store {
    products: RwLock<Vec<Product>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the three seed products.
    pub fn seeded() -> Self {
        Self::with_products(seed())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }

    /// Snapshot of every product, in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.products.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.read().is_empty()
    }

    /// Appends a product under a freshly generated id.
    pub fn create(&self, fields: ProductFields) -> Product {
        let mut products = self.products.write();
        let id = loop {
            let id = Uuid::new_v4().to_string();
            if !products.iter().any(|p| p.id == id) {
                break id;
            }
        };
        let product = Product::new(id, fields);
        products.push(product.clone());
        product
    }

    /// Replaces the fields of product `id` in place.
    ///
    /// The lookup happens first: an unknown id is `Ok(None)` whatever the
    /// input. A known id with incomplete input is `Err(MissingFields)` and
    /// leaves the product untouched.
    pub fn update(&self, id: &str, input: ProductInput) -> Result<Option<Product>, MissingFields> {
        let mut products = self.products.write();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.apply(input.validate()?);
        Ok(Some(product.clone()))
    }

    /// Removes product `id`, returning it.
    pub fn remove(&self, id: &str) -> Option<Product> {
        let mut products = self.products.write();
        let index = products.iter().position(|p| p.id == id)?;
        Some(products.remove(index))
    }
}
