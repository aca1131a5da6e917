use std::sync::Arc;

use shared_storage::{DocumentStore, StorageError};

use crate::models::Product;

pub const PRODUCTS_DOC: &str = "products";

/// Read-only view of the product catalog, just enough to resolve a booking
/// request's schedule policy. Catalog editing is a separate surface.
#[derive(Clone)]
pub struct ProductCatalog {
    store: Arc<DocumentStore>,
}

impl ProductCatalog {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Product>, StorageError> {
        self.store.read(PRODUCTS_DOC).await
    }

    pub async fn get(&self, product_id: &str) -> Result<Option<Product>, StorageError> {
        let products: Vec<Product> = self.store.read(PRODUCTS_DOC).await?;
        Ok(products.into_iter().find(|p| p.id == product_id))
    }
}
