//! In-memory implementation of ProductService for development and testing

use crate::core::{
    Category, Product, ProductData, ProductQuery, ProductService, StorageError,
};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory product service
///
/// Cloning shares the underlying map, so every clone sees the same products.
#[derive(Clone, Default)]
pub struct InMemoryProductService {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductService {
    /// Create an empty service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service pre-loaded with products
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            products: Arc::new(RwLock::new(map)),
        }
    }

    async fn matching(&self, query: &ProductQuery) -> Vec<Product> {
        let products = self.products.read().await;
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        matching.sort_by(ProductQuery::compare);
        matching
    }
}

#[async_trait]
impl ProductService for InMemoryProductService {
    async fn create(&self, data: ProductData) -> Result<Product, StorageError> {
        let product = Product::new(data);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());

        Ok(product)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Product>, StorageError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn update(&self, id: &Uuid, data: ProductData) -> Result<Option<Product>, StorageError> {
        let mut products = self.products.write().await;

        Ok(products.get_mut(id).map(|product| {
            product.apply(data);
            product.clone()
        }))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError> {
        Ok(self.products.write().await.remove(id).is_some())
    }

    async fn count(&self, query: &ProductQuery) -> Result<usize, StorageError> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| query.matches(p)).count())
    }

    async fn find(
        &self,
        query: &ProductQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Product>, StorageError> {
        Ok(self
            .matching(query)
            .await
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn categories_in_stock(&self) -> Result<Vec<Category>, StorageError> {
        let products = self.products.read().await;
        let in_stock: BTreeSet<Category> = products
            .values()
            .filter(|p| p.is_visible())
            .map(|p| p.category)
            .collect();

        Ok(in_stock.into_iter().collect())
    }
}
