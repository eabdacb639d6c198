//! Service trait for product storage

use crate::core::category::Category;
use crate::core::error::{MarketError, StorageError};
use crate::core::product::{Product, ProductData};
use crate::core::query::{Page, PageNumber, PaginationMeta};
use crate::core::search::ProductQuery;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing products
///
/// Implementations provide CRUD operations plus the listing queries. The
/// handlers are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Store a new product built from validated data
    async fn create(&self, data: ProductData) -> Result<Product, StorageError>;

    /// Get a product by ID, visible or not
    async fn get(&self, id: &Uuid) -> Result<Option<Product>, StorageError>;

    /// Replace every user field of an existing product
    ///
    /// Returns `None` when no product has this ID.
    async fn update(&self, id: &Uuid, data: ProductData) -> Result<Option<Product>, StorageError>;

    /// Delete a product; returns whether it existed
    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError>;

    /// Number of products matching a query
    async fn count(&self, query: &ProductQuery) -> Result<usize, StorageError>;

    /// Products matching a query, in listing order, from `offset`, at most `limit`
    async fn find(
        &self,
        query: &ProductQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Product>, StorageError>;

    /// Categories having at least one visible product, in catalog order
    async fn categories_in_stock(&self) -> Result<Vec<Category>, StorageError>;

    /// One listing page for a query
    ///
    /// Fails with [`MarketError::Page`] when the page does not exist.
    async fn search(
        &self,
        query: &ProductQuery,
        page: PageNumber,
        per_page: usize,
    ) -> Result<Page<Product>, MarketError> {
        let total = self.count(query).await?;
        let page = page.resolve(total, per_page)?;
        let pagination = PaginationMeta::new(page, per_page, total);
        let items = self
            .find(query, pagination.offset(), pagination.per_page)
            .await?;

        Ok(Page { items, pagination })
    }
}
