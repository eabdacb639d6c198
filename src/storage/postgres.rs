//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresProductService`, a [`ProductService`] backed by a
//! `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! market-rs = { version = "0.1", features = ["postgres"] }
//! ```

use crate::core::{
    Category, Product, ProductData, ProductQuery, ProductService, StorageError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// Shared filter for listing queries.
///
/// `$1` is the category code or NULL, `$2` the search term or NULL.
const LISTING_FILTER: &str = "quantity > 0 \
     AND ($1::text IS NULL OR category = $1) \
     AND ($2::text IS NULL \
          OR strpos(lower(name), lower($2)) > 0 \
          OR strpos(lower(coalesce(description, '')), lower($2)) > 0)";

const COLUMNS: &str =
    "id, name, description, image, category, quantity, price, created_at, updated_at";

/// Product storage service backed by PostgreSQL.
///
/// Stores products in the `products` table created by the bundled migrations.
#[derive(Clone, Debug)]
pub struct PostgresProductService {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    image: Option<String>,
    category: String,
    quantity: i32,
    price: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = StorageError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row.category.parse::<Category>().map_err(|e| {
            StorageError::CorruptRow {
                id: row.id,
                message: e.to_string(),
            }
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            image: row.image,
            category,
            quantity: row.quantity,
            price: row.price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl PostgresProductService {
    /// Create a new `PostgresProductService` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool to `url`
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StorageError::Connection {
                backend: "PostgreSQL".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductService for PostgresProductService {
    async fn create(&self, data: ProductData) -> Result<Product, StorageError> {
        let product = Product::new(data);

        sqlx::query(
            "INSERT INTO products (id, name, description, image, category, quantity, price, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.category.code())
        .bind(product.quantity)
        .bind(product.price)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Product>, StorageError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn update(&self, id: &Uuid, data: ProductData) -> Result<Option<Product>, StorageError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products \
             SET name = $2, description = $3, image = $4, category = $5, \
                 quantity = $6, price = $7, updated_at = $8 \
             WHERE id = $1 \
             RETURNING {}",
            COLUMNS
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.image)
        .bind(data.category.code())
        .bind(data.quantity)
        .bind(data.price)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, query: &ProductQuery) -> Result<usize, StorageError> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM products WHERE {}",
            LISTING_FILTER
        ))
        .bind(query.category.map(Category::code))
        .bind(query.term.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn find(
        &self,
        query: &ProductQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Product>, StorageError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE {} \
             ORDER BY name COLLATE \"C\", id \
             LIMIT $3 OFFSET $4",
            COLUMNS, LISTING_FILTER
        ))
        .bind(query.category.map(Category::code))
        .bind(query.term.as_deref())
        .bind(to_i64(limit))
        .bind(to_i64(offset))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn categories_in_stock(&self) -> Result<Vec<Category>, StorageError> {
        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            "SELECT DISTINCT ON (category) id, category FROM products \
             WHERE quantity > 0 ORDER BY category, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut categories = rows
            .into_iter()
            .map(|(id, code)| {
                code.parse::<Category>()
                    .map_err(|e| StorageError::CorruptRow {
                        id,
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        categories.sort();

        Ok(categories)
    }
}
