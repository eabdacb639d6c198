//! # Market
//!
//! A small server-rendered catalog of computer hardware parts.
//!
//! ## Features
//!
//! - **Catalog browsing**: visible products (in stock) listed by name, ten per page
//! - **Search**: case-insensitive match on name or description
//! - **Categories**: a fixed set of hardware classes with their own listings
//! - **CRUD pages**: create, update and delete products through HTML forms
//! - **Validation**: per-field messages, the submitted input is shown back
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use market::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_product_service(InMemoryProductService::with_products(demo_products()))
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        Category, CategoryChoice, Product, ProductData, ProductQuery, SearchForm,
    };

    // === Forms & Pagination ===
    pub use crate::core::{FormErrors, PAGE_SIZE, Page, PageNumber, PaginationMeta, ProductForm};

    // === Service ===
    pub use crate::core::ProductService;

    // === Errors ===
    pub use crate::core::{ConfigError, MarketError, StorageError};

    // === Storage ===
    pub use crate::storage::InMemoryProductService;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresProductService;
    pub use crate::storage::seed::demo_products;

    // === Configuration ===
    pub use crate::config::{AppConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};
}
