//! Core module containing the domain types and traits of the catalog

pub mod category;
pub mod error;
pub mod product;
pub mod query;
pub mod search;
pub mod service;
pub mod validation;

pub use category::{Category, CategoryChoice};
pub use error::{ConfigError, MarketError, StorageError};
pub use product::{Product, ProductData};
pub use query::{PAGE_SIZE, Page, PageNumber, PaginationMeta};
pub use search::{ProductQuery, SearchForm};
pub use service::ProductService;
pub use validation::{FormErrors, ProductForm};
