//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod seed;

pub use in_memory::InMemoryProductService;
#[cfg(feature = "postgres")]
pub use postgres::PostgresProductService;
