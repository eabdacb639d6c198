//! Shared test harness for storage backend testing
//!
//! Provides builders for `ProductData` and the `product_service_tests!` macro
//! that checks a `ProductService` implementation against the full contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod product_service_tests;

use market::core::{Category, Product, ProductData};
use rust_decimal::Decimal;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Data builders
// ---------------------------------------------------------------------------

/// Parse a price literal such as `"399.99"`
pub fn price(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

/// Minimal valid product data
pub fn product_data(name: &str, category: Category, quantity: i32) -> ProductData {
    ProductData {
        name: name.to_string(),
        description: None,
        image: None,
        category,
        quantity,
        price: price("10.00"),
    }
}

/// Product data with a description, for search tests
pub fn described(name: &str, description: &str, quantity: i32) -> ProductData {
    ProductData {
        description: Some(description.to_string()),
        ..product_data(name, Category::Other, quantity)
    }
}

/// The worked example: a Ryzen 9 processor
pub fn ryzen() -> ProductData {
    ProductData {
        name: "Ryzen 9".to_string(),
        description: Some("Sixteen cores, AM5 socket".to_string()),
        image: Some("https://example.com/ryzen9.png".to_string()),
        category: Category::Cpu,
        quantity: 5,
        price: price("399.99"),
    }
}

/// `n` visible products named `Part 00`, `Part 01`, ...
pub fn numbered_batch(n: usize) -> Vec<ProductData> {
    (0..n)
        .map(|i| product_data(&format!("Part {:02}", i), Category::Other, 1))
        .collect()
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

pub fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

pub fn assert_same_data(product: &Product, expected: &ProductData) {
    assert_eq!(product.name, expected.name);
    assert_eq!(product.description, expected.description);
    assert_eq!(product.image, expected.image);
    assert_eq!(product.category, expected.category);
    assert_eq!(product.quantity, expected.quantity);
    assert_eq!(product.price, expected.price, "price of {}", expected.name);
}
