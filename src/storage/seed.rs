//! Demo catalog for local development

use crate::core::{Category, Product, ProductData};
use rust_decimal::Decimal;

fn demo(
    name: &str,
    description: &str,
    category: Category,
    quantity: i32,
    price_cents: i64,
) -> Product {
    Product::new(ProductData {
        name: name.to_string(),
        description: Some(description.to_string()),
        image: None,
        category,
        quantity,
        price: Decimal::new(price_cents, 2),
    })
}

/// A handful of sample products covering every category
///
/// One of them is out of stock so the hidden-product behavior is visible too.
pub fn demo_products() -> Vec<Product> {
    vec![
        demo(
            "AMD Ryzen 9 7950X",
            "16 cores, 32 threads, AM5 socket.",
            Category::Cpu,
            5,
            39999,
        ),
        demo(
            "Intel Core i5-13600K",
            "14 cores, LGA1700 socket.",
            Category::Cpu,
            0,
            28999,
        ),
        demo(
            "NVIDIA GeForce RTX 4090",
            "24 GB GDDR6X graphics memory.",
            Category::Gpu,
            2,
            159999,
        ),
        demo(
            "Dell U2720Q",
            "27 inch 4K IPS monitor with USB-C.",
            Category::Monitor,
            7,
            49900,
        ),
        demo(
            "ASUS ROG Strix B650-E",
            "ATX motherboard for AM5 processors.",
            Category::Motherboard,
            3,
            27950,
        ),
        demo(
            "Noctua NH-D15",
            "Dual tower CPU cooler.",
            Category::Other,
            12,
            10990,
        ),
    ]
}
