//! The product record and its validated write payload

use crate::core::category::Category;
use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable hardware part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// System-assigned identifier, never changes after creation
    pub id: Uuid,

    pub name: String,

    pub description: Option<String>,

    /// URL of the product image
    pub image: Option<String>,

    pub category: Category,

    /// Units in stock; zero hides the product from listings
    pub quantity: i32,

    /// Unit price with two fractional digits
    pub price: Decimal,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// User-editable product fields after validation
///
/// Produced only by [`ProductForm::clean`](crate::core::validation::ProductForm::clean),
/// so every instance satisfies the field constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Category,
    pub quantity: i32,
    pub price: Decimal,
}

/// Current time at microsecond precision, the resolution PostgreSQL keeps
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl Product {
    /// Build a new record with a fresh id and timestamps
    pub fn new(data: ProductData) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            image: data.image,
            category: data.category,
            quantity: data.quantity,
            price: data.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every user field, keeping identity and creation time
    pub fn apply(&mut self, data: ProductData) {
        self.name = data.name;
        self.description = data.description;
        self.image = data.image;
        self.category = data.category;
        self.quantity = data.quantity;
        self.price = data.price;
        self.touch();
    }

    /// Refresh the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = now();
    }

    /// Whether the product may appear in listings
    pub fn is_visible(&self) -> bool {
        self.quantity > 0
    }

    /// The user-editable fields of this record
    pub fn data(&self) -> ProductData {
        ProductData {
            name: self.name.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            category: self.category,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
