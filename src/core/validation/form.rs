//! Product submission form
//!
//! [`ProductForm`] holds the raw strings posted by the browser. Cleaning trims
//! them, runs the field validators and yields either a [`ProductData`] ready to
//! be stored or a [`FormErrors`] map keyed by field name.

use super::validators::{
    parse_category, parse_name, parse_price, parse_quantity, validate_category,
    validate_image_url, validate_name, validate_price, validate_quantity,
};
use crate::core::category::Category;
use crate::core::product::{Product, ProductData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Raw product form input, exactly as submitted
///
/// Kept as strings so that an invalid submission can be shown back to the user
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
}

/// Trimmed form input, blank optional fields mapped to `None`
#[derive(Debug, Validate)]
struct CleanedInput {
    #[validate(custom(function = validate_name))]
    name: String,

    #[validate(length(max = 3000, message = "Maximum description length is 3000 symbols."))]
    description: Option<String>,

    #[validate(custom(function = validate_image_url))]
    image: Option<String>,

    #[validate(custom(function = validate_category))]
    category: String,

    #[validate(custom(function = validate_quantity))]
    quantity: String,

    #[validate(custom(function = validate_price))]
    price: String,
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ProductForm {
    /// An empty form for creating a product
    pub fn new() -> Self {
        Self {
            category: Category::default().code().to_string(),
            ..Self::default()
        }
    }

    /// A form pre-filled with an existing record
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            image: product.image.clone().unwrap_or_default(),
            category: product.category.code().to_string(),
            quantity: product.quantity.to_string(),
            price: product.price.to_string(),
        }
    }

    /// Validate the submission and convert it into storable data
    pub fn clean(&self) -> Result<ProductData, FormErrors> {
        let input = CleanedInput {
            name: self.name.trim().to_string(),
            description: blank_to_none(&self.description),
            image: blank_to_none(&self.image),
            category: self.category.trim().to_string(),
            quantity: self.quantity.trim().to_string(),
            price: self.price.trim().to_string(),
        };

        input.validate()?;

        Ok(ProductData {
            name: parse_name(&input.name).map_err(|e| FormErrors::single("name", e))?,
            description: input.description,
            image: input.image,
            category: parse_category(&input.category)
                .map_err(|e| FormErrors::single("category", e))?,
            quantity: parse_quantity(&input.quantity)
                .map_err(|e| FormErrors::single("quantity", e))?,
            price: parse_price(&input.price).map_err(|e| FormErrors::single("price", e))?,
        })
    }
}

/// Per-field validation messages
///
/// Serializes as `{ "field": ["message", ...] }` for templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    fn single(field: &str, error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(field, message_of(&error));
        errors
    }

    /// Record a message against a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields carrying errors
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Invalid value ({}).", error.code))
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = Self::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                form_errors.add(&field, message_of(error));
            }
        }
        form_errors
    }
}
