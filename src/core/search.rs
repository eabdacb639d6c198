//! Search and filter rules for product listings
//!
//! A listing shows *visible* products (quantity > 0), optionally narrowed by a
//! free-text term matched case-insensitively against name or description, and
//! optionally scoped to one category. Results are ordered by name, then id.

use crate::core::category::Category;
use crate::core::product::Product;
use crate::core::validation::FormErrors;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use validator::{Validate, ValidationErrors};

/// Maximum length of a search term
pub const SEARCH_MAX_LENGTH: usize = 100;

/// Search box state as submitted in the query string
///
/// The term may arrive as `search` or, from older links, as `name`; `search`
/// wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search: Option<String>,
    pub name: Option<String>,
}

#[derive(Validate)]
struct SearchInput {
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    search: String,
}

impl SearchForm {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            name: None,
        }
    }

    /// The submitted term, untouched
    pub fn raw_term(&self) -> &str {
        self.search
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), ValidationErrors> {
        SearchInput {
            search: self.raw_term().trim().to_string(),
        }
        .validate()
    }

    /// Validation messages, keyed under `search`
    pub fn errors(&self) -> FormErrors {
        self.check().err().map(FormErrors::from).unwrap_or_default()
    }

    /// The term to filter by
    ///
    /// `None` when the box is empty, blank, or fails validation; an invalid
    /// search never filters.
    pub fn term(&self) -> Option<String> {
        if self.check().is_err() {
            return None;
        }
        let trimmed = self.raw_term().trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Filter predicate and ordering for a product listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Trimmed, non-empty search term
    pub term: Option<String>,

    pub category: Option<Category>,
}

impl ProductQuery {
    /// Every visible product
    pub fn all() -> Self {
        Self::default()
    }

    /// Narrow by a search term; blank terms are ignored
    pub fn with_term(mut self, term: Option<&str>) -> Self {
        self.term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// Scope to one category
    pub fn in_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Whether a product belongs in this listing
    pub fn matches(&self, product: &Product) -> bool {
        product.is_visible()
            && self.category.is_none_or(|c| product.category == c)
            && self.term.as_deref().is_none_or(|t| matches_term(product, t))
    }

    /// Listing order: name ascending, then id ascending
    pub fn compare(a: &Product, b: &Product) -> Ordering {
        a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
    }
}

fn matches_term(product: &Product, term: &str) -> bool {
    let needle = term.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}
