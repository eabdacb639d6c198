//! Fixed catalog of hardware categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hardware class of a product.
///
/// The set is closed: every stored product carries one of these codes, and
/// the same enumeration drives forms, listings and category routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "MONITOR")]
    Monitor,
    #[serde(rename = "MOTHERBOARD")]
    Motherboard,
    #[default]
    #[serde(rename = "OTHER")]
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Cpu,
        Category::Gpu,
        Category::Monitor,
        Category::Motherboard,
        Category::Other,
    ];

    /// Stable code used in URLs, forms and storage
    pub fn code(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Gpu => "GPU",
            Category::Monitor => "MONITOR",
            Category::Motherboard => "MOTHERBOARD",
            Category::Other => "OTHER",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Category::Cpu => "Processor",
            Category::Gpu => "Graphics Card",
            Category::Monitor => "Monitor",
            Category::Motherboard => "Motherboard",
            Category::Other => "Other",
        }
    }

    /// Look up a category by its exact code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// (code, label) pairs for every category
    pub fn choices() -> Vec<CategoryChoice> {
        Self::ALL.into_iter().map(CategoryChoice::from).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown category code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category code '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A (code, label) pair as shown in category navigation and select boxes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryChoice {
    pub code: &'static str,
    pub label: &'static str,
}

impl From<Category> for CategoryChoice {
    fn from(category: Category) -> Self {
        Self {
            code: category.code(),
            label: category.label(),
        }
    }
}
