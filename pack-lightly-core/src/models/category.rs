use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A packing list category.
///
/// The six standard categories cover most trips; anything else becomes a
/// free-form `Custom` category. On the wire a category is just its display
/// string (both in list documents and in the category URL segment).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Clothing,
    Essentials,
    Toiletries,
    Electronics,
    Documents,
    Miscellaneous,
    Custom(String),
}

impl Category {
    /// The six standard categories, in display order.
    pub const STANDARD: [Category; 6] = [
        Category::Clothing,
        Category::Essentials,
        Category::Toiletries,
        Category::Electronics,
        Category::Documents,
        Category::Miscellaneous,
    ];

    /// Display name of this category.
    pub fn name(&self) -> &str {
        match self {
            Category::Clothing => "Clothing",
            Category::Essentials => "Essentials",
            Category::Toiletries => "Toiletries",
            Category::Electronics => "Electronics",
            Category::Documents => "Documents",
            Category::Miscellaneous => "Miscellaneous",
            Category::Custom(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s.to_string()))
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "clothing" => Category::Clothing,
            "essentials" => Category::Essentials,
            "toiletries" => Category::Toiletries,
            "electronics" => Category::Electronics,
            "documents" => Category::Documents,
            "miscellaneous" => Category::Miscellaneous,
            _ => Category::Custom(s.trim().to_string()),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name().to_string()
    }
}
