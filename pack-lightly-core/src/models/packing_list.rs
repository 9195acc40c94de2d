use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use super::{Category, Item};

/// One category section inside a packing list document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySection {
    pub name: Category,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// A packing list document as stored by the server.
///
/// The server keeps categories as an ordered array of sections; the client
/// flattens them into a category map when seeding the checklist store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingList {
    pub id: Uuid,
    pub title: String,
    /// Trip destination, if the list belongs to a planned trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategorySection>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PackingList {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            destination: None,
            categories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Add a category section to this list.
    pub fn with_category(mut self, name: Category, items: Vec<Item>) -> Self {
        self.categories.push(CategorySection { name, items });
        self
    }

    /// Flatten the category sections into a map for seeding the store.
    ///
    /// If the document carries duplicate sections for one category the
    /// later section wins.
    pub fn category_map(&self) -> HashMap<Category, Vec<Item>> {
        self.categories
            .iter()
            .map(|section| (section.name.clone(), section.items.clone()))
            .collect()
    }

    /// Total number of items across all categories.
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|s| s.items.len()).sum()
    }

    /// Number of eco-flagged items across all categories.
    pub fn eco_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|i| i.eco)
            .count()
    }
}

impl fmt::Display for PackingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        if let Some(destination) = &self.destination {
            writeln!(f, "Destination: {}", destination)?;
        }
        writeln!(f, "Items: {} ({} eco)", self.item_count(), self.eco_count())?;
        Ok(())
    }
}

/// A row in the packing list index (`GET /packinglists`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingListSummary {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub updated_at: DateTime<Utc>,
}
