//! Packing list items.
//!
//! Items are identified by name within their category (case-insensitive);
//! the client keeps no persistent item identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_quantity() -> u32 {
    1
}

/// A single entry on a packing checklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Item name (unique within its category, case-insensitive)
    pub name: String,
    /// How many to pack (always at least 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Whether the item has been packed
    #[serde(default)]
    pub checked: bool,
    /// Whether this is an eco-friendly choice
    #[serde(default)]
    pub eco: bool,
}

impl Item {
    /// Create a new unchecked item with quantity 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: 1,
            checked: false,
            eco: false,
        }
    }

    /// Set the quantity (clamped to at least 1).
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Mark the item as an eco-friendly choice.
    pub fn with_eco(mut self, eco: bool) -> Self {
        self.eco = eco;
        self
    }

    /// Case-insensitive name comparison.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Partial field update merged into an existing item.
///
/// Unset fields leave the item unchanged. Renaming is not supported;
/// the name is the item's identity.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub quantity: Option<u32>,
    pub checked: Option<bool>,
    pub eco: Option<bool>,
}

impl ItemUpdate {
    /// Apply this update to an item, clamping the quantity to at least 1.
    pub fn apply(&self, item: &mut Item) {
        if let Some(quantity) = self.quantity {
            item.quantity = quantity.max(1);
        }
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
        if let Some(eco) = self.eco {
            item.eco = eco;
        }
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.checked.is_none() && self.eco.is_none()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.checked { "[x]" } else { "[ ]" };
        write!(f, "{} {}", check, self.name)?;
        if self.quantity > 1 {
            write!(f, " x{}", self.quantity)?;
        }
        if self.eco {
            write!(f, " (eco)")?;
        }
        Ok(())
    }
}
