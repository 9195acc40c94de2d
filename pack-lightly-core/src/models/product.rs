use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A product in the store inventory (admin back-office).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    /// Whether the product is certified eco-friendly
    #[serde(default)]
    pub eco: bool,
    /// Units in stock
    #[serde(default)]
    pub stock: u32,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product (`POST /products`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub eco: bool,
    #[serde(default)]
    pub stock: u32,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            eco: false,
            stock: 0,
        }
    }
}

/// Partial product update (`PATCH /products/{id}`).
///
/// Unset fields are omitted from the request body and left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eco: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.eco.is_none()
            && self.stock.is_none()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.name, self.price)?;
        if self.eco {
            write!(f, " [eco]")?;
        }
        write!(f, " - {} in stock", self.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_defaults() {
        let product = NewProduct::new("Bamboo Cutlery Set", 12.5);
        assert_eq!(product.name, "Bamboo Cutlery Set");
        assert_eq!(product.price, 12.5);
        assert!(!product.eco);
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn test_product_update_skips_unset_fields() {
        let update = ProductUpdate {
            stock: Some(40),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"stock":40}"#);
        assert!(!update.is_empty());
        assert!(ProductUpdate::default().is_empty());
    }

    #[test]
    fn test_product_display() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Solid Shampoo".to_string(),
            description: None,
            price: 8.0,
            eco: true,
            stock: 12,
            updated_at: Utc::now(),
        };
        assert_eq!(format!("{}", product), "Solid Shampoo (8.00) [eco] - 12 in stock");
    }
}
