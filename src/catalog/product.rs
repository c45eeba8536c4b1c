//! Product records and the shapes used to create and modify them.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A product as stored and served.
///
/// Optional fields that were never supplied are omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, fixed at creation.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kept as the JSON number the client sent so integers stay integers.
    pub price: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

impl Product {
    /// Overwrite fields carried by the patch. The id never changes.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
    }
}

/// Fields for a product that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Number,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl NewProduct {
    pub fn with_id(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

/// Field overwrites for an existing product.
///
/// `None` leaves the stored value alone. Only truthy incoming values ever make it
/// into the text and price slots (empty strings and zero are dropped upstream).
/// `in_stock` is tri-state: `Some(None)` clears the flag, `Some(Some(b))` sets it.
/// A PUT carrying `"inStock": null` therefore removes the flag, and the product is
/// serialized without an `inStock` key afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Number>,
    pub category: Option<String>,
    pub in_stock: Option<Option<bool>>,
}

/// The three products every fresh process starts with.
pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: "1".to_string(),
            name: "Laptop".to_string(),
            description: Some("High-performance laptop with 16GB RAM".to_string()),
            price: Number::from(1200),
            category: Some("electronics".to_string()),
            in_stock: Some(true),
        },
        Product {
            id: "2".to_string(),
            name: "Smartphone".to_string(),
            description: Some("Latest model with 128GB storage".to_string()),
            price: Number::from(800),
            category: Some("electronics".to_string()),
            in_stock: Some(true),
        },
        Product {
            id: "3".to_string(),
            name: "Coffee Maker".to_string(),
            description: Some("Programmable coffee maker with timer".to_string()),
            price: Number::from(50),
            category: Some("kitchen".to_string()),
            in_stock: Some(false),
        },
    ]
}
