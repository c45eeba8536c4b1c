//! Request body validation for create and update.
//!
//! # Responsibilities
//! - Require `name` (non-empty string) and `price` (number)
//! - Type-check the optional fields so the record stays strongly typed
//! - Turn an accepted body into a `NewProduct` or a `ProductPatch`
//!
//! # Design Decisions
//! - Works on raw `serde_json::Value` so a wrong type is reported with a
//!   field-specific message instead of a generic deserialization failure
//! - Nothing here touches the store; a rejected body never mutates anything

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::catalog::product::{NewProduct, ProductPatch};

/// Reasons a product body is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductValidationError {
    #[error("Invalid or missing product name")]
    Name,

    #[error("Invalid or missing product price")]
    Price,

    /// An optional field was present with the wrong JSON type.
    #[error("Invalid product {field}: expected {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },
}

/// A create/update body that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub price: Number,
    pub description: Option<String>,
    pub category: Option<String>,
    /// `None` when the key was absent, `Some(None)` for an explicit null.
    pub in_stock: Option<Option<bool>>,
}

impl ProductPayload {
    /// Validate a JSON body.
    pub fn from_json(body: &Value) -> Result<Self, ProductValidationError> {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        let name = match fields.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(ProductValidationError::Name),
        };

        let price = match fields.get("price") {
            Some(Value::Number(price)) => price.clone(),
            _ => return Err(ProductValidationError::Price),
        };

        let description = optional_string(fields, "description")?;
        let category = optional_string(fields, "category")?;

        let in_stock = match fields.get("inStock") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::Bool(flag)) => Some(Some(*flag)),
            Some(_) => {
                return Err(ProductValidationError::FieldType {
                    field: "inStock",
                    expected: "a boolean",
                })
            }
        };

        Ok(Self {
            name,
            price,
            description,
            category,
            in_stock,
        })
    }

    /// Build a new record; absent optionals stay absent.
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock.flatten(),
        }
    }

    /// Build an update that only carries truthy values, except `inStock`
    /// which overwrites whenever the key was sent.
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: Some(self.name).filter(|name| !name.is_empty()),
            description: self.description.filter(|d| !d.is_empty()),
            price: Some(self.price).filter(is_truthy_number),
            category: self.category.filter(|c| !c.is_empty()),
            in_stock: self.in_stock,
        }
    }
}

fn optional_string(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ProductValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ProductValidationError::FieldType {
            field,
            expected: "a string",
        }),
    }
}

fn is_truthy_number(number: &Number) -> bool {
    number.as_f64().map_or(true, |value| value != 0.0)
}
