//! The product record and the request schema used to create and replace it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::Error;

/// A catalog entry. Serialised with camelCase keys (`inStock`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Value,
    pub category: String,
    pub in_stock: Value,
}

impl Product {
    pub fn new(id: impl Into<String>, fields: ProductFields) -> Self {
        let ProductFields { name, description, price, category, in_stock } = fields;
        Self { id: id.into(), name, description, price, category, in_stock }
    }

    /// Replaces every field except `id`.
    pub fn apply(&mut self, fields: ProductFields) {
        let ProductFields { name, description, price, category, in_stock } = fields;
        self.name = name;
        self.description = description;
        self.price = price;
        self.category = category;
        self.in_stock = in_stock;
    }
}

/// The records the store starts with.
pub fn seed() -> Vec<Product> {
    vec![
        Product {
            id: "1".into(),
            name: "Laptop".into(),
            description: "High-performance laptop with 16GB RAM".into(),
            price: 1200.into(),
            category: "electronics".into(),
            in_stock: Value::Bool(true),
        },
        Product {
            id: "2".into(),
            name: "Smartphone".into(),
            description: "Latest model with 128GB storage".into(),
            price: 800.into(),
            category: "electronics".into(),
            in_stock: Value::Bool(true),
        },
        Product {
            id: "3".into(),
            name: "Coffee Maker".into(),
            description: "Programmable coffee maker with timer".into(),
            price: 50.into(),
            category: "kitchen".into(),
            in_stock: Value::Bool(false),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("All product fields are required")]
pub struct MissingFields;

/// Body of a create or update request, before validation.
///
/// `price` and `in_stock` hold whatever JSON the client sent. `None` means the
/// key was absent; an explicit `null` is `Some(Value::Null)`. Only absence
/// fails validation for those two.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub in_stock: Option<Value>,
}

/// Validated product fields: everything but the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Value,
    pub category: String,
    pub in_stock: Value,
}

impl ProductInput {
    /// Reads the schema from a parsed body. Anything other than a JSON object
    /// has no fields. A non-string `name`, `description` or `category` is a
    /// malformed body.
    pub fn from_json(body: Value) -> Result<Self, Error> {
        match body {
            Value::Object(_) => serde_json::from_value(body).map_err(Error::MalformedBody),
            _ => Ok(Self::default()),
        }
    }

    /// Strings must be non-empty; `price` and `inStock` need only be present.
    pub fn validate(self) -> Result<ProductFields, MissingFields> {
        Ok(ProductFields {
            name: non_empty(self.name)?,
            description: non_empty(self.description)?,
            price: self.price.map(integral).ok_or(MissingFields)?,
            category: non_empty(self.category)?,
            in_stock: self.in_stock.map(integral).ok_or(MissingFields)?,
        })
    }
}

fn non_empty(value: Option<String>) -> Result<String, MissingFields> {
    value.filter(|s| !s.is_empty()).ok_or(MissingFields)
}

/// Writes whole floats as integers (`12.0` becomes `12`), at any depth.
fn integral(value: Value) -> Value {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    match value {
        Value::Number(n) if !n.is_i64() && !n.is_u64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= EXACT => Value::Number(Number::from(f as i64)),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(integral).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, integral(v))).collect()),
        other => other,
    }
}

/// Marks a field as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
