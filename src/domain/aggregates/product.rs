//! Product catalog records
//!
//! Products are owned by the backend; this is the wire shape the catalog,
//! cart and admin views work with. Field names follow the REST payloads
//! (`_id`, `type`, `inStock`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The fixed category set offered by the shop.
pub const CATEGORIES: [&str; 4] = ["Soil", "Nutrients", "Tools", "Irrigation"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub brand: String,
    /// Category, one of [`CATEGORIES`].
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub sku: String,
    /// Stock on hand, in kilograms for produce.
    #[serde(default)]
    pub quantity: u32,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    pub fn is_available(&self) -> bool {
        self.in_stock && self.quantity > 0
    }

    /// Case-insensitive name match used by the catalog search box.
    pub fn matches_search(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(&term.to_lowercase())
    }

    pub fn matches_category(&self, category: Option<&str>) -> bool {
        match category {
            None => true,
            Some(c) => self.kind == c,
        }
    }
}

/// Payload for creating or updating a product from the admin panel.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    #[serde(default)]
    pub photo: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub quantity: u32,
}

/// Test fixture shared by the store and domain tests.
#[cfg(test)]
pub(crate) fn sample(id: &str, name: &str, price: Decimal) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        photo: String::new(),
        price,
        description: String::new(),
        rating: 4.5,
        in_stock: true,
        brand: "Generic".into(),
        kind: "Soil".into(),
        sku: format!("SKU-{id}"),
        quantity: 20,
    }
}
