//! Cart aggregate
//!
//! The cart is server-owned per user; this aggregate is the local cache
//! the storefront mutates optimistically before reconciling against the
//! backend's answer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::Money;

/// One cart entry as the backend returns it: a populated product document
/// under `productId` plus the quantity held.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "productId")]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Money {
        Money::rupees(self.product.price).multiply(self.quantity)
    }
}

/// Price breakdown shown in the cart summary and checkout pages.
#[derive(Clone, Debug, PartialEq)]
pub struct Totals {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

#[derive(Clone, Debug, Default)]
pub struct Cart {
    items: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|l| l.product.id == product_id)
    }

    /// Replace the whole cart with the backend's authoritative answer.
    pub fn replace(&mut self, items: Vec<CartLine>) {
        self.items = items;
    }

    /// Add `quantity` of a product, merging with an existing line.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if let Some(line) = self.items.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLine { product, quantity });
        }
    }

    /// Set the quantity for a product. A non-positive target is removal.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i32) -> Result<(), CartError> {
        if !self.contains(product_id) {
            return Err(CartError::ItemNotFound);
        }
        if quantity <= 0 {
            self.items.retain(|l| l.product.id != product_id);
        } else if let Some(line) = self.items.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity as u32;
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|l| l.product.id != product_id);
        if self.items.len() == before {
            return Err(CartError::ItemNotFound);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::rupees(Decimal::ZERO), |acc, l| {
                acc.add(&l.line_total()).unwrap_or(acc)
            })
    }

    /// Subtotal plus the flat per-order delivery fee.
    pub fn totals(&self, delivery_fee: Money) -> Totals {
        let subtotal = self.subtotal();
        let total = subtotal.add(&delivery_fee).unwrap_or_else(|_| subtotal.clone());
        Totals {
            subtotal,
            delivery_fee,
            total,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum CartError {
    #[error("item not found in cart")]
    ItemNotFound,
}
