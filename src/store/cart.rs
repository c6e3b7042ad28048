//! Cart view-model with optimistic synchronization
//!
//! The backend owns the cart; this store keeps a local cache. Every
//! mutation applies optimistically, then the authoritative server answer
//! overwrites local state. On failure the optimistic change is rolled
//! back by re-fetching the full set, so the cache never drifts.

use std::sync::Arc;

use crate::api::{ApiResult, StorefrontApi};
use crate::domain::aggregates::cart::{Cart, CartLine, Totals};
use crate::domain::aggregates::product::Product;
use crate::domain::events::{Notice, NoticeLog};
use crate::domain::value_objects::Money;

pub struct CartStore {
    api: Arc<dyn StorefrontApi>,
    user_id: String,
    cart: Cart,
    delivery_fee: Money,
    notices: NoticeLog,
}

impl CartStore {
    pub fn new(api: Arc<dyn StorefrontApi>, user_id: impl Into<String>, delivery_fee: Money) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            cart: Cart::new(),
            delivery_fee,
            notices: NoticeLog::default(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLine] {
        self.cart.items()
    }

    pub fn totals(&self) -> Totals {
        self.cart.totals(self.delivery_fee.clone())
    }

    pub async fn load(&mut self) -> ApiResult<()> {
        let lines = self.api.fetch_cart(&self.user_id).await?;
        self.cart.replace(lines);
        Ok(())
    }

    /// Add `quantity` of a product (merges with an existing line).
    pub async fn add(&mut self, product: Product, quantity: u32) -> ApiResult<()> {
        if !product.is_available() {
            self.notices
                .push(Notice::warning(format!("{} is out of stock.", product.name)));
            return Ok(());
        }
        let product_id = product.id.clone();
        let name = product.name.clone();
        self.cart.add(product, quantity);
        let target = self
            .cart
            .items()
            .iter()
            .find(|l| l.product.id == product_id)
            .map(|l| l.quantity as i32)
            .unwrap_or(quantity as i32);
        match self
            .api
            .set_cart_quantity(&self.user_id, &product_id, target)
            .await
        {
            Ok(lines) => {
                self.cart.replace(lines);
                self.notices
                    .push(Notice::success(format!("Added {quantity} x {name} to cart!")));
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Error adding to cart: {err}")));
                self.resync().await;
                Err(err)
            }
        }
    }

    /// Set the quantity for a product; non-positive removes the line.
    pub async fn set_quantity(&mut self, product_id: &str, quantity: i32) -> ApiResult<()> {
        // Optimistic; a missing line is fine when the target is a removal.
        let _ = self.cart.set_quantity(product_id, quantity);
        match self
            .api
            .set_cart_quantity(&self.user_id, product_id, quantity)
            .await
        {
            Ok(lines) => {
                self.cart.replace(lines);
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Error updating cart: {err}")));
                self.resync().await;
                Err(err)
            }
        }
    }

    pub async fn remove(&mut self, product_id: &str) -> ApiResult<()> {
        self.set_quantity(product_id, 0).await
    }

    /// Roll back optimistic state to whatever the server holds.
    async fn resync(&mut self) {
        match self.api.fetch_cart(&self.user_id).await {
            Ok(lines) => self.cart.replace(lines),
            Err(err) => {
                tracing::warn!(error = %err, "cart resync failed; keeping local state");
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }
}
