//! Wishlist view-model
//!
//! A server-held set of products with no quantities. Toggling applies the
//! membership change locally first, then overwrites local state with the
//! authoritative answer; on failure it re-fetches to roll back.

use std::sync::Arc;

use crate::api::{ApiResult, StorefrontApi};
use crate::domain::aggregates::product::Product;
use crate::domain::events::{Notice, NoticeLog};

pub struct WishlistStore {
    api: Arc<dyn StorefrontApi>,
    user_id: String,
    products: Vec<Product>,
    notices: NoticeLog,
}

impl WishlistStore {
    pub fn new(api: Arc<dyn StorefrontApi>, user_id: impl Into<String>) -> Self {
        Self {
            api,
            user_id: user_id.into(),
            products: Vec::new(),
            notices: NoticeLog::default(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_wishlisted(&self, product_id: &str) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }

    pub async fn load(&mut self) -> ApiResult<()> {
        match self.api.fetch_wishlist(&self.user_id).await {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error("Could not load your wishlist. Please try again."));
                Err(err)
            }
        }
    }

    pub async fn toggle(&mut self, product: &Product) -> ApiResult<()> {
        let was_member = self.is_wishlisted(&product.id);
        if was_member {
            self.products.retain(|p| p.id != product.id);
        } else {
            self.products.push(product.clone());
        }
        match self.api.toggle_wishlist(&self.user_id, &product.id).await {
            Ok(products) => {
                self.products = products;
                let message = if was_member {
                    format!("{} removed from wishlist.", product.name)
                } else {
                    format!("{} added to wishlist!", product.name)
                };
                self.notices.push(Notice::success(message));
                Ok(())
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Error updating wishlist: {err}")));
                self.resync().await;
                Err(err)
            }
        }
    }

    async fn resync(&mut self) {
        match self.api.fetch_wishlist(&self.user_id).await {
            Ok(products) => self.products = products,
            Err(err) => {
                tracing::warn!(error = %err, "wishlist resync failed; keeping local state");
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }
}
