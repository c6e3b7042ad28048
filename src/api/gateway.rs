//! The storefront gateway trait
//!
//! One seam over every backend endpoint family the views consume. Stores
//! only see this trait, so tests run against an in-memory implementation
//! and the binary runs against [`HttpApi`](super::http::HttpApi).
//!
//! Mutating cart/wishlist calls return the authoritative post-mutation
//! set: stores overwrite their optimistic local state with it, and on
//! failure roll back by re-fetching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::ApiResult;
use crate::domain::aggregates::cart::CartLine;
use crate::domain::aggregates::order::{
    DeliveryDetails, Order, PaymentStatus, PlaceOrderRequest,
};
use crate::domain::aggregates::product::{Product, ProductForm};

/// A saved delivery address with its server id and display label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub details: DeliveryDetails,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[async_trait]
pub trait StorefrontApi: Send + Sync {
    // Products
    async fn list_products(&self) -> ApiResult<Vec<Product>>;
    async fn create_product(&self, form: &ProductForm) -> ApiResult<Product>;
    async fn update_product(&self, id: &str, form: &ProductForm) -> ApiResult<Product>;
    async fn delete_product(&self, id: &str) -> ApiResult<()>;

    // Cart (server-held per user)
    async fn fetch_cart(&self, user_id: &str) -> ApiResult<Vec<CartLine>>;
    /// Set the quantity for a product; `quantity <= 0` removes the line.
    /// Returns the authoritative cart after the mutation.
    async fn set_cart_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> ApiResult<Vec<CartLine>>;

    // Wishlist (server-held per user)
    async fn fetch_wishlist(&self, user_id: &str) -> ApiResult<Vec<Product>>;
    /// Toggle membership and return the authoritative wishlist.
    async fn toggle_wishlist(&self, user_id: &str, product_id: &str) -> ApiResult<Vec<Product>>;

    // Orders
    async fn place_order(&self, user_id: &str, request: &PlaceOrderRequest) -> ApiResult<Order>;
    async fn order_history(&self) -> ApiResult<Vec<Order>>;
    async fn update_order_status(&self, order_id: &str, status: PaymentStatus)
        -> ApiResult<Order>;

    // Addresses
    async fn list_addresses(&self) -> ApiResult<Vec<SavedAddress>>;
    async fn create_address(&self, details: &DeliveryDetails) -> ApiResult<SavedAddress>;
    async fn update_address(&self, id: &str, details: &DeliveryDetails)
        -> ApiResult<SavedAddress>;

    // Auth (enforcement is the backend's concern; these are thin calls)
    async fn signup(&self, request: &SignupRequest) -> ApiResult<UserProfile>;
    async fn login(&self, request: &LoginRequest) -> ApiResult<UserProfile>;
    async fn profile(&self, email: &str) -> ApiResult<UserProfile>;
}
