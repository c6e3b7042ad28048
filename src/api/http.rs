//! reqwest implementation of [`StorefrontApi`]
//!
//! All requests go to one configured base URL. Non-2xx responses are
//! decoded for a `message` (or `error`) field and surfaced verbatim;
//! anything else falls back to the raw body or the status line.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::error::{ApiError, ApiResult};
use super::gateway::{
    LoginRequest, SavedAddress, SignupRequest, StorefrontApi, UserProfile,
};
use crate::domain::aggregates::cart::CartLine;
use crate::domain::aggregates::order::{
    DeliveryDetails, Order, PaymentStatus, PlaceOrderRequest,
};
use crate::domain::aggregates::product::{Product, ProductForm};

#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

/// Error payloads vary across backend revisions; accept both keys.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct WishlistBody {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct ProductBody {
    product: Product,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                if text.is_empty() {
                    format!("Server Error: {status}")
                } else {
                    text.clone()
                }
            });
        tracing::warn!(status = %status, message = %message, "request rejected");
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl StorefrontApi for HttpApi {
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.get("/products").await
    }

    async fn create_product(&self, form: &ProductForm) -> ApiResult<Product> {
        let body: ProductBody = self.post("/products/add", form).await?;
        Ok(body.product)
    }

    async fn update_product(&self, id: &str, form: &ProductForm) -> ApiResult<Product> {
        let body: ProductBody = self.put(&format!("/products/update/{id}"), form).await?;
        Ok(body.product)
    }

    async fn delete_product(&self, id: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/products/delete/{id}")))
            .send()
            .await?;
        Self::decode::<serde_json::Value>(response).await.map(|_| ())
    }

    async fn fetch_cart(&self, user_id: &str) -> ApiResult<Vec<CartLine>> {
        self.get(&format!("/cart/{user_id}")).await
    }

    async fn set_cart_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> ApiResult<Vec<CartLine>> {
        let body = json!({
            "userId": user_id,
            "productId": product_id,
            "quantity": quantity,
        });
        let _: serde_json::Value = self.put("/cart/quantity", &body).await?;
        // The quantity endpoint replies with a bare message; the cart
        // itself is the authoritative answer.
        self.fetch_cart(user_id).await
    }

    async fn fetch_wishlist(&self, user_id: &str) -> ApiResult<Vec<Product>> {
        let body: WishlistBody = self.get(&format!("/wishlist/{user_id}")).await?;
        Ok(body.products)
    }

    async fn toggle_wishlist(&self, user_id: &str, product_id: &str) -> ApiResult<Vec<Product>> {
        let body = json!({ "userId": user_id, "productId": product_id });
        let _: serde_json::Value = self.post("/wishlist/toggle", &body).await?;
        self.fetch_wishlist(user_id).await
    }

    async fn place_order(&self, user_id: &str, request: &PlaceOrderRequest) -> ApiResult<Order> {
        tracing::info!(user = user_id, total = %request.total_amount, "placing order");
        self.post("/orders/place", request).await
    }

    async fn order_history(&self) -> ApiResult<Vec<Order>> {
        self.get("/orders/history").await
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        status: PaymentStatus,
    ) -> ApiResult<Order> {
        let body = json!({ "status": status });
        self.put(&format!("/orders/update-status/{order_id}"), &body)
            .await
    }

    async fn list_addresses(&self) -> ApiResult<Vec<SavedAddress>> {
        self.get("/orders/addresses").await
    }

    async fn create_address(&self, details: &DeliveryDetails) -> ApiResult<SavedAddress> {
        self.post("/orders/addresses", details).await
    }

    async fn update_address(
        &self,
        id: &str,
        details: &DeliveryDetails,
    ) -> ApiResult<SavedAddress> {
        self.put(&format!("/orders/addresses/{id}"), details).await
    }

    async fn signup(&self, request: &SignupRequest) -> ApiResult<UserProfile> {
        self.post("/auth/signup", request).await
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<UserProfile> {
        self.post("/auth/login", request).await
    }

    async fn profile(&self, email: &str) -> ApiResult<UserProfile> {
        self.get(&format!("/auth/profile/{email}")).await
    }
}
