//! In-memory backend used by the store tests.
//!
//! Mirrors the real service's observable behavior: it owns carts,
//! wishlists, orders and addresses per user, applies status writes
//! blindly (last-write-wins, no server-side guard) and can be told to
//! fail the next call to exercise rollback paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use greenbasket::api::gateway::{
    LoginRequest, SavedAddress, SignupRequest, StorefrontApi, UserProfile,
};
use greenbasket::api::{ApiError, ApiResult};
use greenbasket::domain::aggregates::cart::CartLine;
use greenbasket::domain::aggregates::order::{
    DeliveryDetails, Order, Payment, PaymentStatus, PlaceOrderRequest,
};
use greenbasket::domain::aggregates::product::{Product, ProductForm};

#[derive(Default)]
struct State {
    products: Vec<Product>,
    carts: HashMap<String, Vec<(String, u32)>>,
    wishlists: HashMap<String, Vec<String>>,
    orders: Vec<Order>,
    addresses: Vec<SavedAddress>,
}

#[derive(Default)]
pub struct InMemoryApi {
    state: Mutex<State>,
    fail_next: AtomicBool,
    calls: AtomicUsize,
}

pub fn product(id: &str, name: &str, price: Decimal) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        photo: String::new(),
        price,
        description: String::new(),
        rating: 4.0,
        in_stock: true,
        brand: "Generic".into(),
        kind: "Soil".into(),
        sku: format!("SKU-{id}"),
        quantity: 50,
    }
}

pub fn delivery() -> DeliveryDetails {
    DeliveryDetails {
        name: "Kisan Rao".into(),
        phone: "9876543210".into(),
        email: None,
        address: "Plot 15, Krishi Nagar".into(),
        city: "Bhopal".into(),
        pincode: "462022".into(),
    }
}

impl InMemoryApi {
    pub fn new(products: Vec<Product>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().products = products;
        api
    }

    /// Fail exactly one upcoming call with a 500.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of calls that reached this backend.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seed_cart(&self, user_id: &str, lines: &[(&str, u32)]) {
        self.state.lock().unwrap().carts.insert(
            user_id.to_string(),
            lines.iter().map(|(id, q)| (id.to_string(), *q)).collect(),
        );
    }

    pub fn seed_order(&self, status: PaymentStatus, minutes_ago: i64) -> String {
        let id = Uuid::new_v4().to_string();
        let mut state = self.state.lock().unwrap();
        let order = Order {
            id: id.clone(),
            items: vec![greenbasket::domain::aggregates::order::OrderItem {
                product_id: "p1".into(),
                name: "Organic Compost".into(),
                price: Decimal::from(250),
                quantity: 2,
                photo: String::new(),
            }],
            delivery_details: delivery(),
            total_amount: Decimal::from(550),
            payment: Payment {
                method: "UPI".into(),
                txn_id: "UPL1".into(),
                utr_id: "123456789012".into(),
                status,
            },
            created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
            shipped_at: None,
            cancelled_at: None,
        };
        state.orders.push(order);
        id
    }

    pub fn seed_address(&self, label: &str, is_default: bool) -> String {
        let id = Uuid::new_v4().to_string();
        self.state.lock().unwrap().addresses.push(SavedAddress {
            id: id.clone(),
            details: delivery(),
            label: label.into(),
            is_default,
        });
        id
    }

    pub fn order(&self, id: &str) -> Option<Order> {
        self.state
            .lock()
            .unwrap()
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    fn gate(&self) -> ApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Http {
                status: 500,
                message: "Server Error: injected".into(),
            });
        }
        Ok(())
    }

    fn cart_lines(state: &State, user_id: &str) -> Vec<CartLine> {
        state
            .carts
            .get(user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(product_id, quantity)| {
                        state
                            .products
                            .iter()
                            .find(|p| &p.id == product_id)
                            .map(|p| CartLine {
                                product: p.clone(),
                                quantity: *quantity,
                            })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn wishlist_products(state: &State, user_id: &str) -> Vec<Product> {
        state
            .wishlists
            .get(user_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.products.iter().find(|p| &p.id == id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl StorefrontApi for InMemoryApi {
    async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.gate()?;
        Ok(self.state.lock().unwrap().products.clone())
    }

    async fn create_product(&self, form: &ProductForm) -> ApiResult<Product> {
        self.gate()?;
        let mut state = self.state.lock().unwrap();
        let created = Product {
            id: Uuid::new_v4().to_string(),
            name: form.name.clone(),
            photo: form.photo.clone(),
            price: form.price,
            description: form.description.clone(),
            rating: form.rating,
            in_stock: form.in_stock,
            brand: form.brand.clone(),
            kind: form.kind.clone(),
            sku: form.sku.clone(),
            quantity: form.quantity,
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(&self, id: &str, form: &ProductForm) -> ApiResult<Product> {
        self.gate()?;
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ApiError::Http {
                status: 404,
                message: "Product not found".into(),
            })?;
        product.name = form.name.clone();
        product.price = form.price;
        product.kind = form.kind.clone();
        product.in_stock = form.in_stock;
        product.quantity = form.quantity;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: &str) -> ApiResult<()> {
        self.gate()?;
        self.state.lock().unwrap().products.retain(|p| p.id != id);
        Ok(())
    }

    async fn fetch_cart(&self, user_id: &str) -> ApiResult<Vec<CartLine>> {
        self.gate()?;
        let state = self.state.lock().unwrap();
        Ok(Self::cart_lines(&state, user_id))
    }

    async fn set_cart_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> ApiResult<Vec<CartLine>> {
        self.gate()?;
        let mut state = self.state.lock().unwrap();
        let entries = state.carts.entry(user_id.to_string()).or_default();
        if quantity <= 0 {
            entries.retain(|(id, _)| id != product_id);
        } else if let Some(entry) = entries.iter_mut().find(|(id, _)| id == product_id) {
            entry.1 = quantity as u32;
        } else {
            entries.push((product_id.to_string(), quantity as u32));
        }
        Ok(Self::cart_lines(&state, user_id))
    }

    async fn fetch_wishlist(&self, user_id: &str) -> ApiResult<Vec<Product>> {
        self.gate()?;
        let state = self.state.lock().unwrap();
        Ok(Self::wishlist_products(&state, user_id))
    }

    async fn toggle_wishlist(&self, user_id: &str, product_id: &str) -> ApiResult<Vec<Product>> {
        self.gate()?;
        let mut state = self.state.lock().unwrap();
        let ids = state.wishlists.entry(user_id.to_string()).or_default();
        if ids.iter().any(|id| id == product_id) {
            ids.retain(|id| id != product_id);
        } else {
            ids.push(product_id.to_string());
        }
        Ok(Self::wishlist_products(&state, user_id))
    }

    async fn place_order(&self, _user_id: &str, request: &PlaceOrderRequest) -> ApiResult<Order> {
        self.gate()?;
        let mut state = self.state.lock().unwrap();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            items: request.items.clone(),
            delivery_details: request.delivery_details.clone(),
            total_amount: request.total_amount,
            payment: request.payment.clone(),
            created_at: Utc::now(),
            shipped_at: None,
            cancelled_at: None,
        };
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn order_history(&self) -> ApiResult<Vec<Order>> {
        self.gate()?;
        Ok(self.state.lock().unwrap().orders.clone())
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        status: PaymentStatus,
    ) -> ApiResult<Order> {
        self.gate()?;
        let mut state = self.state.lock().unwrap();
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(ApiError::Http {
                status: 404,
                message: "Order not found".into(),
            })?;
        // The original backend applied any status write; the client-side
        // guard is the only gate.
        order.payment.status = status;
        match status {
            PaymentStatus::Shipped => order.shipped_at = Some(Utc::now()),
            PaymentStatus::Cancelled => order.cancelled_at = Some(Utc::now()),
            _ => {}
        }
        Ok(order.clone())
    }

    async fn list_addresses(&self) -> ApiResult<Vec<SavedAddress>> {
        self.gate()?;
        Ok(self.state.lock().unwrap().addresses.clone())
    }

    async fn create_address(&self, details: &DeliveryDetails) -> ApiResult<SavedAddress> {
        self.gate()?;
        let address = SavedAddress {
            id: Uuid::new_v4().to_string(),
            details: details.clone(),
            label: format!("{}, {}", details.city, details.pincode),
            is_default: false,
        };
        self.state.lock().unwrap().addresses.push(address.clone());
        Ok(address)
    }

    async fn update_address(
        &self,
        id: &str,
        details: &DeliveryDetails,
    ) -> ApiResult<SavedAddress> {
        self.gate()?;
        let mut state = self.state.lock().unwrap();
        let address = state
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ApiError::Http {
                status: 404,
                message: "Address not found".into(),
            })?;
        address.details = details.clone();
        Ok(address.clone())
    }

    async fn signup(&self, request: &SignupRequest) -> ApiResult<UserProfile> {
        self.gate()?;
        Ok(UserProfile {
            id: Uuid::new_v4().to_string(),
            name: request.name.clone(),
            email: request.email.clone(),
            phone: None,
        })
    }

    async fn login(&self, request: &LoginRequest) -> ApiResult<UserProfile> {
        self.gate()?;
        Ok(UserProfile {
            id: Uuid::new_v4().to_string(),
            name: "Kisan Rao".into(),
            email: request.email.clone(),
            phone: None,
        })
    }

    async fn profile(&self, email: &str) -> ApiResult<UserProfile> {
        self.gate()?;
        Ok(UserProfile {
            id: Uuid::new_v4().to_string(),
            name: "Kisan Rao".into(),
            email: email.into(),
            phone: Some("9876543210".into()),
        })
    }
}
