//! Green Basket storefront client
//!
//! Typed view-models over the shop's REST backend.
//!
//! ## Features
//! - Product catalog with category/search filtering
//! - Server-synchronized cart and wishlist (optimistic updates)
//! - Checkout flow with UPI payment references and invoice rendering
//! - Order history with a fulfillment timeline
//! - Admin product CRUD and order action queues
//!
//! The backend, authentication enforcement, persistence and payment
//! processing live elsewhere; this crate only talks to them over HTTP.

pub mod api;
pub mod config;
pub mod domain;
pub mod invoice;
pub mod store;

pub use api::{ApiError, ApiResult, HttpApi, StorefrontApi};
pub use config::StorefrontConfig;
pub use domain::aggregates::{
    Cart, CartLine, DeliveryDetails, Order, PaymentStatus, Product, Timeline, TransactionDetails,
};
pub use store::{
    AddressBook, AdminPanel, Catalog, CartStore, CheckoutFlow, OrdersStore, WishlistStore,
};
