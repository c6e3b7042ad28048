//! Aggregates module
pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartError, CartLine, Totals};
pub use order::{
    DeliveryDetails, Order, OrderError, OrderItem, Payment, PaymentStatus, PlaceOrderRequest,
    StepState, Timeline, TimelineStep, TransactionDetails,
};
pub use product::{Product, ProductForm, CATEGORIES};
