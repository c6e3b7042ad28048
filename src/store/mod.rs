//! View-model stores: each wraps the gateway, caches server state and
//! reconciles optimistic updates against authoritative responses.
pub mod address;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod wishlist;

pub use address::{AddressBook, AddressMode};
pub use admin::{AdminPanel, OrderQueue};
pub use cart::CartStore;
pub use catalog::Catalog;
pub use checkout::{CheckoutFlow, Stage};
pub use orders::OrdersStore;
pub use wishlist::WishlistStore;
