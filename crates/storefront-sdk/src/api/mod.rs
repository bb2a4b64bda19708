//! Typed clients, one per backend resource.
//!
//! Each client is a thin layer over the shared [`HttpClient`]: it knows the
//! paths and body shapes of its resource and nothing else. State lives in
//! the stores.
//!
//! [`HttpClient`]: storefront_data::HttpClient

mod cart;
mod orders;
mod payments;
mod products;
mod returns;
mod users;
mod wishlist;

pub use cart::{AddToCart, CartApi, UpdateCartItem};
pub use orders::OrdersApi;
pub use payments::PaymentsApi;
pub use products::ProductsApi;
pub use returns::ReturnsApi;
pub use users::{ProfileUpdate, UsersApi};
pub use wishlist::WishlistApi;

use serde::Deserialize;

/// `{ "items": [...] }` body returned by the cart and wishlist resources.
#[derive(Debug, Deserialize)]
pub(crate) struct ItemList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
