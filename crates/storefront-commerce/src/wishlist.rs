//! Wishlist entries.

use crate::catalog::Product;
use crate::ids::{ProductId, UserId};
use crate::money::{self, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved product, denormalized by the wishlist resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(with = "money::as_decimal")]
    pub product_price: Money,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

/// Body of `POST /wishlist/items`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWishlistItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(with = "money::as_decimal")]
    pub product_price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
}

impl NewWishlistItem {
    /// Snapshot a product for the wishlist.
    pub fn from_product(user_id: UserId, product: &Product) -> Self {
        Self {
            user_id,
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            product_price: product.price,
            product_image: product.primary_image().map(str::to_string),
        }
    }
}
