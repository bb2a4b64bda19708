use storefront_commerce::ids::{ProductId, UserId};
use storefront_commerce::wishlist::{NewWishlistItem, WishlistItem};
use storefront_data::{path_segment, ApiError, HttpClient};

use super::ItemList;

/// `/wishlist`. Every call returns the full server-side item list.
#[derive(Debug, Clone)]
pub struct WishlistApi {
    http: HttpClient,
}

impl WishlistApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, user_id: &UserId) -> Result<Vec<WishlistItem>, ApiError> {
        let list: ItemList<WishlistItem> = self
            .http
            .get("/wishlist")
            .query("userId", user_id.as_str())
            .send()
            .await?;
        Ok(list.items)
    }

    pub async fn add(&self, item: &NewWishlistItem) -> Result<Vec<WishlistItem>, ApiError> {
        let list: ItemList<WishlistItem> =
            self.http.post("/wishlist/items").json(item)?.send().await?;
        Ok(list.items)
    }

    pub async fn remove(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<Vec<WishlistItem>, ApiError> {
        let list: ItemList<WishlistItem> = self
            .http
            .delete(format!("/wishlist/items/{}", path_segment(product_id.as_str())))
            .query("userId", user_id.as_str())
            .send()
            .await?;
        Ok(list.items)
    }

    pub async fn clear(&self, user_id: &UserId) -> Result<Vec<WishlistItem>, ApiError> {
        let list: ItemList<WishlistItem> = self
            .http
            .post("/wishlist/clear")
            .query("userId", user_id.as_str())
            .send()
            .await?;
        Ok(list.items)
    }
}
