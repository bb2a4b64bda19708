use serde::Serialize;
use storefront_commerce::cart::CartItem;
use storefront_commerce::ids::{ProductId, UserId};
use storefront_data::{path_segment, ApiError, HttpClient};

use super::ItemList;

/// Body of `POST /cart/items`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Body of `PUT /cart/items`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// `/cart`. Every call returns the full server-side item list.
#[derive(Debug, Clone)]
pub struct CartApi {
    http: HttpClient,
}

impl CartApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn fetch(&self, user_id: &UserId) -> Result<Vec<CartItem>, ApiError> {
        let list: ItemList<CartItem> = self
            .http
            .get("/cart")
            .query("userId", user_id.as_str())
            .send()
            .await?;
        Ok(list.items)
    }

    pub async fn add(&self, body: &AddToCart) -> Result<Vec<CartItem>, ApiError> {
        let list: ItemList<CartItem> = self.http.post("/cart/items").json(body)?.send().await?;
        Ok(list.items)
    }

    pub async fn update(&self, body: &UpdateCartItem) -> Result<Vec<CartItem>, ApiError> {
        let list: ItemList<CartItem> = self.http.put("/cart/items").json(body)?.send().await?;
        Ok(list.items)
    }

    pub async fn remove(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<Vec<CartItem>, ApiError> {
        let list: ItemList<CartItem> = self
            .http
            .delete(format!("/cart/items/{}", path_segment(product_id.as_str())))
            .query("userId", user_id.as_str())
            .send()
            .await?;
        Ok(list.items)
    }

    pub async fn clear(&self, user_id: &UserId) -> Result<Vec<CartItem>, ApiError> {
        let list: ItemList<CartItem> = self
            .http
            .post("/cart/clear")
            .query("userId", user_id.as_str())
            .send()
            .await?;
        Ok(list.items)
    }
}
