//! Wishlist slice.

use storefront_commerce::cart::{Reconcile, ReplaceWholesale};
use storefront_commerce::catalog::Product;
use storefront_commerce::ids::{ProductId, UserId};
use storefront_commerce::wishlist::{NewWishlistItem, WishlistItem};
use storefront_data::ApiError;

use super::SliceStatus;
use crate::api::WishlistApi;
use crate::StoreError;

/// The remote wishlist, reconciled from every response like the cart.
#[derive(Debug)]
pub struct WishlistStore<R = ReplaceWholesale> {
    api: WishlistApi,
    strategy: R,
    items: Vec<WishlistItem>,
    status: SliceStatus,
}

impl WishlistStore<ReplaceWholesale> {
    pub fn new(api: WishlistApi) -> Self {
        Self::with_strategy(api, ReplaceWholesale)
    }
}

impl<R: Reconcile<WishlistItem>> WishlistStore<R> {
    pub fn with_strategy(api: WishlistApi, strategy: R) -> Self {
        Self {
            api,
            strategy,
            items: Vec::new(),
            status: SliceStatus::default(),
        }
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|i| &i.product_id == product_id)
    }

    pub fn status(&self) -> &SliceStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub async fn fetch(&mut self, user_id: &UserId) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.fetch(user_id).await;
        self.settle("fetch", result)
    }

    pub async fn add(&mut self, user_id: &UserId, product: &Product) -> Result<(), StoreError> {
        self.status.begin();
        let item = NewWishlistItem::from_product(user_id.clone(), product);
        let result = self.api.add(&item).await;
        self.settle("add", result)
    }

    pub async fn remove(
        &mut self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.remove(user_id, product_id).await;
        self.settle("remove", result)
    }

    pub async fn clear(&mut self, user_id: &UserId) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.clear(user_id).await;
        self.settle("clear", result)
    }

    /// Add the product if absent, remove it if present. Returns whether it
    /// is in the wishlist afterwards.
    pub async fn toggle(&mut self, user_id: &UserId, product: &Product) -> Result<bool, StoreError> {
        if self.contains(&product.id) {
            self.remove(user_id, &product.id).await?;
        } else {
            self.add(user_id, product).await?;
        }
        Ok(self.contains(&product.id))
    }

    /// Drop local state without touching the server (sign-out).
    pub fn reset(&mut self) {
        self.items.clear();
        self.status = SliceStatus::default();
    }

    fn settle(
        &mut self,
        action: &'static str,
        result: Result<Vec<WishlistItem>, ApiError>,
    ) -> Result<(), StoreError> {
        match result {
            Ok(server) => {
                self.strategy.reconcile_from(&mut self.items, server);
                self.status.succeed();
                tracing::debug!(action, items = self.items.len(), "wishlist reconciled");
                Ok(())
            }
            Err(e) => Err(self.status.fail("wishlist", action, e)),
        }
    }
}
