//! Cart slice.

use storefront_cache::{Cache, StorageKey};
use storefront_commerce::cart::{CartItem, CartPricing, Reconcile, ReplaceWholesale};
use storefront_commerce::ids::{ProductId, UserId};
use storefront_commerce::CommerceError;
use storefront_data::ApiError;

use super::SliceStatus;
use crate::api::{AddToCart, CartApi, UpdateCartItem};
use crate::StoreError;

/// The remote cart as last returned by the server, with derived pricing.
///
/// The item list is only ever replaced through the reconcile strategy, so
/// with the default [`ReplaceWholesale`] it is exactly the server's list.
/// Pricing is recomputed from the reconciled list after every success.
#[derive(Debug)]
pub struct CartStore<R = ReplaceWholesale> {
    api: CartApi,
    cache: Cache,
    strategy: R,
    items: Vec<CartItem>,
    pricing: CartPricing,
    status: SliceStatus,
}

impl CartStore<ReplaceWholesale> {
    pub fn new(api: CartApi, cache: Cache) -> Self {
        Self::with_strategy(api, cache, ReplaceWholesale)
    }
}

impl<R: Reconcile<CartItem>> CartStore<R> {
    /// Use a custom reconcile strategy.
    pub fn with_strategy(api: CartApi, cache: Cache, strategy: R) -> Self {
        Self {
            api,
            cache,
            strategy,
            items: Vec::new(),
            pricing: CartPricing::empty(),
            status: SliceStatus::default(),
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn pricing(&self) -> &CartPricing {
        &self.pricing
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|i| i.product_id() == product_id)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .filter(|i| i.product_id() == product_id)
            .map(|i| i.quantity)
            .sum()
    }

    pub fn status(&self) -> &SliceStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn clear_error(&mut self) {
        self.status.clear_error();
    }

    /// `GET /cart`. Retried on transient failures.
    pub async fn fetch(&mut self, user_id: &UserId) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.fetch(user_id).await;
        self.settle("fetch", result).await
    }

    /// Add `quantity` units of a product. A quantity below one is rejected
    /// without a request.
    pub async fn add(
        &mut self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
        size: Option<String>,
        color: Option<String>,
    ) -> Result<(), StoreError> {
        self.status.begin();
        let quantity = match positive_quantity(quantity) {
            Some(q) => q,
            None => {
                return Err(self.status.fail(
                    "cart",
                    "add",
                    CommerceError::InvalidQuantity(quantity),
                ))
            }
        };
        let body = AddToCart {
            user_id: user_id.clone(),
            product_id: product_id.clone(),
            quantity,
            size,
            color,
        };
        let result = self.api.add(&body).await;
        self.settle("add", result).await
    }

    /// Set the quantity of a line. A quantity below one removes the line
    /// instead; no update is ever sent with a non-positive quantity.
    pub async fn update(
        &mut self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        let Some(quantity) = positive_quantity(quantity) else {
            tracing::debug!(product_id = %product_id, "non-positive quantity, removing line");
            return self.remove(user_id, product_id).await;
        };
        self.status.begin();
        let body = UpdateCartItem {
            user_id: user_id.clone(),
            product_id: product_id.clone(),
            quantity,
        };
        let result = self.api.update(&body).await;
        self.settle("update", result).await
    }

    pub async fn remove(
        &mut self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.remove(user_id, product_id).await;
        self.settle("remove", result).await
    }

    pub async fn clear(&mut self, user_id: &UserId) -> Result<(), StoreError> {
        self.status.begin();
        let result = self.api.clear(user_id).await;
        self.settle("clear", result).await
    }

    /// Load the last persisted snapshot. Used at startup before the first
    /// fetch; returns whether anything was loaded.
    pub async fn hydrate_from_snapshot(&mut self) -> bool {
        let items = match self.cache.get::<Vec<CartItem>>(StorageKey::CartSnapshot).await {
            Ok(Some(items)) => items,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable cart snapshot");
                return false;
            }
        };
        match CartPricing::for_items(&items) {
            Ok(pricing) => {
                tracing::debug!(lines = items.len(), "cart hydrated from snapshot");
                self.items = items;
                self.pricing = pricing;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring cart snapshot with invalid pricing");
                false
            }
        }
    }

    /// Drop local state without touching the server (sign-out).
    pub fn reset(&mut self) {
        self.items.clear();
        self.pricing = CartPricing::empty();
        self.status = SliceStatus::default();
    }

    async fn settle(
        &mut self,
        action: &'static str,
        result: Result<Vec<CartItem>, ApiError>,
    ) -> Result<(), StoreError> {
        let server = match result {
            Ok(items) => items,
            Err(e) => return Err(self.status.fail("cart", action, e)),
        };

        let mut next = self.items.clone();
        self.strategy.reconcile_from(&mut next, server);
        let pricing = match CartPricing::for_items(&next) {
            Ok(pricing) => pricing,
            Err(e) => return Err(self.status.fail("cart", action, e)),
        };

        self.items = next;
        self.pricing = pricing;
        self.status.succeed();
        tracing::debug!(
            action,
            lines = self.items.len(),
            total = %self.pricing.total.display(),
            "cart reconciled"
        );
        self.write_snapshot().await;
        Ok(())
    }

    async fn write_snapshot(&self) {
        if let Err(e) = self.cache.set(StorageKey::CartSnapshot, &self.items).await {
            tracing::warn!(error = %e, "failed to persist cart snapshot");
        }
    }
}

fn positive_quantity(quantity: i64) -> Option<u32> {
    if quantity < 1 {
        return None;
    }
    u32::try_from(quantity).ok()
}
