//! Order history slice.

use storefront_commerce::checkout::{Order, OrderStatus, OrderStatusUpdate};
use storefront_commerce::ids::{OrderId, UserId};
use storefront_commerce::returns::{compose_return_reason, ReturnReason};
use storefront_commerce::status::{can_cancel_order, can_return_order};
use storefront_commerce::CommerceError;

use super::SliceStatus;
use crate::api::OrdersApi;
use crate::StoreError;

/// Reason sent when the customer cancels without giving one.
pub const DEFAULT_CANCEL_REASON: &str = "Cancelled by customer";

/// Orders of the signed-in user and the one being viewed.
#[derive(Debug)]
pub struct OrdersStore {
    api: OrdersApi,
    orders: Vec<Order>,
    current: Option<Order>,
    status: SliceStatus,
}

impl OrdersStore {
    pub fn new(api: OrdersApi) -> Self {
        Self {
            api,
            orders: Vec::new(),
            current: None,
            status: SliceStatus::default(),
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Order loaded by the last [`fetch_one`](Self::fetch_one).
    pub fn current(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    pub fn status(&self) -> &SliceStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    pub fn api(&self) -> &OrdersApi {
        &self.api
    }

    pub async fn fetch(&mut self, user_id: &UserId) -> Result<(), StoreError> {
        self.status.begin();
        match self.api.list(user_id).await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "orders loaded");
                self.orders = orders;
                self.status.succeed();
                Ok(())
            }
            Err(e) => Err(self.status.fail("orders", "fetch", e)),
        }
    }

    pub async fn fetch_one(&mut self, user_id: &UserId, id: &OrderId) -> Result<&Order, StoreError> {
        self.status.begin();
        match self.api.get(user_id, id).await {
            Ok(order) => {
                self.status.succeed();
                self.replace(order.clone());
                Ok(self.current.insert(order))
            }
            Err(e) => Err(self.status.fail("orders", "fetch_one", e)),
        }
    }

    /// Ask to return a shipped or delivered order.
    ///
    /// Returns are filed by cancelling the order with a tagged reason; the
    /// server derives the return request from it. Orders in any other
    /// status are rejected before a request is sent.
    pub async fn request_return(
        &mut self,
        order: &Order,
        reason: ReturnReason,
        comment: Option<&str>,
    ) -> Result<&Order, StoreError> {
        self.status.begin();
        if !can_return_order(order) {
            let err = CommerceError::ReturnNotAllowed {
                status: order.status.as_str().to_string(),
            };
            return Err(self.status.fail("orders", "request_return", err));
        }
        let reason = compose_return_reason(reason, comment);
        tracing::info!(order_id = %order.order_id, reason = %reason, "requesting return");
        self.transition(order, reason, "request_return").await
    }

    /// Cancel an order that has not shipped yet.
    pub async fn cancel(&mut self, order: &Order, reason: &str) -> Result<&Order, StoreError> {
        self.status.begin();
        if !can_cancel_order(order) {
            let err = CommerceError::CancelNotAllowed {
                status: order.status.as_str().to_string(),
            };
            return Err(self.status.fail("orders", "cancel", err));
        }
        let reason = match reason.trim() {
            "" => DEFAULT_CANCEL_REASON.to_string(),
            given => given.to_string(),
        };
        self.transition(order, reason, "cancel").await
    }

    /// Drop local state (sign-out).
    pub fn reset(&mut self) {
        self.orders.clear();
        self.current = None;
        self.status = SliceStatus::default();
    }

    async fn transition(
        &mut self,
        order: &Order,
        reason: String,
        action: &'static str,
    ) -> Result<&Order, StoreError> {
        let update = OrderStatusUpdate {
            status: OrderStatus::Cancelled,
            cancellation_reason: Some(reason),
        };
        match self.api.update_status(&order.id, &update).await {
            Ok(updated) => {
                self.status.succeed();
                self.replace(updated.clone());
                Ok(self.current.insert(updated))
            }
            Err(e) => Err(self.status.fail("orders", action, e)),
        }
    }

    fn replace(&mut self, order: Order) {
        if let Some(slot) = self.orders.iter_mut().find(|o| o.id == order.id) {
            *slot = order;
        }
    }
}
