//! Order placement.
//!
//! [`CheckoutFlow`] decides locally which step the user is on and what the
//! order will contain. [`CheckoutController`] performs the one remote write
//! at the end of the flow.

use serde::Serialize;
use storefront_commerce::cart::{CartItem, Reconcile};
use storefront_commerce::checkout::{
    Address, CheckoutFlow, CheckoutScope, PaymentMethod, PaymentRequest,
};
use storefront_commerce::ids::{OrderNumber, TransactionId, UserId};
use storefront_commerce::money::Money;

use crate::api::OrdersApi;
use crate::store::CartStore;
use crate::StoreError;

/// Where the UI should go next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Route {
    /// Order placed.
    #[serde(rename_all = "camelCase")]
    OrderConfirmation {
        order_id: OrderNumber,
        transaction_id: Option<TransactionId>,
    },
    /// The session ended; sign in again.
    Login,
}

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: OrderNumber,
    pub transaction_id: Option<TransactionId>,
    pub total: Money,
}

impl OrderConfirmation {
    pub fn route(&self) -> Route {
        Route::OrderConfirmation {
            order_id: self.order_id.clone(),
            transaction_id: self.transaction_id.clone(),
        }
    }
}

/// Drives one checkout from step selection to the placed order.
#[derive(Debug)]
pub struct CheckoutController {
    orders: OrdersApi,
    flow: CheckoutFlow,
    error: Option<String>,
}

impl CheckoutController {
    pub fn new(orders: OrdersApi, scope: CheckoutScope) -> Self {
        Self {
            orders,
            flow: CheckoutFlow::new(scope),
            error: None,
        }
    }

    pub fn flow(&self) -> &CheckoutFlow {
        &self.flow
    }

    /// Step navigation, address and payment selection.
    pub fn flow_mut(&mut self) -> &mut CheckoutFlow {
        &mut self.flow
    }

    pub fn is_processing(&self) -> bool {
        self.flow.is_processing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Place the order.
    ///
    /// Creates the order, records cash-on-delivery payment against the
    /// returned order number, then removes each ordered line from the cart
    /// one at a time. A failure at any step is returned as-is; earlier steps
    /// are not undone, so a created order may stay unpaid or leave its
    /// lines in the cart. A second call while one is in flight is rejected.
    pub async fn place_order<R: Reconcile<CartItem>>(
        &mut self,
        user_id: &UserId,
        cart: &mut CartStore<R>,
        addresses: &[Address],
    ) -> Result<OrderConfirmation, StoreError> {
        self.flow.begin_processing()?;
        self.error = None;

        let result = self.submit(user_id, cart, addresses).await;
        self.flow.finish_processing();

        match result {
            Ok(confirmation) => {
                tracing::info!(
                    order_id = %confirmation.order_id,
                    total = %confirmation.total.display(),
                    "order placed"
                );
                Ok(confirmation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "order placement failed");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    async fn submit<R: Reconcile<CartItem>>(
        &self,
        user_id: &UserId,
        cart: &mut CartStore<R>,
        addresses: &[Address],
    ) -> Result<OrderConfirmation, StoreError> {
        self.flow.ensure_payment_supported()?;
        let order = self.flow.build_order(user_id, addresses, cart.items())?;
        let total = order.pricing.total;

        let created = self.orders.create(&order).await?;
        tracing::info!(order_id = %created.order_id, lines = order.items.len(), "order created");

        let transaction_id = match order.payment_method {
            PaymentMethod::CashOnDelivery => {
                let request = PaymentRequest {
                    order_id: created.order_id.clone(),
                    user_id: user_id.clone(),
                    amount: total,
                    method: order.payment_method,
                };
                let receipt = self.orders.process_payment(&request).await?;
                tracing::info!(
                    order_id = %created.order_id,
                    transaction_id = %receipt.transaction_id,
                    "payment recorded"
                );
                Some(receipt.transaction_id)
            }
            _ => None,
        };

        for item in &order.items {
            cart.remove(user_id, &item.product_id).await?;
        }

        Ok(OrderConfirmation {
            order_id: created.order_id,
            transaction_id,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_route() {
        let confirmation = OrderConfirmation {
            order_id: OrderNumber::new("ORD-1"),
            transaction_id: Some(TransactionId::new("TXN-1")),
            total: Money::zero(Default::default()),
        };
        assert_eq!(
            confirmation.route(),
            Route::OrderConfirmation {
                order_id: OrderNumber::new("ORD-1"),
                transaction_id: Some(TransactionId::new("TXN-1")),
            }
        );
        let json = serde_json::to_value(confirmation.route()).unwrap();
        assert_eq!(json["screen"], "orderConfirmation");
        assert_eq!(json["orderId"], "ORD-1");
        assert_eq!(json["transactionId"], "TXN-1");
    }
}
