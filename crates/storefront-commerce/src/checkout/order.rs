//! Order types.

use crate::cart::{CartItem, CartPricing};
use crate::checkout::{Address, PaymentMethod, PaymentStatus};
use crate::ids::{OrderId, OrderNumber, ProductId, TransactionId, UserId};
use crate::money::{self, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_status! {
    /// Order status. Transitions are owned by the server.
    OrderStatus {
        /// Order placed, awaiting confirmation.
        Pending => "pending",
        /// Order confirmed.
        Confirmed => "confirmed",
        /// Order being prepared.
        Processing => "processing",
        /// Order shipped.
        Shipped => "shipped",
        /// Order delivered.
        Delivered => "delivered",
        /// Order cancelled.
        Cancelled => "cancelled",
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// Payment details recorded on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayment {
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
}

/// A line of an order, also used when creating one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product ID.
    #[serde(alias = "product")]
    pub product_id: ProductId,
    /// Product name at time of order.
    pub name: String,
    /// Unit price at time of order.
    #[serde(with = "money::as_decimal")]
    pub price: Money,
    /// Quantity ordered.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl OrderItem {
    /// Snapshot a cart line into an order line.
    pub fn from_cart_item(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            price: item.product.price,
            quantity: item.quantity,
            size: item.size.clone(),
            color: item.color.clone(),
            image: item.product.primary_image().map(str::to_string),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Order {
    /// Database identifier, used in resource paths.
    pub id: OrderId,
    /// Order number shown to the customer.
    pub order_id: OrderNumber,
    /// Items in the order.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Delivery address snapshot.
    pub delivery_address: Address,
    /// Payment details.
    pub payment: OrderPayment,
    /// Pricing snapshot taken at checkout.
    pub pricing: CartPricing,
    /// Order status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Reason recorded when the order was cancelled or returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    /// Placement time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

keyed_record!(Order);

impl Order {
    /// Get total item count.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if order is paid.
    pub fn is_paid(&self) -> bool {
        self.payment.status == PaymentStatus::Completed
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub delivery_address: Address,
    pub payment_method: PaymentMethod,
    pub pricing: CartPricing,
}

/// Body of `PATCH /orders/:id/status`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_JSON: &str = r#"{
        "_id": "665f",
        "orderId": "ORD-1001",
        "items": [
            {"productId": "p1", "name": "Tee", "price": 400, "quantity": 2},
            {"productId": "p2", "name": "Cap", "price": 199, "quantity": 1}
        ],
        "deliveryAddress": {
            "_id": "a1", "name": "Asha", "phone": "9876543210",
            "addressLine1": "1 Main St", "city": "Pune", "state": "MH",
            "pincode": "411001"
        },
        "payment": {"method": "cod", "status": "pending"},
        "pricing": {"subtotal": 999, "discount": 0, "deliveryCharge": 50, "total": 1049},
        "status": "out_for_delivery",
        "createdAt": "2024-06-01T08:30:00Z"
    }"#;

    #[test]
    fn test_order_deserializes_with_unknown_status() {
        let order: Order = serde_json::from_str(ORDER_JSON).unwrap();
        assert_eq!(order.id.as_str(), "665f");
        assert_eq!(order.order_id.as_str(), "ORD-1001");
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.status, OrderStatus::Other("out_for_delivery".to_string()));
        assert!(!order.is_paid());
        assert_eq!(order.pricing.total.display(), "\u{20b9}1,049");
    }

    #[test]
    fn test_order_with_both_id_keys() {
        let mut value: serde_json::Value = serde_json::from_str(ORDER_JSON).unwrap();
        value["id"] = serde_json::json!("665f");
        let order: Order = serde_json::from_value(value).unwrap();
        assert_eq!(order.id.as_str(), "665f");
        assert_eq!(order.delivery_address.id.as_str(), "a1");
    }

    #[test]
    fn test_status_update_body() {
        let body = OrderStatusUpdate {
            status: OrderStatus::Cancelled,
            cancellation_reason: Some("Damaged product".to_string()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "cancelled");
        assert_eq!(json["cancellationReason"], "Damaged product");
    }
}
