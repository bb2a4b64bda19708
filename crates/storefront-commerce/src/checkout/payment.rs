//! Payment types.

use crate::ids::{OrderNumber, TransactionId, UserId};
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Payment method offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
    /// Credit or debit card.
    #[serde(rename = "card")]
    Card,
    /// UPI transfer.
    #[serde(rename = "upi")]
    Upi,
    /// Net banking.
    #[serde(rename = "netbanking")]
    NetBanking,
}

impl PaymentMethod {
    /// Every method shown on the payment step.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CashOnDelivery,
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cod",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "netbanking",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
        }
    }

    /// Only cash on delivery can complete a purchase today; the rest are
    /// listed but stop the flow with a notice.
    pub fn is_supported(&self) -> bool {
        matches!(self, PaymentMethod::CashOnDelivery)
    }
}

define_status! {
    /// Payment status of an order.
    PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

/// Body of `POST /orders/payments/process`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: OrderNumber,
    pub user_id: UserId,
    #[serde(with = "money::as_decimal")]
    pub amount: Money,
    pub method: PaymentMethod,
}

/// Response of the payment-processing call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub transaction_id: TransactionId,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Body of `POST /payments/refund/:transactionId`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    #[serde(with = "money::as_decimal")]
    pub refund_amount: Money,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_only_cod_is_supported() {
        let supported: Vec<_> = PaymentMethod::ALL
            .iter()
            .filter(|m| m.is_supported())
            .collect();
        assert_eq!(supported, vec![&PaymentMethod::CashOnDelivery]);
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cod\""
        );
        let upi: PaymentMethod = serde_json::from_str("\"upi\"").unwrap();
        assert_eq!(upi, PaymentMethod::Upi);
    }

    #[test]
    fn test_payment_status_keeps_unknown_values() {
        let status: PaymentStatus = serde_json::from_str("\"partially_paid\"").unwrap();
        assert_eq!(status, PaymentStatus::Other("partially_paid".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"partially_paid\"");
    }

    #[test]
    fn test_payment_request_body() {
        let body = PaymentRequest {
            order_id: OrderNumber::new("ORD-1"),
            user_id: UserId::new("u1"),
            amount: Money::from_major(1049, Currency::INR),
            method: PaymentMethod::CashOnDelivery,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["orderId"], "ORD-1");
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["amount"], 1049);
        assert_eq!(json["method"], "cod");
    }
}
