//! Return requests.
//!
//! The client does not create return requests directly: a return is filed
//! by cancelling a delivered or shipped order with a tagged reason, and the
//! server derives the request from it. The client lists, tracks and cancels
//! them.

use crate::ids::{OrderNumber, ProductId, ReturnId};
use crate::money::{self, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_status! {
    /// Return request status.
    ///
    /// Eight stages form the happy path; `Rejected` and `Cancelled` are
    /// terminal side branches.
    ReturnStatus {
        Requested => "requested",
        Approved => "approved",
        Rejected => "rejected",
        PickupScheduled => "pickup_scheduled",
        PickedUp => "picked_up",
        Received => "received",
        Inspected => "inspected",
        RefundInitiated => "refund_initiated",
        RefundCompleted => "refund_completed",
        Cancelled => "cancelled",
    }
}

impl ReturnStatus {
    /// Check if no further transitions can happen.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReturnStatus::Rejected | ReturnStatus::Cancelled | ReturnStatus::RefundCompleted
        )
    }
}

define_status! {
    /// Where a refund is paid.
    RefundMethod {
        OriginalPayment => "original_payment",
        BankTransfer => "bank_transfer",
        StoreCredit => "store_credit",
    }
}

/// A line of a return request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    pub quantity: u32,
    #[serde(with = "money::as_decimal")]
    pub price: Money,
}

/// A return request as tracked by the returns resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub return_id: ReturnId,
    pub order_id: OrderNumber,
    pub status: ReturnStatus,
    #[serde(default)]
    pub items: Vec<ReturnItem>,
    #[serde(default)]
    pub return_reason_text: String,
    pub refund_method: RefundMethod,
    #[serde(with = "money::as_decimal")]
    pub refund_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Reasons offered on the return form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnReason {
    Damaged,
    WrongItem,
    NotAsDescribed,
    SizeIssue,
    QualityIssue,
    ChangedMind,
    Other,
}

impl ReturnReason {
    /// Every reason, in form order.
    pub const ALL: [ReturnReason; 7] = [
        ReturnReason::Damaged,
        ReturnReason::WrongItem,
        ReturnReason::NotAsDescribed,
        ReturnReason::SizeIssue,
        ReturnReason::QualityIssue,
        ReturnReason::ChangedMind,
        ReturnReason::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReturnReason::Damaged => "Damaged or defective product",
            ReturnReason::WrongItem => "Wrong item delivered",
            ReturnReason::NotAsDescribed => "Product not as described",
            ReturnReason::SizeIssue => "Size or fit issue",
            ReturnReason::QualityIssue => "Quality not as expected",
            ReturnReason::ChangedMind => "Changed my mind",
            ReturnReason::Other => "Other",
        }
    }
}

/// Reason string sent with a return: the selected label, then the
/// customer's comment after " - " when there is one.
pub fn compose_return_reason(reason: ReturnReason, comment: Option<&str>) -> String {
    match comment.map(str::trim).filter(|c| !c.is_empty()) {
        Some(comment) => format!("{} - {}", reason.label(), comment),
        None => reason.label().to_string(),
    }
}

/// Body of `PATCH /returns/:id/cancel`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CancelReturn {
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_return_reason() {
        assert_eq!(
            compose_return_reason(ReturnReason::SizeIssue, Some("  too tight ")),
            "Size or fit issue - too tight"
        );
        assert_eq!(
            compose_return_reason(ReturnReason::Damaged, Some("   ")),
            "Damaged or defective product"
        );
        assert_eq!(compose_return_reason(ReturnReason::Other, None), "Other");
    }

    #[test]
    fn test_return_request_deserializes() {
        let json = r#"{
            "returnId": "RET-7",
            "orderId": "ORD-1001",
            "status": "pickup_scheduled",
            "items": [{"productId": "p1", "name": "Tee", "quantity": 1, "price": 400}],
            "returnReasonText": "Size or fit issue",
            "refundMethod": "original_payment",
            "refundAmount": 400
        }"#;
        let request: ReturnRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, ReturnStatus::PickupScheduled);
        assert_eq!(request.refund_method, RefundMethod::OriginalPayment);
        assert!(!request.status.is_terminal());
    }
}
