//! Display projection of order and return statuses.
//!
//! Everything here is a pure function of the raw status string and is total:
//! unknown statuses get a gray title-cased label and no timeline position,
//! so a server that grows new statuses never breaks rendering.

use crate::checkout::{Order, OrderStatus};
use crate::returns::{ReturnRequest, ReturnStatus};
use serde::{Deserialize, Serialize};

/// Ordered stages of the order timeline.
pub const ORDER_TIMELINE: [&str; 5] = ["pending", "confirmed", "processing", "shipped", "delivered"];

/// Ordered stages of the return timeline (the happy path).
pub const RETURN_TIMELINE: [&str; 8] = [
    "requested",
    "approved",
    "pickup_scheduled",
    "picked_up",
    "received",
    "inspected",
    "refund_initiated",
    "refund_completed",
];

/// Badge colour for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusColor {
    Amber,
    Blue,
    Indigo,
    Purple,
    Teal,
    Green,
    Red,
    Gray,
}

impl StatusColor {
    /// Hex value used by the default theme.
    pub fn hex(&self) -> &'static str {
        match self {
            StatusColor::Amber => "#F59E0B",
            StatusColor::Blue => "#3B82F6",
            StatusColor::Indigo => "#6366F1",
            StatusColor::Purple => "#8B5CF6",
            StatusColor::Teal => "#14B8A6",
            StatusColor::Green => "#10B981",
            StatusColor::Red => "#EF4444",
            StatusColor::Gray => "#6B7280",
        }
    }
}

/// Where a stage sits relative to the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageState {
    Completed,
    Active,
    Upcoming,
}

/// One rendered timeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineStage {
    pub status: &'static str,
    pub label: String,
    pub state: StageState,
}

/// Human label for an order or return status.
pub fn status_label(status: &str) -> String {
    let known = match status {
        "pending" => "Pending",
        "confirmed" => "Confirmed",
        "processing" => "Processing",
        "shipped" => "Shipped",
        "delivered" => "Delivered",
        "cancelled" => "Cancelled",
        "requested" => "Return Requested",
        "approved" => "Approved",
        "rejected" => "Rejected",
        "pickup_scheduled" => "Pickup Scheduled",
        "picked_up" => "Picked Up",
        "received" => "Received",
        "inspected" => "Inspected",
        "refund_initiated" => "Refund Initiated",
        "refund_completed" => "Refund Completed",
        other => return title_case(other),
    };
    known.to_string()
}

/// Badge colour for an order or return status.
pub fn status_color(status: &str) -> StatusColor {
    match status {
        "pending" | "requested" => StatusColor::Amber,
        "confirmed" | "approved" => StatusColor::Blue,
        "processing" | "pickup_scheduled" | "picked_up" => StatusColor::Indigo,
        "shipped" | "received" | "inspected" => StatusColor::Purple,
        "refund_initiated" => StatusColor::Teal,
        "delivered" | "refund_completed" => StatusColor::Green,
        "cancelled" | "rejected" => StatusColor::Red,
        _ => StatusColor::Gray,
    }
}

/// Index of an order status on the order timeline, or -1 when it is not a
/// timeline stage.
pub fn order_timeline_position(status: &str) -> i32 {
    position_in(&ORDER_TIMELINE, status)
}

/// Index of a return status on the return timeline, or -1.
pub fn return_timeline_position(status: &str) -> i32 {
    position_in(&RETURN_TIMELINE, status)
}

/// Render a timeline: stages before the current one are completed, the
/// current one is active. A status off the timeline marks nothing.
pub fn timeline(stages: &[&'static str], status: &str) -> Vec<TimelineStage> {
    let current = position_in(stages, status);
    stages
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            let index = index as i32;
            let state = if current < 0 || index > current {
                StageState::Upcoming
            } else if index == current {
                StageState::Active
            } else {
                StageState::Completed
            };
            TimelineStage {
                status: stage,
                label: status_label(stage),
                state,
            }
        })
        .collect()
}

/// A return can be requested once the order has shipped.
pub fn can_return_order(order: &Order) -> bool {
    matches!(order.status, OrderStatus::Delivered | OrderStatus::Shipped)
}

/// An order can be cancelled until it ships.
pub fn can_cancel_order(order: &Order) -> bool {
    matches!(
        order.status,
        OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
    )
}

/// A return can be withdrawn until pickup is scheduled.
pub fn can_cancel_return(request: &ReturnRequest) -> bool {
    matches!(
        request.status,
        ReturnStatus::Requested | ReturnStatus::Approved
    )
}

fn position_in(stages: &[&str], status: &str) -> i32 {
    stages
        .iter()
        .position(|s| *s == status)
        .map(|i| i as i32)
        .unwrap_or(-1)
}

fn title_case(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl OrderStatus {
    pub fn label(&self) -> String {
        status_label(self.as_str())
    }

    pub fn color(&self) -> StatusColor {
        status_color(self.as_str())
    }

    pub fn timeline_position(&self) -> i32 {
        order_timeline_position(self.as_str())
    }
}

impl ReturnStatus {
    pub fn label(&self) -> String {
        status_label(self.as_str())
    }

    pub fn color(&self) -> StatusColor {
        status_color(self.as_str())
    }

    pub fn timeline_position(&self) -> i32 {
        return_timeline_position(self.as_str())
    }
}
