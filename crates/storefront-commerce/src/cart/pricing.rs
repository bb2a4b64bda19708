//! Cart pricing calculations.
//!
//! Pure functions over `(unit price, quantity)` pairs. The same breakdown is
//! shown in the cart, snapshotted into the order payload, and recomputed after
//! every cart reconciliation.

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::money::{self, Currency, Money};
use serde::{Deserialize, Serialize};

/// Subtotal (in base units) from which delivery is free.
pub const FREE_DELIVERY_THRESHOLD: i64 = 1000;

/// Flat delivery fee (in base units) below the threshold.
pub const DELIVERY_CHARGE: i64 = 50;

/// A priced quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem {
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item.
    pub fn new(unit_price: Money, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }

    /// Unit price times quantity.
    pub fn total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

/// Pricing breakdown for a cart or an order.
///
/// Serialized as the order payload's `pricing` object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartPricing {
    /// Sum of unit price times quantity.
    #[serde(with = "money::as_decimal")]
    pub subtotal: Money,
    /// Discount; there is no coupon engine so this is always zero.
    #[serde(with = "money::as_decimal")]
    pub discount: Money,
    /// Delivery fee.
    #[serde(with = "money::as_decimal")]
    pub delivery_charge: Money,
    /// subtotal - discount + delivery_charge.
    #[serde(with = "money::as_decimal")]
    pub total: Money,
}

impl CartPricing {
    /// Price a list of cart lines.
    pub fn for_items(items: &[CartItem]) -> Result<Self, CommerceError> {
        let lines: Vec<LineItem> = items.iter().map(CartItem::line_item).collect();
        compute_totals(&lines)
    }

    /// Pricing of an empty cart.
    pub fn empty() -> Self {
        let zero = Money::zero(Currency::default());
        let delivery = delivery_charge_for(&zero);
        Self {
            subtotal: zero,
            discount: zero,
            delivery_charge: delivery,
            total: delivery,
        }
    }

    /// Whether the order ships free.
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_charge.is_zero()
    }

    /// How much more has to be added to reach free delivery.
    pub fn remaining_for_free_delivery(&self) -> Money {
        let threshold = Money::from_major(FREE_DELIVERY_THRESHOLD, self.subtotal.currency);
        let gap = threshold.amount_minor - self.subtotal.amount_minor;
        Money::new(gap.max(0), self.subtotal.currency)
    }
}

impl Default for CartPricing {
    fn default() -> Self {
        Self::empty()
    }
}

/// Delivery fee for a subtotal: free at or above the threshold.
pub fn delivery_charge_for(subtotal: &Money) -> Money {
    let threshold = Money::from_major(FREE_DELIVERY_THRESHOLD, subtotal.currency);
    if subtotal.amount_minor >= threshold.amount_minor {
        Money::zero(subtotal.currency)
    } else {
        Money::from_major(DELIVERY_CHARGE, subtotal.currency)
    }
}

/// Compute subtotal, delivery charge and total.
///
/// An empty list is priced like any other subtotal below the threshold:
/// subtotal 0, delivery 50, total 50.
pub fn compute_totals(items: &[LineItem]) -> Result<CartPricing, CommerceError> {
    let currency = items
        .first()
        .map(|item| item.unit_price.currency)
        .unwrap_or_default();

    let mut subtotal = Money::zero(currency);
    for item in items {
        if item.unit_price.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }
        subtotal = subtotal
            .try_add(&item.total()?)
            .ok_or(CommerceError::Overflow)?;
    }

    let discount = Money::zero(currency);
    let delivery_charge = delivery_charge_for(&subtotal);
    let total = subtotal
        .try_subtract(&discount)
        .and_then(|m| m.try_add(&delivery_charge))
        .ok_or(CommerceError::Overflow)?;

    Ok(CartPricing {
        subtotal,
        discount,
        delivery_charge,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inr(amount: i64) -> Money {
        Money::from_major(amount, Currency::INR)
    }

    #[test]
    fn test_subtotal_is_exact_sum() {
        let items = vec![
            LineItem::new(inr(250), 2),
            LineItem::new(Money::new(19_999, Currency::INR), 3),
        ];
        let pricing = compute_totals(&items).unwrap();
        assert_eq!(pricing.subtotal.amount_minor, 50_000 + 59_997);
        assert!(pricing.discount.is_zero());
    }

    #[test]
    fn test_free_delivery_boundary() {
        let below = compute_totals(&[LineItem::new(inr(999), 1)]).unwrap();
        assert_eq!(below.delivery_charge, inr(50));
        assert_eq!(below.total, inr(1049));

        let at = compute_totals(&[LineItem::new(inr(500), 2)]).unwrap();
        assert_eq!(at.subtotal, inr(1000));
        assert_eq!(at.delivery_charge, inr(0));
        assert_eq!(at.total, inr(1000));
    }

    #[test]
    fn test_empty_cart_still_charges_delivery() {
        let pricing = compute_totals(&[]).unwrap();
        assert_eq!(pricing.subtotal, inr(0));
        assert_eq!(pricing.delivery_charge, inr(50));
        assert_eq!(pricing.total, inr(50));
        assert_eq!(pricing, CartPricing::empty());
    }

    #[test]
    fn test_total_equals_subtotal_plus_delivery() {
        for (price, qty) in [(0, 0), (1, 1), (333, 3), (999, 1), (1001, 1), (10, 250)] {
            let pricing = compute_totals(&[LineItem::new(inr(price), qty)]).unwrap();
            let subtotal = price * i64::from(qty);
            let expected_delivery = if subtotal >= 1000 { 0 } else { 50 };
            assert_eq!(pricing.subtotal, inr(subtotal));
            assert_eq!(pricing.delivery_charge, inr(expected_delivery));
            assert_eq!(pricing.total, inr(subtotal + expected_delivery));
        }
    }

    #[test]
    fn test_currency_mismatch_is_rejected() {
        let items = vec![
            LineItem::new(inr(10), 1),
            LineItem::new(Money::from_major(10, Currency::USD), 1),
        ];
        assert!(matches!(
            compute_totals(&items),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_overflow_is_reported() {
        let items = vec![LineItem::new(Money::new(i64::MAX, Currency::INR), 2)];
        assert_eq!(compute_totals(&items), Err(CommerceError::Overflow));
    }

    #[test]
    fn test_remaining_for_free_delivery() {
        let pricing = compute_totals(&[LineItem::new(inr(800), 1)]).unwrap();
        assert_eq!(pricing.remaining_for_free_delivery(), inr(200));
        assert!(!pricing.has_free_delivery());
    }

    #[test]
    fn test_pricing_serializes_camel_case() {
        let pricing = compute_totals(&[LineItem::new(inr(999), 1)]).unwrap();
        let json = serde_json::to_value(pricing).unwrap();
        assert_eq!(json["subtotal"], 999);
        assert_eq!(json["discount"], 0);
        assert_eq!(json["deliveryCharge"], 50);
        assert_eq!(json["total"], 1049);
    }
}
