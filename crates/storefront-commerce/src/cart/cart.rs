//! Cart line type.

use crate::cart::LineItem;
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line in the remote cart.
///
/// The quantity is always at least one: the server drops lines instead of
/// storing zero, and the store turns a non-positive update into a removal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product snapshot as returned by the cart resource.
    pub product: Product,
    /// Quantity.
    pub quantity: u32,
    /// Selected size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Selected color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartItem {
    /// Create a line.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity,
            size: None,
            color: None,
        }
    }

    /// Product ID of this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Pricing input for this line.
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.product.price, self.quantity)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.line_item().total()
    }

    /// Variant label (e.g., "M / Blue").
    pub fn variant_label(&self) -> Option<String> {
        match (&self.size, &self.color) {
            (Some(size), Some(color)) => Some(format!("{} / {}", size, color)),
            (Some(size), None) => Some(size.clone()),
            (None, Some(color)) => Some(color.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_deserializes() {
        let json = r#"{
            "product": {"_id": "p1", "name": "Tee", "price": 399.5},
            "quantity": 2,
            "size": "M"
        }"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.product_id().as_str(), "p1");
        assert_eq!(item.line_total().unwrap().amount_minor, 79_900);
        assert_eq!(item.variant_label().as_deref(), Some("M"));
    }
}
