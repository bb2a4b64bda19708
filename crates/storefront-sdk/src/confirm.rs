//! Destructive actions that wait for the user to confirm.
//!
//! A UI builds a [`PendingAction`], shows its prompt, and only on approval
//! hands it to [`Storefront::confirm`](crate::Storefront::confirm). Nothing
//! is sent to the server before that.

use storefront_commerce::ids::{AddressId, ProductId, ReturnId};

/// An action held back behind a confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    RemoveCartItem {
        product_id: ProductId,
        product_name: String,
    },
    ClearWishlist,
    CancelReturn {
        return_id: ReturnId,
        reason: String,
    },
    DeleteAddress {
        address_id: AddressId,
        label: String,
    },
}

impl PendingAction {
    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::RemoveCartItem { .. } => "Remove Item",
            PendingAction::ClearWishlist => "Clear Wishlist",
            PendingAction::CancelReturn { .. } => "Cancel Return",
            PendingAction::DeleteAddress { .. } => "Delete Address",
        }
    }

    /// The question put to the user.
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::RemoveCartItem { product_name, .. } => {
                format!("Remove {} from your cart?", product_name)
            }
            PendingAction::ClearWishlist => {
                "Remove all items from your wishlist?".to_string()
            }
            PendingAction::CancelReturn { return_id, .. } => {
                format!("Cancel return request {}?", return_id)
            }
            PendingAction::DeleteAddress { label, .. } => {
                format!("Delete the address \"{}\"?", label)
            }
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            PendingAction::RemoveCartItem { .. } => "Remove",
            PendingAction::ClearWishlist => "Clear",
            PendingAction::CancelReturn { .. } => "Cancel Return",
            PendingAction::DeleteAddress { .. } => "Delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts() {
        let remove = PendingAction::RemoveCartItem {
            product_id: ProductId::new("p1"),
            product_name: "Linen Shirt".to_string(),
        };
        assert_eq!(remove.prompt(), "Remove Linen Shirt from your cart?");
        assert_eq!(remove.confirm_label(), "Remove");

        let cancel = PendingAction::CancelReturn {
            return_id: ReturnId::new("RET-9"),
            reason: "Changed my mind".to_string(),
        };
        assert_eq!(cancel.prompt(), "Cancel return request RET-9?");
        assert_eq!(cancel.title(), "Cancel Return");

        let delete = PendingAction::DeleteAddress {
            address_id: AddressId::new("a1"),
            label: "Home".to_string(),
        };
        assert_eq!(delete.prompt(), "Delete the address \"Home\"?");
        assert_eq!(PendingAction::ClearWishlist.title(), "Clear Wishlist");
    }
}
