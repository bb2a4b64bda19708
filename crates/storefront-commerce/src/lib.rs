//! Storefront domain types and rules.
//!
//! This crate holds everything the storefront client decides locally, with
//! no I/O:
//!
//! - **Catalog**: Products, reviews, local filtering and sorting
//! - **Cart**: Cart lines, the pricing engine, list reconciliation
//! - **Checkout**: Addresses, the checkout step machine, orders, payments
//! - **Returns**: Return requests and return reasons
//! - **Status**: Display projection of order and return statuses
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let lines = vec![
//!     LineItem::new(Money::from_major(499, Currency::INR), 2),
//!     LineItem::new(Money::from_major(1, Currency::INR), 1),
//! ];
//! let pricing = compute_totals(&lines).unwrap();
//! assert_eq!(pricing.delivery_charge.display(), "\u{20b9}50");
//! assert_eq!(pricing.total.display(), "\u{20b9}1,049");
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod ids;
pub mod money;
pub mod validation;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod returns;
pub mod status;
pub mod wishlist;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, ProductFilter, Review, ReviewSubmission, SortOption};

    // Cart
    pub use crate::cart::{
        compute_totals, CartItem, CartPricing, LineItem, Reconcile, ReplaceWholesale,
        DELIVERY_CHARGE, FREE_DELIVERY_THRESHOLD,
    };

    // Checkout
    pub use crate::checkout::{
        Address, AddressDraft, AddressType, CheckoutFlow, CheckoutScope, CheckoutStep, NewOrder,
        Order, OrderItem, OrderPayment, OrderStatus, PaymentMethod, PaymentReceipt,
        PaymentRequest, PaymentStatus,
    };

    // Returns
    pub use crate::returns::{
        compose_return_reason, RefundMethod, ReturnItem, ReturnReason, ReturnRequest, ReturnStatus,
    };

    // Status projection
    pub use crate::status::{
        can_cancel_order, can_cancel_return, can_return_order, status_color, status_label,
        StatusColor,
    };

    // Wishlist
    pub use crate::wishlist::{NewWishlistItem, WishlistItem};
}
