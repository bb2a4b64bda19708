//! Shopping cart module.
//!
//! Contains cart lines, the pricing engine and the list reconciliation
//! contract shared by the cart and wishlist stores.

mod cart;
mod pricing;
mod reconcile;

pub use cart::CartItem;
pub use pricing::{
    compute_totals, delivery_charge_for, CartPricing, LineItem, DELIVERY_CHARGE,
    FREE_DELIVERY_THRESHOLD,
};
pub use reconcile::{Reconcile, ReplaceWholesale};
