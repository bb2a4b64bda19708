//! Checkout flow state machine.
//!
//! Three steps, address -> summary -> payment. Moving forward is gated by
//! per-step validation; moving back is always an explicit action. Placing the
//! order is the terminal action of the payment step and the only one that
//! writes remotely, so it is guarded against re-entry while in flight.

use crate::cart::{compute_totals, CartItem, CartPricing, LineItem};
use crate::checkout::{preferred_address, Address, NewOrder, OrderItem, PaymentMethod};
use crate::ids::{AddressId, ProductId, UserId};
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutStep {
    /// Delivery address selection.
    #[default]
    Address,
    /// Read-only order review.
    Summary,
    /// Payment method and order placement.
    Payment,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "address",
            CheckoutStep::Summary => "summary",
            CheckoutStep::Payment => "payment",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "Address",
            CheckoutStep::Summary => "Order Summary",
            CheckoutStep::Payment => "Payment",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Address => 1,
            CheckoutStep::Summary => 2,
            CheckoutStep::Payment => 3,
        }
    }
}

/// Which cart lines a checkout covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CheckoutScope {
    /// Everything in the cart.
    #[default]
    All,
    /// Only these products ("buy now" or a partial selection).
    Items(Vec<ProductId>),
}

impl CheckoutScope {
    /// Check whether a product is part of this checkout.
    pub fn includes(&self, product_id: &ProductId) -> bool {
        match self {
            CheckoutScope::All => true,
            CheckoutScope::Items(ids) => ids.contains(product_id),
        }
    }

    /// The cart lines this checkout covers, in cart order.
    pub fn select<'a>(&self, cart: &'a [CartItem]) -> Vec<&'a CartItem> {
        cart.iter()
            .filter(|item| self.includes(item.product_id()))
            .collect()
    }
}

/// Checkout flow state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CheckoutFlow {
    /// Current step.
    pub step: CheckoutStep,
    /// Lines being checked out.
    pub scope: CheckoutScope,
    /// Chosen delivery address.
    pub selected_address_id: Option<AddressId>,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
    /// An order placement is in flight.
    pub is_processing: bool,
}

impl CheckoutFlow {
    /// Create a new checkout flow.
    pub fn new(scope: CheckoutScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Check out a single product.
    pub fn buy_now(product_id: ProductId) -> Self {
        Self::new(CheckoutScope::Items(vec![product_id]))
    }

    /// Apply a freshly loaded address list.
    ///
    /// Keeps the user's choice while it still exists; otherwise picks the
    /// first default address, or the first address.
    pub fn on_addresses_loaded(&mut self, addresses: &[Address]) -> Option<&AddressId> {
        let still_present = self
            .selected_address_id
            .as_ref()
            .is_some_and(|id| addresses.iter().any(|a| &a.id == id));

        if !still_present {
            self.selected_address_id = preferred_address(addresses).map(|a| a.id.clone());
            debug!(
                address_id = ?self.selected_address_id,
                "checkout address auto-selected"
            );
        }
        self.selected_address_id.as_ref()
    }

    /// Choose the delivery address.
    pub fn select_address(&mut self, address_id: AddressId) {
        self.selected_address_id = Some(address_id);
    }

    /// Choose the payment method.
    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Check if the current step's requirements are met.
    pub fn can_advance(&self) -> bool {
        match self.step {
            CheckoutStep::Address => self.selected_address_id.is_some(),
            CheckoutStep::Summary => true,
            CheckoutStep::Payment => false,
        }
    }

    /// Advance to the next step.
    pub fn advance(&mut self) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step {
            CheckoutStep::Address => {
                if self.selected_address_id.is_none() {
                    return Err(CommerceError::CheckoutIncomplete(
                        "delivery address".to_string(),
                    ));
                }
                CheckoutStep::Summary
            }
            CheckoutStep::Summary => CheckoutStep::Payment,
            CheckoutStep::Payment => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: "payment".to_string(),
                    to: "none".to_string(),
                })
            }
        };

        debug!(from = self.step.as_str(), to = next.as_str(), "checkout advanced");
        self.step = next;
        Ok(next)
    }

    /// Go back to the previous step.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step {
            CheckoutStep::Address => {
                return Err(CommerceError::InvalidCheckoutTransition {
                    from: "address".to_string(),
                    to: "none".to_string(),
                })
            }
            CheckoutStep::Summary => CheckoutStep::Address,
            CheckoutStep::Payment => CheckoutStep::Summary,
        };

        debug!(from = self.step.as_str(), to = prev.as_str(), "checkout went back");
        self.step = prev;
        Ok(prev)
    }

    /// Claim the in-flight slot for an order placement.
    pub fn begin_processing(&mut self) -> Result<(), CommerceError> {
        if self.is_processing {
            return Err(CommerceError::AlreadyProcessing);
        }
        self.is_processing = true;
        Ok(())
    }

    /// Release the in-flight slot.
    pub fn finish_processing(&mut self) {
        self.is_processing = false;
    }

    /// Stop early when the chosen method cannot pay yet.
    pub fn ensure_payment_supported(&self) -> Result<(), CommerceError> {
        if self.payment_method.is_supported() {
            Ok(())
        } else {
            Err(CommerceError::PaymentMethodUnsupported(
                self.payment_method.display_name().to_string(),
            ))
        }
    }

    /// Pricing of the lines in scope, shown on the summary step.
    pub fn pricing(&self, cart: &[CartItem]) -> Result<CartPricing, CommerceError> {
        let lines: Vec<LineItem> = self
            .scope
            .select(cart)
            .into_iter()
            .map(CartItem::line_item)
            .collect();
        compute_totals(&lines)
    }

    /// Build the order-creation payload.
    ///
    /// Only valid on the payment step, with a selected address that is in
    /// `addresses` and at least one cart line in scope.
    pub fn build_order(
        &self,
        user_id: &UserId,
        addresses: &[Address],
        cart: &[CartItem],
    ) -> Result<NewOrder, CommerceError> {
        if self.step != CheckoutStep::Payment {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: "order".to_string(),
            });
        }

        let address = self
            .selected_address_id
            .as_ref()
            .and_then(|id| addresses.iter().find(|a| &a.id == id))
            .ok_or_else(|| CommerceError::CheckoutIncomplete("delivery address".to_string()))?;

        let lines = self.scope.select(cart);
        if lines.is_empty() {
            return Err(CommerceError::CheckoutIncomplete("items".to_string()));
        }

        Ok(NewOrder {
            user_id: user_id.clone(),
            items: lines.iter().map(|item| OrderItem::from_cart_item(item)).collect(),
            delivery_address: address.clone(),
            payment_method: self.payment_method,
            pricing: self.pricing(cart)?,
        })
    }
}
