//! Commerce error types.

use thiserror::Error;

/// Errors raised by local commerce rules, before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// An order placement is already in flight.
    #[error("Order placement already in progress")]
    AlreadyProcessing,

    /// Payment method is selectable but cannot be used to pay yet.
    #[error("{0} payments are not yet supported")]
    PaymentMethodUnsupported(String),

    /// Order status does not allow a return.
    #[error("Orders that are {status} cannot be returned")]
    ReturnNotAllowed { status: String },

    /// Status does not allow cancellation.
    #[error("Cannot cancel while {status}")]
    CancelNotAllowed { status: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Validation error.
    #[error("{0}")]
    ValidationError(String),
}

impl CommerceError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        CommerceError::ValidationError(message.into())
    }
}
