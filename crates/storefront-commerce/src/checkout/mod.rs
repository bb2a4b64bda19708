//! Checkout module.
//!
//! Contains addresses, the checkout step machine, orders and payments.

mod address;
mod flow;
mod order;
mod payment;

pub use address::{mark_default, preferred_address, Address, AddressDraft, AddressType};
pub use flow::{CheckoutFlow, CheckoutScope, CheckoutStep};
pub use order::{NewOrder, Order, OrderItem, OrderPayment, OrderStatus, OrderStatusUpdate};
pub use payment::{PaymentMethod, PaymentReceipt, PaymentRequest, PaymentStatus, RefundRequest};
