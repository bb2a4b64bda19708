//! State stores.
//!
//! A store owns one slice of client state (cart, wishlist, orders, returns,
//! profile). Actions take `&mut self`, so one caller at a time drives a
//! slice. Every action follows the same discipline: the request goes out,
//! a successful response replaces the slice, a failure leaves the slice as
//! it was and records the message on `error`.

mod cart;
mod orders;
mod profile;
mod returns;
mod wishlist;

pub use cart::CartStore;
pub use orders::OrdersStore;
pub use profile::ProfileStore;
pub use returns::ReturnsStore;
pub use wishlist::WishlistStore;

use crate::StoreError;

/// Loading flag and last error of a slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceStatus {
    is_loading: bool,
    error: Option<String>,
}

impl SliceStatus {
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Message of the last failed action, cleared when the next one starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self) {
        self.is_loading = false;
    }

    /// Record a failure and hand the error back for the caller.
    pub(crate) fn fail(
        &mut self,
        slice: &'static str,
        action: &'static str,
        err: impl Into<StoreError>,
    ) -> StoreError {
        let err = err.into();
        self.is_loading = false;
        self.error = Some(err.user_message());
        if err.is_local() {
            tracing::debug!(slice, action, error = %err, "action rejected locally");
        } else {
            tracing::warn!(slice, action, error = %err, "action failed");
        }
        err
    }
}
