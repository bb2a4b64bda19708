//! Prelude for convenient imports.
//!
//! ```rust
//! use storefront_sdk::prelude::*;
//! ```

pub use storefront_commerce::prelude::*;

pub use storefront_auth::{AuthState, Credentials, Role, SignupRequest, User};
pub use storefront_cache::{FileStore, KeyValueStore, MemoryStore};
pub use storefront_data::{ApiConfig, ApiError, Platform, RetryPolicy, SessionContext};

pub use crate::api::ProfileUpdate;
pub use crate::checkout::{CheckoutController, OrderConfirmation, Route};
pub use crate::confirm::PendingAction;
pub use crate::error::StoreError;
pub use crate::store::{CartStore, OrdersStore, ProfileStore, ReturnsStore, WishlistStore};
pub use crate::telemetry::{init_logging, LogFormat};
pub use crate::theme::{Theme, ThemeMode};
pub use crate::Storefront;
