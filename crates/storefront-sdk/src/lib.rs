//! # Storefront SDK
//!
//! Client core for a shopping storefront: typed resource clients, state
//! stores, checkout and the signed-in session, behind one [`Storefront`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use storefront_sdk::prelude::*;
//!
//! # async fn run() -> Result<(), StoreError> {
//! init_logging(LogFormat::Pretty);
//!
//! let config = ApiConfig::for_platform(Platform::current());
//! let mut store = Storefront::new(&config, MemoryStore::new())?;
//! if !store.start().await {
//!     store.login(Credentials::new("asha@example.in", "secret1")).await?;
//! }
//!
//! store.add_to_cart(&ProductId::new("p-101"), 2, None, None).await?;
//! println!("total {}", store.cart.pricing().total.display());
//!
//! store.profile.fetch_addresses().await?;
//! let mut checkout = store.checkout(CheckoutScope::All);
//! checkout.flow_mut().on_addresses_loaded(store.profile.addresses());
//! checkout.flow_mut().advance()?;
//! checkout.flow_mut().advance()?;
//! let confirmation = store.place_order(&mut checkout).await?;
//! println!("placed {}", confirmation.order_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! - [`api`]: one client per backend resource, thin over `HttpClient`
//! - [`store`]: cart, wishlist, orders, returns and profile slices
//! - [`checkout`]: order placement
//! - [`confirm`]: destructive actions held behind a prompt
//! - [`theme`]: light and dark tokens
//! - [`telemetry`]: `tracing` subscriber setup

pub mod api;
pub mod checkout;
pub mod confirm;
pub mod error;
pub mod prelude;
pub mod store;
pub mod telemetry;
pub mod theme;

mod storefront;

pub use checkout::{CheckoutController, OrderConfirmation, Route};
pub use confirm::PendingAction;
pub use error::StoreError;
pub use storefront::Storefront;
pub use telemetry::{init_logging, LogFormat};
pub use theme::{Theme, ThemeMode};

pub use storefront_auth;
pub use storefront_cache;
pub use storefront_commerce;
pub use storefront_data;
