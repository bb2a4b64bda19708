//! Key-scoped async persistence for the storefront client.
//!
//! Holds the handful of values that survive a restart: the auth token, the
//! cached user, a best-effort cart snapshot, the theme mode and the
//! onboarding flag. Storage backends implement [`KeyValueStore`]; [`Cache`]
//! layers typed JSON access on top.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::{Cache, MemoryStore, StorageKey};
//!
//! # async fn run() -> Result<(), storefront_cache::CacheError> {
//! let cache = Cache::new(MemoryStore::new());
//! cache.set(StorageKey::OnboardingComplete, &true).await?;
//! let done: Option<bool> = cache.get(StorageKey::OnboardingComplete).await?;
//! assert_eq!(done, Some(true));
//! # Ok(())
//! # }
//! ```

mod error;
mod key;
mod kv;
mod store;

pub use error::CacheError;
pub use key::StorageKey;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore, StorageKey};
}
