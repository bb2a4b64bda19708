//! Store errors.

use storefront_auth::AuthError;
use storefront_cache::CacheError;
use storefront_commerce::CommerceError;
use storefront_data::ApiError;
use thiserror::Error;

/// Failure of a store action.
///
/// Every variant renders as the message a UI shows; stores also keep that
/// message on their `error` field.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A local rule rejected the action before any request was sent.
    #[error("{0}")]
    Commerce(#[from] CommerceError),

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Sign-in, sign-up or session failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Local persistence failed.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// The action needs a signed-in user.
    #[error("Please sign in to continue")]
    NotSignedIn,

    /// The referenced record is not in the current state.
    #[error("{0} not found")]
    NotFound(String),
}

impl StoreError {
    /// The string a UI shows for this error.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Api(e) => e.user_message(),
            StoreError::Auth(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Whether the action was rejected before reaching the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            StoreError::Commerce(_) | StoreError::NotSignedIn | StoreError::NotFound(_)
        )
    }
}
