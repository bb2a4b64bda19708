//! Authentication errors.

use storefront_cache::CacheError;
use storefront_data::ApiError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The auth resource failed. Server messages are kept verbatim.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisted credentials could not be read or written.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// The user record has no usable identifier.
    #[error("user record has neither `id` nor `_id`")]
    MissingUserId,
}

impl AuthError {
    /// The string a UI shows for this error.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    /// Check if this is a credential failure reported by the server.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, AuthError::Api(e) if e.is_unauthorized())
    }
}
