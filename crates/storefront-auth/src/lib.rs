//! Authentication for the storefront client.
//!
//! Provides the user record, credential validation, the auth resource
//! client and the session lifecycle (restore, login, signup, logout).

mod client;
mod error;
mod session;
mod user;

pub use client::{AuthClient, AuthResponse};
pub use error::AuthError;
pub use session::{AuthSession, AuthState};
pub use user::{Credentials, Role, SignupRequest, User, MIN_PASSWORD_LEN};
