//! HTTP plumbing for the storefront API.
//!
//! This crate provides:
//! - `ApiConfig` - Base URL, timeout and retry settings (env, TOML, platform defaults)
//! - `SessionContext` - The bearer token shared by every resource client
//! - `HttpClient` - reqwest wrapper that attaches the token and normalizes errors
//! - `RetryPolicy` - Exponential backoff for idempotent reads
//! - `ApiError` - The single error-message contract for remote calls

mod client;
mod config;
mod error;
mod retry;
mod session;

pub use client::*;
pub use config::*;
pub use error::*;
pub use retry::*;
pub use session::*;
