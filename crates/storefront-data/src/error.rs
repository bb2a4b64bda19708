//! Error types for remote calls and configuration.

use thiserror::Error;

/// Message shown when no response was received.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Failure of a remote call, normalized for display.
///
/// The `Display` output of every variant is the string a UI shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received. The detail is for logs only.
    #[error("Network error. Please check your connection.")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out. Please try again.")]
    Timeout,

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The server rejected the bearer token. The shared session has
    /// already been cleared when this is returned.
    #[error("{message}")]
    Unauthorized { message: String },

    /// The response body did not match the expected shape.
    #[error("Unexpected response from server.")]
    Decode(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build the error for a non-success response.
    ///
    /// Uses the JSON body's `message` field verbatim, falling back to the
    /// status code when the body has none.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = server_message(body)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Server { status, message }
        }
    }

    /// The string a UI shows for this error.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_builder() {
            ApiError::InvalidRequest(e.to_string())
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Invalid API configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting could not be parsed.
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: String, value: String },

    /// The base URL is empty or not http(s).
    #[error("Invalid base URL: {0:?}")]
    InvalidBaseUrl(String),

    /// The TOML document is malformed.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}
