//! API client configuration.
//!
//! Resolution order: platform default, then an optional TOML file, then
//! environment variables.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::retry::RetryPolicy;

pub const ENV_API_URL: &str = "STOREFRONT_API_URL";
pub const ENV_TIMEOUT_MS: &str = "STOREFRONT_API_TIMEOUT_MS";
pub const ENV_RETRY_ATTEMPTS: &str = "STOREFRONT_RETRY_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "STOREFRONT_RETRY_DELAY_MS";

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1_000;

/// Platform the client runs on. Decides the fallback base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Web,
    Desktop,
}

impl Platform {
    /// Platform of the current build target.
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else {
            Platform::Desktop
        }
    }

    /// Base URL used when nothing else is configured.
    ///
    /// The Android emulator reaches the host machine through `10.0.2.2`.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Platform::Android => "http://10.0.2.2:5000/api",
            Platform::Ios | Platform::Web | Platform::Desktop => "http://localhost:5000/api",
        }
    }
}

/// Settings for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retry policy for reads.
    pub retry: RetryPolicy,
}

/// On-disk form of [`ApiConfig`]. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiConfigFile {
    base_url: Option<String>,
    timeout_ms: Option<u64>,
    retry_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
}

impl ApiConfig {
    /// Defaults for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            base_url: platform.default_base_url().to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry: RetryPolicy::exponential(
                DEFAULT_RETRY_ATTEMPTS,
                Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            ),
        }
    }

    /// Explicit base URL with default timeout and retry.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::for_platform(Platform::current()).with_base_url(base_url)
    }

    /// Replace the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url.into())?;
        Ok(self)
    }

    /// Replace the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Platform defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::for_platform(Platform::current()).apply_env(|key| std::env::var(key).ok())
    }

    /// Parse a TOML document on top of the current platform defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ApiConfigFile = toml::from_str(source)?;
        Self::for_platform(Platform::current()).apply_file(file)
    }

    /// Load an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = Self::for_platform(Platform::current());
        if let Some(path) = path {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let file: ApiConfigFile = toml::from_str(&source)
                .map_err(ConfigError::from)
                .with_context(|| format!("parsing {}", path.display()))?;
            config = config.apply_file(file)?;
        }
        let config = config.apply_env(|key| std::env::var(key).ok())?;
        tracing::debug!(
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            retry_attempts = config.retry.max_attempts,
            "api config loaded"
        );
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_env<F>(self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = ApiConfigFile {
            base_url: lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()),
            timeout_ms: parse_var(&lookup, ENV_TIMEOUT_MS)?,
            retry_attempts: parse_var(&lookup, ENV_RETRY_ATTEMPTS)?,
            retry_delay_ms: parse_var(&lookup, ENV_RETRY_DELAY_MS)?,
        };
        self.apply_file(file)
    }

    fn apply_file(mut self, file: ApiConfigFile) -> Result<Self, ConfigError> {
        if let Some(url) = file.base_url {
            self.base_url = normalize_base_url(url)?;
        }
        if let Some(ms) = file.timeout_ms {
            self.timeout = Duration::from_millis(ms);
        }
        if let Some(attempts) = file.retry_attempts {
            self.retry.max_attempts = attempts;
        }
        if let Some(ms) = file.retry_delay_ms {
            self.retry = RetryPolicy::exponential(self.retry.max_attempts, Duration::from_millis(ms));
        }
        Ok(self)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_platform(Platform::current())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                key: key.to_string(),
                value: raw,
            }),
    }
}

fn normalize_base_url(url: String) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(url));
    }
    Ok(trimmed.to_string())
}
