//! Configuration types for the DigitalOcean SDK.
//!
//! This module provides the core configuration types used to initialize
//! the SDK for API communication with DigitalOcean.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The main configuration struct holding all SDK settings
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ApiToken`]: A validated personal access token with masked debug output
//! - [`BaseUrl`]: A validated API base URL
//! - [`AuthenticationScheme`]: How the token is attached to requests
//!
//! # Example
//!
//! ```rust
//! use digitalocean_sdk::{ClientConfig, ApiToken};
//!
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("dop_v1_abc").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.caching_enabled());
//! ```

mod auth_scheme;
mod newtypes;

pub use auth_scheme::AuthenticationScheme;
pub use newtypes::{ApiToken, BaseUrl, DEFAULT_BASE_URL};

use std::time::Duration;

use crate::error::ConfigError;

/// Default connection timeout for API requests.
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(20);

/// Configuration for the DigitalOcean SDK.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_token: ApiToken,
    base_url: BaseUrl,
    authentication_scheme: AuthenticationScheme,
    connection_timeout: Duration,
    user_agent_prefix: Option<String>,
    caching_enabled: bool,
    tries: u32,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API token.
    #[must_use]
    pub const fn api_token(&self) -> &ApiToken {
        &self.api_token
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the authentication scheme.
    #[must_use]
    pub const fn authentication_scheme(&self) -> AuthenticationScheme {
        self.authentication_scheme
    }

    /// Returns the connection timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns whether fetched instance documents are cached.
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.caching_enabled
    }

    /// Returns how many times a rate-limited or failed request is attempted.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// The only required field is `api_token`.
///
/// # Defaults
///
/// - `base_url`: `https://api.digitalocean.com`
/// - `authentication_scheme`: [`AuthenticationScheme::Bearer`]
/// - `connection_timeout`: 20 seconds
/// - `user_agent_prefix`: `None`
/// - `caching_enabled`: `true`
/// - `tries`: 1 (no retries)
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use digitalocean_sdk::{ClientConfig, ApiToken, BaseUrl};
///
/// let config = ClientConfig::builder()
///     .api_token(ApiToken::new("dop_v1_abc").unwrap())
///     .base_url(BaseUrl::new("http://localhost:8080").unwrap())
///     .connection_timeout(Duration::from_secs(5))
///     .user_agent_prefix("MyApp/1.0")
///     .caching_enabled(false)
///     .tries(3)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.tries(), 3);
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_token: Option<ApiToken>,
    base_url: Option<BaseUrl>,
    authentication_scheme: Option<AuthenticationScheme>,
    connection_timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    caching_enabled: Option<bool>,
    tries: Option<u32>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the authentication scheme.
    #[must_use]
    pub const fn authentication_scheme(mut self, scheme: AuthenticationScheme) -> Self {
        self.authentication_scheme = Some(scheme);
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Enables or disables the in-memory document cache.
    #[must_use]
    pub const fn caching_enabled(mut self, enabled: bool) -> Self {
        self.caching_enabled = Some(enabled);
        self
    }

    /// Sets how many times a request is attempted on 429/5xx responses.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = Some(tries);
        self
    }

    /// Builds the [`ClientConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_token` is not set
    /// and [`ConfigError::InvalidTries`] if `tries` is zero.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_token = self
            .api_token
            .ok_or(ConfigError::MissingRequiredField { field: "api_token" })?;

        let tries = self.tries.unwrap_or(1);
        if tries == 0 {
            return Err(ConfigError::InvalidTries { tries });
        }

        Ok(ClientConfig {
            api_token,
            base_url: self.base_url.unwrap_or_default(),
            authentication_scheme: self.authentication_scheme.unwrap_or_default(),
            connection_timeout: self
                .connection_timeout
                .unwrap_or(DEFAULT_CONNECTION_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
            caching_enabled: self.caching_enabled.unwrap_or(true),
            tries,
        })
    }
}
