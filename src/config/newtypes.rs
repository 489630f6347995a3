//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Default DigitalOcean API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com";

/// A validated DigitalOcean personal access token.
///
/// This newtype ensures the token is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use digitalocean_sdk::ApiToken;
///
/// let token = ApiToken::new("dop_v1_abc").unwrap();
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated API token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiToken`] if the token is empty or
    /// whitespace only.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// A validated API base URL.
///
/// The URL must carry a scheme and a host. A trailing slash is stripped so
/// that hrefs such as `/v2/droplets` can be appended directly.
///
/// # Example
///
/// ```rust
/// use digitalocean_sdk::BaseUrl;
///
/// let url = BaseUrl::new("https://api.digitalocean.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.digitalocean.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.digitalocean.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        // Host ends at port, path, query, or end of string
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: DEFAULT_BASE_URL.len(),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_rejects_empty_string() {
        assert!(matches!(ApiToken::new(""), Err(ConfigError::EmptyApiToken)));
        assert!(matches!(ApiToken::new("   "), Err(ConfigError::EmptyApiToken)));
    }

    #[test]
    fn test_api_token_masks_value_in_debug() {
        let token = ApiToken::new("super-secret-token").unwrap();
        let debug_output = format!("{:?}", token);
        assert_eq!(debug_output, "ApiToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://api.digitalocean.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "api.digitalocean.com");

        let url = BaseUrl::new("http://localhost:8080/").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8080");
        assert_eq!(url.host_name(), "localhost");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("api.digitalocean.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("://example.com").is_err());
    }

    #[test]
    fn test_default_base_url_matches_parsed_form() {
        let parsed = BaseUrl::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(BaseUrl::default(), parsed);
    }

    #[test]
    fn test_base_url_deserializes_with_validation() {
        let url: BaseUrl = serde_json::from_str(r#""https://example.com/""#).unwrap();
        assert_eq!(url.as_ref(), "https://example.com");

        let result: Result<BaseUrl, _> = serde_json::from_str(r#""example.com""#);
        assert!(result.is_err());
    }
}
