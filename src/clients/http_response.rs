//! HTTP response types for the DigitalOcean SDK.
//!
//! This module provides the [`HttpResponse`] type and related types for
//! parsing and accessing API response data.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rate limit information parsed from the `ratelimit-*` response headers.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use digitalocean_sdk::clients::RateLimit;
///
/// let mut headers = HashMap::new();
/// headers.insert("ratelimit-limit".to_string(), vec!["5000".to_string()]);
/// headers.insert("ratelimit-remaining".to_string(), vec!["4816".to_string()]);
/// headers.insert("ratelimit-reset".to_string(), vec!["1444931833".to_string()]);
///
/// let limit = RateLimit::from_headers(&headers).unwrap();
/// assert_eq!(limit.limit, 5000);
/// assert_eq!(limit.remaining, 4816);
/// assert!(limit.reset.is_some());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Requests allowed per hour.
    pub limit: u32,
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the oldest request in the window expires.
    pub reset: Option<DateTime<Utc>>,
}

impl RateLimit {
    /// Parses rate limit headers.
    ///
    /// Returns `None` unless both `ratelimit-limit` and `ratelimit-remaining`
    /// are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let first = |name: &str| headers.get(name).and_then(|values| values.first());

        let limit = first("ratelimit-limit")?.trim().parse().ok()?;
        let remaining = first("ratelimit-remaining")?.trim().parse().ok()?;
        let reset = first("ratelimit-reset")
            .and_then(|value| value.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Some(Self {
            limit,
            remaining,
            reset,
        })
    }
}

/// An HTTP response from the DigitalOcean API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Rate limit information.
    pub rate_limit: Option<RateLimit>,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with automatic header parsing.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let rate_limit = RateLimit::from_headers(&headers);

        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            rate_limit,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Deprecation` header value, if present.
    #[must_use]
    pub fn deprecation_reason(&self) -> Option<&str> {
        self.headers
            .get("deprecation")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
