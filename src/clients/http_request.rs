//! HTTP request types for the DigitalOcean SDK.
//!
//! Resource fetches are read-only, so an [`HttpRequest`] is always a GET:
//! an href, an optional query, optional extra headers and a retry budget.

use std::collections::BTreeMap;

use crate::clients::errors::InvalidHttpRequestError;
use crate::rest::{is_absolute_href, QueryParams};

/// A GET request to be sent to the API.
///
/// The `path` is either an href relative to the configured base URL
/// (`/v2/droplets`) or an absolute URL returned verbatim by the server in a
/// pagination link.
///
/// # Example
///
/// ```rust
/// use digitalocean_sdk::clients::HttpRequest;
///
/// let request = HttpRequest::builder("/v2/droplets")
///     .query_param("per_page", "50")
///     .build()
///     .unwrap();
///
/// assert!(!request.is_absolute());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The href for this request.
    pub path: String,
    /// Query parameters to append to the URL.
    pub query: Option<QueryParams>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<BTreeMap<String, String>>,
    /// Number of times to attempt the request (default: 1).
    pub tries: u32,
}

impl HttpRequest {
    /// Creates a builder for a GET of `path`.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Returns `true` if the path is an absolute URL.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        is_absolute_href(&self.path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyPath`] if `path` is blank and
    /// [`InvalidHttpRequestError::QueryOnAbsoluteUrl`] if a query is attached
    /// to an absolute pagination link, which already carries its own.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }

        if self.is_absolute() && self.query.is_some() {
            return Err(InvalidHttpRequestError::QueryOnAbsoluteUrl {
                url: self.path.clone(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    query: Option<QueryParams>,
    extra_headers: Option<BTreeMap<String, String>>,
    tries: u32,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
            extra_headers: None,
            tries: 1,
        }
    }

    /// Sets all query parameters at once. An empty map sends no query string.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(QueryParams::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the number of times to attempt the request.
    ///
    /// Default is 1 (no retries).
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            path: self.path,
            query: self.query,
            extra_headers: self.extra_headers,
            tries: self.tries,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_creates_plain_get() {
        let request = HttpRequest::builder("/v2/droplets").build().unwrap();

        assert_eq!(request.path, "/v2/droplets");
        assert!(request.query.is_none());
        assert!(request.extra_headers.is_none());
        assert_eq!(request.tries, 1);
    }

    #[test]
    fn test_verify_rejects_empty_path() {
        let result = HttpRequest::builder(" ").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyPath)));
    }

    #[test]
    fn test_empty_query_map_is_dropped() {
        let request = HttpRequest::builder("/v2/droplets")
            .query(QueryParams::new())
            .build()
            .unwrap();
        assert!(request.query.is_none());
    }

    #[test]
    fn test_absolute_link_is_used_without_extra_query() {
        let link = "https://api.digitalocean.com/v2/droplets?page=2";
        let request = HttpRequest::builder(link).build().unwrap();
        assert!(request.is_absolute());

        let result = HttpRequest::builder(link).query_param("per_page", "5").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::QueryOnAbsoluteUrl { url }) if url == link
        ));
    }
}
