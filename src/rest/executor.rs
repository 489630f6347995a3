//! The transport seam between the data store and the network.
//!
//! The [`DataStore`](crate::rest::DataStore) never talks to HTTP directly; it
//! asks a [`RequestExecutor`] for the JSON document at an href. The default
//! implementation is [`HttpClient`], and tests substitute an in-memory stub.

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::{HttpClient, HttpError, HttpRequest};
use crate::rest::{Document, QueryParams, ResourceError};

/// Performs the GET requests behind resource fetches.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Fetches the JSON object at `href` with `query` applied.
    ///
    /// `href` is either relative to the API base URL (`/v2/droplets`) or an
    /// absolute pagination link, which already carries its own query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] for a 404, [`ResourceError::Http`]
    /// for any other transport failure, and
    /// [`ResourceError::SchemaViolation`] if the body is not a JSON object.
    async fn get(&self, href: &str, query: &QueryParams) -> Result<Document, ResourceError>;
}

#[async_trait]
impl RequestExecutor for HttpClient {
    async fn get(&self, href: &str, query: &QueryParams) -> Result<Document, ResourceError> {
        let request = HttpRequest::builder(href)
            .query(query.clone())
            .build()
            .map_err(HttpError::from)?;

        let response = self
            .request(request)
            .await
            .map_err(|e| ResourceError::from_http_error(e, href))?;

        match response.body {
            Value::Object(document) => Ok(document),
            other => Err(ResourceError::schema_violation(
                "Document",
                href,
                format!(
                    "expected a JSON object body, found {}",
                    super::errors::json_kind(&other)
                ),
            )),
        }
    }
}

// Verify the executor trait object can be shared across tasks
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync + ?Sized>() {}
    assert_send_sync::<dyn RequestExecutor>();
};
