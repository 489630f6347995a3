//! Resource-specific error types.
//!
//! This module contains the error type returned by every resource,
//! collection and data store operation. It wraps the transport's
//! [`HttpError`] and adds the materialization and iteration failures of the
//! resource layer.
//!
//! # Error Handling
//!
//! - [`ResourceError::TypeMismatch`]: a raw JSON value has the wrong kind for its descriptor
//! - [`ResourceError::SchemaViolation`]: a reference or collection payload is malformed
//! - [`ResourceError::EmptyCollection`] / [`ResourceError::MultipleResourcesFound`]: `single()` preconditions
//! - [`ResourceError::UnsupportedOperation`]: mutation through a read-only view
//! - [`ResourceError::NotFound`]: HTTP 404
//! - [`ResourceError::Http`]: any other transport failure, unchanged
//!
//! None of these are retried by the resource layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use digitalocean_sdk::rest::ResourceError;
//!
//! match droplets.single().await {
//!     Ok(droplet) => println!("Found: {:?}", droplet.name()?),
//!     Err(ResourceError::EmptyCollection) => println!("no droplets"),
//!     Err(ResourceError::MultipleResourcesFound) => println!("ambiguous"),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use crate::clients::{HttpError, HttpResponseError};
use thiserror::Error;

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use digitalocean_sdk::rest::ResourceError;
///
/// let error = ResourceError::TypeMismatch {
///     property: "memory".to_string(),
///     expected: "integer",
///     found: "string",
/// };
/// assert!(error.to_string().contains("memory"));
///
/// let error = ResourceError::NotFound {
///     href: "/v2/droplets/1".to_string(),
/// };
/// assert!(error.to_string().contains("/v2/droplets/1"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource was not found (HTTP 404).
    #[error("Resource at {href} not found")]
    NotFound {
        /// The href that was requested.
        href: String,
    },

    /// A raw value has a JSON kind incompatible with its property descriptor.
    #[error("Property '{property}' expected {expected} but found {found}")]
    TypeMismatch {
        /// The property name.
        property: String,
        /// The kind the descriptor declares.
        expected: &'static str,
        /// The JSON kind actually present.
        found: &'static str,
    },

    /// A reference or collection payload does not match the declared schema.
    #[error("Schema violation in {resource}.{property}: {reason}")]
    SchemaViolation {
        /// The resource type that owns the property.
        resource: &'static str,
        /// The property name.
        property: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// `single()` was called on a collection with no items.
    #[error("This list is empty while it was expected to contain one (and only one) element.")]
    EmptyCollection,

    /// `single()` was called on a collection with more than one item.
    #[error("Only a single resource was expected, but this list contains more than one item.")]
    MultipleResourcesFound,

    /// The operation is not supported by a read-only view.
    #[error("{operation} is not supported.")]
    UnsupportedOperation {
        /// The rejected operation.
        operation: &'static str,
    },

    /// The resource has no href, so it cannot be fetched again.
    #[error("{resource} has no href and cannot be re-fetched")]
    MissingHref {
        /// The resource type.
        resource: &'static str,
    },

    /// The data store behind a resource has been dropped.
    #[error("The data store backing this resource is no longer available")]
    DataStoreReleased,

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Creates a `ResourceError` from a transport error for `href`.
    ///
    /// Maps a 404 response to `NotFound` and passes every other error
    /// through unchanged as `Http`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use digitalocean_sdk::clients::{HttpError, HttpResponseError};
    /// use digitalocean_sdk::rest::ResourceError;
    ///
    /// let error = ResourceError::from_http_error(
    ///     HttpError::Response(HttpResponseError {
    ///         code: 404,
    ///         message: r#"{"id":"not_found"}"#.to_string(),
    ///         error_reference: Some("req-123".to_string()),
    ///     }),
    ///     "/v2/droplets/1",
    /// );
    /// assert!(matches!(error, ResourceError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_error(error: HttpError, href: &str) -> Self {
        match error {
            HttpError::Response(HttpResponseError { code: 404, .. }) => Self::NotFound {
                href: href.to_string(),
            },
            other => Self::Http(other),
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            Self::Http(HttpError::MaxRetries(e)) => e.error_reference.as_deref(),
            Self::Http(HttpError::InvalidBody(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn type_mismatch(
        property: &str,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            property: property.to_string(),
            expected,
            found: json_kind(found),
        }
    }

    pub(crate) fn schema_violation(
        resource: &'static str,
        property: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::SchemaViolation {
            resource,
            property: property.to_string(),
            reason: reason.into(),
        }
    }
}

/// Names the JSON kind of a value for error messages.
#[must_use]
pub(crate) const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_mismatch_names_property_and_kinds() {
        let error = ResourceError::type_mismatch("memory", "integer", &json!("1024"));
        let message = error.to_string();

        assert!(message.contains("memory"));
        assert!(message.contains("integer"));
        assert!(message.contains("string"));
    }

    #[test]
    fn test_schema_violation_names_resource_and_property() {
        let error = ResourceError::schema_violation("Droplet", "region", "expected an object");
        let message = error.to_string();

        assert!(message.contains("Droplet.region"));
        assert!(message.contains("expected an object"));
    }

    #[test]
    fn test_single_precondition_messages() {
        assert!(ResourceError::EmptyCollection.to_string().contains("empty"));
        assert!(ResourceError::MultipleResourcesFound
            .to_string()
            .contains("more than one"));
    }

    #[test]
    fn test_unsupported_operation_message() {
        let error = ResourceError::UnsupportedOperation { operation: "Remove" };
        assert_eq!(error.to_string(), "Remove is not supported.");
    }

    #[test]
    fn test_from_http_error_maps_404_to_not_found() {
        let error = ResourceError::from_http_error(
            HttpError::Response(HttpResponseError {
                code: 404,
                message: String::new(),
                error_reference: None,
            }),
            "/v2/droplets/9",
        );

        assert!(matches!(
            error,
            ResourceError::NotFound { href } if href == "/v2/droplets/9"
        ));
    }

    #[test]
    fn test_from_http_error_passes_other_errors_through() {
        let error = ResourceError::from_http_error(
            HttpError::Response(HttpResponseError {
                code: 500,
                message: r#"{"id":"server_error"}"#.to_string(),
                error_reference: Some("req-789".to_string()),
            }),
            "/v2/droplets",
        );

        assert!(matches!(error, ResourceError::Http(HttpError::Response(_))));
        assert_eq!(error.request_id(), Some("req-789"));
    }

    #[test]
    fn test_json_kind_names() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(1)), "number");
        assert_eq!(json_kind(&json!([1])), "array");
        assert_eq!(json_kind(&json!({})), "object");
    }
}
