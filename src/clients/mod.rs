//! HTTP client types for DigitalOcean API communication.
//!
//! This module provides the transport layer used by the default
//! [`RequestExecutor`](crate::rest::RequestExecutor): request/response
//! processing, retry logic, and DigitalOcean-specific header parsing.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A GET request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`RateLimit`]: Parsed `ratelimit-*` headers
//!
//! # Retry Behavior
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After` header value, or 1 second if not present
//! - **5xx (Server Error)**: Retries with fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default `tries` is 1, meaning no automatic retries. Configure via
//! [`ClientConfigBuilder::tries`](crate::ClientConfigBuilder::tries) or per
//! request with [`HttpRequestBuilder::tries`].

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, InvalidResponseBodyError,
    MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, RateLimit};
