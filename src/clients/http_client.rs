//! HTTP client for DigitalOcean API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the DigitalOcean API with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{
    HttpError, HttpResponseError, InvalidResponseBodyError, MaxHttpRetriesExceededError,
};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::ClientConfig;

/// Fixed retry wait time in seconds when no `Retry-After` header is present.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the DigitalOcean API.
///
/// The client handles:
/// - URL construction from the configured base URL, or verbatim for
///   absolute pagination links
/// - Default headers including User-Agent and the authentication header
/// - Automatic retry logic for 429 and 5xx responses
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use digitalocean_sdk::{ClientConfig, ApiToken};
/// use digitalocean_sdk::clients::{HttpClient, HttpRequest};
///
/// let config = ClientConfig::builder()
///     .api_token(ApiToken::new("dop_v1_abc").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config)?;
/// let request = HttpRequest::builder("/v2/droplets").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URL without trailing slash (e.g., `https://api.digitalocean.com`).
    base_url: String,
    default_headers: HashMap<String, String>,
    /// Attempts per request unless the request overrides it.
    tries: u32,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}DigitalOcean Rust SDK v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let (auth_name, auth_value) = config
            .authentication_scheme()
            .header(config.api_token());
        default_headers.insert(auth_name.to_string(), auth_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(config.connection_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().as_ref().to_string(),
            default_headers,
            tries: config.tries(),
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the default number of attempts per request.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Resolves a request path against the base URL.
    ///
    /// Absolute URLs (pagination links) are returned unchanged.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        if request.is_absolute() {
            request.path.clone()
        } else if request.path.starts_with('/') {
            format!("{}{}", self.base_url, request.path)
        } else {
            format!("{}/{}", self.base_url, request.path)
        }
    }

    /// Sends a GET request to the API.
    ///
    /// The effective number of attempts is the larger of the request's
    /// `tries` and the client default.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs, including while reading the body (`Network`)
    /// - A 2xx response body is not valid JSON (`InvalidBody`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = self.url_for(&request);
        let max_tries = request.tries.max(self.tries);

        let mut headers = self.default_headers.clone();
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = self.client.get(&url);

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let success = res.status().is_success();
            let body_text = res.text().await?;

            let body = if success {
                match serde_json::from_str(&body_text) {
                    Ok(body) => body,
                    Err(_) if code == 204 && body_text.trim().is_empty() => serde_json::json!({}),
                    Err(source) => {
                        return Err(HttpError::InvalidBody(InvalidResponseBodyError {
                            code,
                            url: url.clone(),
                            source,
                            error_reference: res_headers
                                .get("x-request-id")
                                .and_then(|values| values.first())
                                .cloned(),
                        }));
                    }
                }
            } else if body_text.trim().is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if let Some(reason) = response.deprecation_reason() {
                tracing::warn!(
                    "Deprecated request to DigitalOcean API at {}, received reason: {}",
                    request.path,
                    reason
                );
            }

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);

            let should_retry = code == 429 || code >= 500;
            if !should_retry || max_tries == 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            if tries >= max_tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: max_tries,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                "Request to {} failed with status {}, retrying in {:?} (attempt {} of {})",
                request.path,
                code,
                delay,
                tries,
                max_tries
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap` with lowercased names.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> Duration {
        // Only 429 honours Retry-After
        if status == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return Duration::from_secs_f64(retry_after.max(0.0));
            }
        }
        Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes an error response body to compact JSON.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        for key in ["id", "message", "raw_body"] {
            if let Some(value) = response.body.get(key) {
                error_body.insert(key.to_string(), value.clone());
            }
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpRequest;
    use crate::config::{ApiToken, BaseUrl};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str, tries: u32) -> ClientConfig {
        ClientConfig::builder()
            .api_token(ApiToken::new("test-token").unwrap())
            .base_url(BaseUrl::new(base_url).unwrap())
            .tries(tries)
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_with_default_base_url() {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("test-token").unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "https://api.digitalocean.com");
        assert_eq!(client.tries(), 1);
    }

    #[test]
    fn test_default_headers_include_bearer_token_and_user_agent() {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("test-token").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config).unwrap();

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&"Bearer test-token".to_string())
        );
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("DigitalOcean Rust SDK v"));
    }

    #[test]
    fn test_url_for_relative_and_absolute_paths() {
        let client = HttpClient::new(&config_for("http://localhost:9000", 1)).unwrap();

        let relative = HttpRequest::builder("/v2/droplets")
            .build()
            .unwrap();
        assert_eq!(client.url_for(&relative), "http://localhost:9000/v2/droplets");

        let bare = HttpRequest::builder("v2/droplets")
            .build()
            .unwrap();
        assert_eq!(client.url_for(&bare), "http://localhost:9000/v2/droplets");

        let absolute = HttpRequest::builder("https://api.digitalocean.com/v2/droplets?page=2")
        .build()
        .unwrap();
        assert_eq!(
            client.url_for(&absolute),
            "https://api.digitalocean.com/v2/droplets?page=2"
        );
    }

    #[tokio::test]
    async fn test_request_sends_auth_header_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets"))
            .and(query_param("per_page", "2"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "droplets": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&config_for(&server.uri(), 1)).unwrap();
        let request = HttpRequest::builder("/v2/droplets")
            .query_param("per_page", "2")
            .build()
            .unwrap();

        let response = client.request(request).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.body["droplets"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_non_retryable_error_returns_response_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/404"))
            .respond_with(
                ResponseTemplate::new(404)
                    .insert_header("x-request-id", "req-404")
                    .set_body_json(serde_json::json!({
                        "id": "not_found",
                        "message": "The resource you were accessing could not be found."
                    })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new(&config_for(&server.uri(), 3)).unwrap();
        let request = HttpRequest::builder("/v2/droplets/404")
            .build()
            .unwrap();

        match client.request(request).await {
            Err(HttpError::Response(e)) => {
                assert_eq!(e.code, 404);
                assert!(e.message.contains("not_found"));
                assert_eq!(e.error_reference.as_deref(), Some("req-404"));
            }
            other => panic!("Expected Response error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_request_exhausts_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "0")
                    .set_body_json(serde_json::json!({"id": "too_many_requests"})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = HttpClient::new(&config_for(&server.uri(), 2)).unwrap();
        let request = HttpRequest::builder("/v2/droplets")
            .build()
            .unwrap();

        match client.request(request).await {
            Err(HttpError::MaxRetries(e)) => {
                assert_eq!(e.code, 429);
                assert_eq!(e.tries, 2);
            }
            other => panic!("Expected MaxRetries error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_truncated_success_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-request-id", "req-cut")
                    .set_body_raw(r#"{"droplets":[{"id":3}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let client = HttpClient::new(&config_for(&server.uri(), 1)).unwrap();
        let request = HttpRequest::builder("/v2/droplets").build().unwrap();

        match client.request(request).await {
            Err(HttpError::InvalidBody(e)) => {
                assert_eq!(e.code, 200);
                assert!(e.url.ends_with("/v2/droplets"));
                assert_eq!(e.error_reference.as_deref(), Some("req-cut"));
            }
            other => panic!("Expected InvalidBody error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_kept_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new(&config_for(&server.uri(), 1)).unwrap();
        let request = HttpRequest::builder("/v2/droplets").build().unwrap();

        match client.request(request).await {
            Err(HttpError::Response(e)) => {
                assert_eq!(e.code, 502);
                assert!(e.message.contains("Bad Gateway"));
            }
            other => panic!("Expected Response error, got: {other:?}"),
        }
    }
}
