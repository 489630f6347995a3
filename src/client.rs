//! High-level DigitalOcean API client.
//!
//! This module provides the [`Client`] type, the entry point for fetching
//! droplets. It wires an [`HttpClient`] and a document cache into a
//! [`DataStore`] and exposes typed operations on top of it.

use std::sync::Arc;

use crate::clients::{HttpClient, HttpError};
use crate::config::ClientConfig;
use crate::rest::resources::{Droplet, DropletContainer, DropletList};
use crate::rest::{
    build_href, CollectionMember, DataStore, DisabledCache, MemoryCache, QueryParams,
    RequestExecutor, Resource, ResourceCache, ResourceError,
};

/// Client for the DigitalOcean API.
///
/// Cloning a `Client` is cheap; clones share the same data store and cache.
/// Resources only hold a weak handle to that data store, so keep a `Client`
/// alive for as long as its resources fetch references or further pages.
///
/// # Thread Safety
///
/// `Client` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use digitalocean_sdk::{ApiToken, Client, ClientConfig};
///
/// let config = ClientConfig::builder()
///     .api_token(ApiToken::new("dop_v1_...")?)
///     .build()?;
/// let client = Client::new(&config)?;
///
/// let droplet = client.get_droplet(3164444).await?;
/// println!("{:?}", droplet.name()?);
///
/// let droplets = client.list_droplets().await?;
/// println!("{:?} droplets", droplets.total());
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    data_store: Arc<DataStore>,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client that talks to the API described by `config`.
    ///
    /// Documents are cached in memory unless
    /// [`caching_enabled`](ClientConfig::caching_enabled) is off.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be created.
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let http_client = HttpClient::new(config)?;
        let cache: Arc<dyn ResourceCache> = if config.caching_enabled() {
            Arc::new(MemoryCache::new())
        } else {
            tracing::debug!("Resource caching disabled");
            Arc::new(DisabledCache)
        };

        Ok(Self::with_executor(Arc::new(http_client), cache))
    }

    /// Creates a client on top of a custom transport and cache.
    #[must_use]
    pub fn with_executor(
        executor: Arc<dyn RequestExecutor>,
        cache: Arc<dyn ResourceCache>,
    ) -> Self {
        Self {
            data_store: DataStore::new(executor, cache),
        }
    }

    /// The data store behind this client, for fetching arbitrary resources.
    #[must_use]
    pub const fn data_store(&self) -> &Arc<DataStore> {
        &self.data_store
    }

    /// Fetches a single droplet by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if no such droplet exists and
    /// [`ResourceError::SchemaViolation`] if the response has no `droplet`.
    pub async fn get_droplet(&self, id: u64) -> Result<Droplet, ResourceError> {
        let href = build_href(Droplet::PLURAL, Some(&id.to_string()));
        let container: DropletContainer = self.data_store.get_resource(&href).await?;

        container.droplet()?.ok_or_else(|| {
            ResourceError::schema_violation(
                DropletContainer::NAME,
                "droplet",
                format!("response for {href} has no droplet"),
            )
        })
    }

    /// Fetches the first page of all droplets.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list_droplets(&self) -> Result<DropletList, ResourceError> {
        self.list_droplets_with_params(&QueryParams::new()).await
    }

    /// Fetches the first page of droplets matching `query`
    /// (e.g. `tag_name`, `per_page`).
    ///
    /// The query is remembered, so later iterators re-fetch with it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails.
    pub async fn list_droplets_with_params(
        &self,
        query: &QueryParams,
    ) -> Result<DropletList, ResourceError> {
        self.data_store
            .get_resource_with_params(&build_href(Droplet::PLURAL, None), query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiToken, BaseUrl};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, caching: bool) -> Client {
        let config = ClientConfig::builder()
            .api_token(ApiToken::new("test-token").unwrap())
            .base_url(BaseUrl::new(&server.uri()).unwrap())
            .caching_enabled(caching)
            .build()
            .unwrap();
        Client::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_get_droplet_unwraps_container() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplet": {"id": 42, "name": "web-1", "region": {"slug": "nyc3"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, true);
        let droplet = client.get_droplet(42).await.unwrap();
        let cached = client.get_droplet(42).await.unwrap();

        assert_eq!(droplet.id().unwrap(), Some(42));
        assert_eq!(cached.name().unwrap().as_deref(), Some("web-1"));
        assert_eq!(
            droplet.region().unwrap().unwrap().slug().unwrap().as_deref(),
            Some("nyc3")
        );
    }

    #[tokio::test]
    async fn test_get_droplet_without_cache_fetches_each_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"droplet": {"id": 42}})))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, false);
        client.get_droplet(42).await.unwrap();
        client.get_droplet(42).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_droplet_missing_envelope_is_schema_violation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let error = client_for(&server, true).get_droplet(42).await.unwrap_err();

        assert!(matches!(error, ResourceError::SchemaViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_droplet_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "id": "not_found",
                "message": "The resource you were accessing could not be found."
            })))
            .mount(&server)
            .await;

        let error = client_for(&server, true).get_droplet(7).await.unwrap_err();

        assert!(matches!(error, ResourceError::NotFound { href } if href == "/v2/droplets/7"));
    }

    #[tokio::test]
    async fn test_list_droplets_follows_absolute_next_link() {
        let server = MockServer::start().await;
        let next = format!("{}/v2/droplets?page=2", server.uri());
        Mock::given(method("GET"))
            .and(path("/v2/droplets"))
            .and(query_param("per_page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplets": [{"id": 1}, {"id": 2}],
                "links": {"pages": {"next": next}},
                "meta": {"total": 3}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/droplets"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "droplets": [{"id": 3}],
                "links": {},
                "meta": {"total": 3}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, true);
        let mut query = QueryParams::new();
        query.insert("per_page".to_string(), "2".to_string());
        let droplets = client.list_droplets_with_params(&query).await.unwrap();

        let mut iter = droplets.iterator().await.unwrap();
        let mut ids = Vec::new();
        while let Some(droplet) = iter.try_next().await.unwrap() {
            ids.push(droplet.id().unwrap().unwrap());
        }

        assert_eq!(droplets.total(), Some(3));
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
