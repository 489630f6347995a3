//! The data store: fetches documents and turns them into typed resources.
//!
//! A [`DataStore`] owns the [`RequestExecutor`] and the [`ResourceCache`] for
//! one client. Every resource it builds holds a weak handle back to it, which
//! is how reference properties and paginated iterators reach the network
//! without threading a client through every call.
//!
//! # Example
//!
//! ```rust,ignore
//! use digitalocean_sdk::rest::{DataStore, MemoryCache};
//! use digitalocean_sdk::Droplet;
//! use std::sync::Arc;
//!
//! let store = DataStore::new(Arc::new(http_client), Arc::new(MemoryCache::new()));
//! let droplet: Droplet = store.get_resource("/v2/droplets/42").await?;
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use serde_json::Value;

use crate::rest::{
    cache_key, Document, PropertyStore, QueryParams, Resource, ResourceCache, ResourceData,
    ResourceError, RequestExecutor,
};

/// Fetches, caches and instantiates resources.
pub struct DataStore {
    executor: Arc<dyn RequestExecutor>,
    cache: Arc<dyn ResourceCache>,
    self_ref: Weak<DataStore>,
}

impl fmt::Debug for DataStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore").finish_non_exhaustive()
    }
}

impl DataStore {
    /// Creates a data store.
    ///
    /// The store is returned inside an `Arc` because the resources it builds
    /// keep a weak handle to it.
    #[must_use]
    pub fn new(executor: Arc<dyn RequestExecutor>, cache: Arc<dyn ResourceCache>) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            executor,
            cache,
            self_ref: self_ref.clone(),
        })
    }

    /// The cache this store reads and writes.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn ResourceCache> {
        &self.cache
    }

    /// Builds a resource from an in-memory document without any I/O.
    ///
    /// The resource's href is taken from the document's `href` field, if any.
    ///
    /// # Errors
    ///
    /// Returns whatever [`Resource::from_data`] rejects.
    pub fn instantiate<T: Resource>(&self, document: Document) -> Result<T, ResourceError> {
        let href = document
            .get("href")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        self.build(href, QueryParams::new(), document)
    }

    pub(crate) fn build<T: Resource>(
        &self,
        href: Option<String>,
        query_params: QueryParams,
        document: Document,
    ) -> Result<T, ResourceError> {
        T::from_data(ResourceData::new(
            T::NAME,
            href,
            query_params,
            PropertyStore::from_document(document),
            self.self_ref.clone(),
        ))
    }

    /// Fetches the resource at `href`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails or the document cannot
    /// back `T`.
    pub async fn get_resource<T: Resource>(&self, href: &str) -> Result<T, ResourceError> {
        self.get_resource_with_params(href, &QueryParams::new()).await
    }

    /// Fetches the resource at `href` with `query` applied.
    ///
    /// Cacheable types are served from the cache when present and stored in
    /// it after a successful fetch. The resulting resource remembers both the
    /// href and the query so it can be fetched again later.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the fetch fails or the document cannot
    /// back `T`.
    pub async fn get_resource_with_params<T: Resource>(
        &self,
        href: &str,
        query: &QueryParams,
    ) -> Result<T, ResourceError> {
        let key = cache_key(href, query);

        if T::CACHEABLE {
            if let Some(document) = self.cache.get(&key) {
                tracing::debug!(resource = T::NAME, key = %key, "Serving resource from cache");
                return self.build(Some(href.to_string()), query.clone(), document);
            }
        }

        tracing::debug!(resource = T::NAME, key = %key, "Fetching resource");
        let document = self.executor.get(href, query).await?;

        if T::CACHEABLE {
            self.cache.put(key, document.clone());
        }

        self.build(Some(href.to_string()), query.clone(), document)
    }

    /// Drops the cached document for `href` and `query`.
    pub fn evict(&self, href: &str, query: &QueryParams) {
        self.cache.remove(&cache_key(href, query));
    }
}
