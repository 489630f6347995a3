//! Document caches for the data store.
//!
//! The cache maps a fetch identity (href plus sorted query, see
//! [`cache_key`](crate::rest::cache_key)) to the raw document the server
//! returned. Only resource types with [`Resource::CACHEABLE`] set are cached;
//! collection pages never are.
//!
//! [`Resource::CACHEABLE`]: crate::rest::Resource::CACHEABLE

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::rest::Document;

/// A thread-safe document cache.
pub trait ResourceCache: Send + Sync {
    /// Returns the cached document for `key`, if present.
    fn get(&self, key: &str) -> Option<Document>;

    /// Stores a document. Concurrent puts for the same key are last-writer-wins.
    fn put(&self, key: String, document: Document);

    /// Removes a cached document.
    fn remove(&self, key: &str);
}

/// An in-memory cache shared by every resource of one client.
#[derive(Debug, Default)]
pub struct MemoryCache {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Document> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn put(&self, key: String, document: Document) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, document);
    }

    fn remove(&self, key: &str) {
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// A cache that stores nothing; every fetch goes to the network.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledCache;

impl ResourceCache for DisabledCache {
    fn get(&self, _key: &str) -> Option<Document> {
        None
    }

    fn put(&self, _key: String, _document: Document) {}

    fn remove(&self, _key: &str) {}
}
