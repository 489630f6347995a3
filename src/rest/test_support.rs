//! In-memory request executor for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::{HttpError, HttpResponseError};
use crate::rest::{
    cache_key, DataStore, Document, MemoryCache, QueryParams, RequestExecutor, ResourceError,
};

#[derive(Clone, Default)]
pub struct StubExecutor {
    responses: Arc<Mutex<HashMap<String, Result<Value, u16>>>>,
    fetches: Arc<AtomicUsize>,
}

impl StubExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `key` (an href, plus `?query` if one is expected).
    pub fn with(self, key: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), Ok(body));
        self
    }

    /// Fails requests for `key` with an HTTP `status`.
    pub fn failing(self, key: &str, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), Err(status));
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestExecutor for StubExecutor {
    async fn get(&self, href: &str, query: &QueryParams) -> Result<Document, ResourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = cache_key(href, query);
        let response = self.responses.lock().unwrap().get(&key).cloned();

        match response {
            Some(Ok(Value::Object(document))) => Ok(document),
            Some(Ok(other)) => panic!("stub body for {key} is not an object: {other}"),
            Some(Err(code)) => Err(ResourceError::from_http_error(
                HttpError::Response(HttpResponseError {
                    code,
                    message: format!(r#"{{"id":"stub_{code}"}}"#),
                    error_reference: None,
                }),
                href,
            )),
            None => Err(ResourceError::NotFound {
                href: href.to_string(),
            }),
        }
    }
}

pub fn data_store_with(executor: StubExecutor) -> Arc<DataStore> {
    DataStore::new(Arc::new(executor), Arc::new(MemoryCache::new()))
}
