//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use digitalocean_sdk::rest::{
    cache_key, Document, MemoryCache, QueryParams, RequestExecutor, ResourceError,
};
use digitalocean_sdk::{Client, HttpError, HttpResponseError};
use serde_json::Value;

pub const PAGE_2: &str = "https://api.digitalocean.com/v2/droplets?page=2";
pub const PAGE_3: &str = "https://api.digitalocean.com/v2/droplets?page=3";

/// Serves canned documents keyed by href (plus sorted query) and counts fetches.
#[derive(Clone, Default)]
pub struct CountingExecutor {
    responses: Arc<Mutex<HashMap<String, Result<Value, u16>>>>,
    fetches: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<String>>>,
}

impl CountingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(self, key: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), Ok(body));
        self
    }

    pub fn fail(self, key: &str, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(key.to_string(), Err(status));
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn client(&self) -> Client {
        Client::with_executor(Arc::new(self.clone()), Arc::new(MemoryCache::new()))
    }
}

#[async_trait]
impl RequestExecutor for CountingExecutor {
    async fn get(&self, href: &str, query: &QueryParams) -> Result<Document, ResourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let key = cache_key(href, query);
        self.log.lock().unwrap().push(key.clone());

        match self.responses.lock().unwrap().get(&key).cloned() {
            Some(Ok(Value::Object(document))) => Ok(document),
            Some(Ok(other)) => panic!("canned body for {key} is not an object: {other}"),
            Some(Err(code)) => Err(ResourceError::from_http_error(
                HttpError::Response(HttpResponseError {
                    code,
                    message: format!(r#"{{"id":"error_{code}"}}"#),
                    error_reference: Some("req-test".to_string()),
                }),
                href,
            )),
            None => Err(ResourceError::NotFound {
                href: href.to_string(),
            }),
        }
    }
}

/// The two-page listing used throughout: ids 1 and 2, then 3.
pub fn two_page_droplets() -> CountingExecutor {
    CountingExecutor::new()
        .serve(
            "/v2/droplets",
            serde_json::json!({
                "droplets": [{"id": 1}, {"id": 2}],
                "links": {"pages": {"next": PAGE_2}},
                "meta": {"total": 3}
            }),
        )
        .serve(
            PAGE_2,
            serde_json::json!({
                "droplets": [{"id": 3}],
                "links": {},
                "meta": {"total": 3}
            }),
        )
}
