//! # DigitalOcean API Rust SDK
//!
//! A Rust SDK for the DigitalOcean API, providing type-safe configuration,
//! lazily materialized resources, and transparent pagination over
//! collection endpoints.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for the API token and base URL
//! - Async HTTP client with retry logic and rate limit parsing
//! - Resources backed by raw JSON, converted to typed values on first access
//! - Paginated collections that fetch further pages only when iterated
//!
//! ## Quick Start
//!
//! ```rust
//! use digitalocean_sdk::{ApiToken, ClientConfig};
//!
//! // Create configuration using the builder pattern
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("dop_v1_example").unwrap())
//!     .tries(3)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api.digitalocean.com");
//! ```
//!
//! ## Fetching Droplets
//!
//! ```rust,ignore
//! use digitalocean_sdk::{Client, ClientConfig, ApiToken};
//!
//! let client = Client::new(&config)?;
//!
//! // A single droplet
//! let droplet = client.get_droplet(3164444).await?;
//! println!("{:?} in {:?}", droplet.name()?, droplet.region()?.map(|r| r.slug()));
//!
//! // Every droplet, across all pages
//! let droplets = client.list_droplets().await?;
//! let mut iter = droplets.iterator().await?;
//! while let Some(droplet) = iter.try_next().await? {
//!     println!("{:?}", droplet.id()?);
//! }
//! ```
//!
//! ## Iteration Semantics
//!
//! The first iterator created from a collection reuses the page that was
//! already fetched. Each later iterator fetches the collection again, so it
//! sees current data. An empty page ends iteration.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden I/O**: Reading a property never touches the network

pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use client::Client;
pub use config::{
    ApiToken, AuthenticationScheme, BaseUrl, ClientConfig, ClientConfigBuilder,
    DEFAULT_CONNECTION_TIMEOUT,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError,
    InvalidHttpRequestError, InvalidResponseBodyError, MaxHttpRetriesExceededError, RateLimit,
};

// Re-export resource types
pub use rest::resources::{Droplet, DropletContainer, DropletList, Region, VoidResource};
pub use rest::{
    CollectionResource, DataStore, Page, PaginatedIterator, QueryParams, Resource, ResourceError,
};
