//! Resource layer for the DigitalOcean API.
//!
//! This module turns raw JSON documents into typed, lazily materialized
//! resources and walks paginated collections:
//!
//! - **[`Resource`] trait**: a typed view over a shared [`ResourceData`]
//! - **[`PropertyDescriptor`]**: static per-type field metadata
//! - **[`PropertyStore`]**: raw field storage with dirty tracking
//! - **[`DataStore`]**: fetches, caches and instantiates resources
//! - **[`CollectionResource`]**, **[`Page`]** and **[`PaginatedIterator`]**: pagination
//! - **[`ResourceError`]**: semantic error types for resource operations
//!
//! # Overview
//!
//! Reading a field never performs I/O. Scalar fields are read from the raw
//! document on every access; reference and list fields are converted into
//! typed resources on first access and replaced in place, so the same
//! instance is returned afterwards. Materialization never marks a field
//! dirty. Only iterators touch the network, one page at a time.
//!
//! # Example
//!
//! ```rust,ignore
//! use digitalocean_sdk::{Client, ClientConfig, ApiToken};
//! use futures::TryStreamExt;
//!
//! let config = ClientConfig::builder()
//!     .api_token(ApiToken::new("dop_v1_...")?)
//!     .build()?;
//! let client = Client::new(&config)?;
//!
//! // Walk every droplet across all pages
//! let droplets = client.list_droplets().await?;
//! let mut iter = droplets.iterator().await?;
//! while let Some(droplet) = iter.try_next().await? {
//!     let region = droplet.region()?;
//!     println!("{:?} in {:?}", droplet.name()?, region.map(|r| r.slug()));
//! }
//!
//! // Or as a stream
//! let all: Vec<_> = droplets.stream().await?.try_collect().await?;
//! ```
//!
//! # Key Types
//!
//! - [`ResourceError`]: Error types for resource operations
//! - [`RequestExecutor`]: The transport seam, implemented by [`HttpClient`](crate::clients::HttpClient)
//! - [`ResourceCache`], [`MemoryCache`] and [`DisabledCache`]: document caching
//! - [`resources`]: Concrete resource types (Droplet, Region, ...)

mod cache;
mod collection;
mod data_store;
mod errors;
mod executor;
mod iterator;
mod page;
mod path;
mod property;
mod resource;
mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub mod resources;

// Public exports
pub use cache::{DisabledCache, MemoryCache, ResourceCache};
pub use collection::CollectionResource;
pub use data_store::DataStore;
pub use errors::ResourceError;
pub use executor::RequestExecutor;
pub use iterator::PaginatedIterator;
pub use page::Page;
pub use path::{build_href, cache_key, is_absolute_href, QueryParams, API_PREFIX};
pub use property::{find_descriptor, PropertyDescriptor, PropertyKind};
pub use resource::{CollectionMember, Resource, ResourceData};
pub use store::{Document, PropertyStore, PropertyValue};
