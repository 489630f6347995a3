//! Paginated collection resources.
//!
//! A [`CollectionResource`] is the resource behind a list endpoint such as
//! `/v2/droplets`. Its document carries one page of items under the member
//! type's plural name, an optional `meta.total`, and a `links.pages.next`
//! URL when more pages exist:
//!
//! ```json
//! {
//!   "droplets": [{"id": 1}, {"id": 2}],
//!   "links": {"pages": {"next": "https://api.digitalocean.com/v2/droplets?page=2"}},
//!   "meta": {"total": 3}
//! }
//! ```
//!
//! # Iteration
//!
//! The first iterator created from a collection reuses the page already in
//! memory. Every later iterator fetches the collection again with its
//! original query, so each one observes fresh data from the start. Iterators
//! are independent of each other.
//!
//! # Example
//!
//! ```rust,ignore
//! let droplets = client.list_droplets().await?;
//! println!("{:?} droplets in total", droplets.total());
//!
//! let mut iter = droplets.iterator().await?;
//! while let Some(droplet) = iter.try_next().await? {
//!     println!("{:?}", droplet.name()?);
//! }
//! ```

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::Stream;
use serde_json::Value;

use super::errors::json_kind;
use crate::rest::{
    CollectionMember, Document, Page, PaginatedIterator, PropertyDescriptor, QueryParams,
    Resource, ResourceData, ResourceError,
};

/// A paginated list of `T` resources.
#[derive(Debug)]
pub struct CollectionResource<T: CollectionMember> {
    data: ResourceData,
    next_page_href: Option<String>,
    prev_page_href: Option<String>,
    total: Option<u64>,
    // Shared by clones so only one iterator across all of them reuses the loaded page
    first_page_query_required: Arc<AtomicBool>,
    _member: PhantomData<fn() -> T>,
}

impl<T: CollectionMember> Clone for CollectionResource<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            next_page_href: self.next_page_href.clone(),
            prev_page_href: self.prev_page_href.clone(),
            total: self.total,
            first_page_query_required: Arc::clone(&self.first_page_query_required),
            _member: PhantomData,
        }
    }
}

impl<T: CollectionMember> CollectionResource<T> {
    const ITEMS: PropertyDescriptor = PropertyDescriptor::resource_list(T::PLURAL, T::NAME);
    const META: PropertyDescriptor = PropertyDescriptor::map("meta");
    const LINKS: PropertyDescriptor = PropertyDescriptor::map("links");
    const DESCRIPTORS: &'static [PropertyDescriptor] = &[Self::ITEMS, Self::META, Self::LINKS];

    /// The server-reported total across all pages, if present.
    ///
    /// This is advisory; iteration never checks it against the number of
    /// items actually yielded.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// The absolute URL of the next page, if any.
    #[must_use]
    pub fn next_page_href(&self) -> Option<&str> {
        self.next_page_href.as_deref()
    }

    /// The absolute URL of the previous page, if any.
    #[must_use]
    pub fn prev_page_href(&self) -> Option<&str> {
        self.prev_page_href.as_deref()
    }

    /// The query the collection was fetched with.
    #[must_use]
    pub fn query_params(&self) -> &QueryParams {
        self.data.query_params()
    }

    /// The items of the page currently held by this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SchemaViolation`] if the items field is not
    /// an array of objects.
    pub fn current_page(&self) -> Result<Page<T>, ResourceError> {
        self.data.resource_list::<T>(&Self::ITEMS).map(Page::new)
    }

    /// Creates an iterator over every item across all pages.
    ///
    /// The first call (across this resource and its clones) starts from the
    /// page already loaded. Later calls re-fetch the collection first.
    ///
    /// The loaded page is claimed before its items are validated, so a first
    /// call that fails on a malformed page still uses it up; the next call
    /// re-fetches.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingHref`] if a re-fetch is needed but the
    /// collection has no href, or any error from the re-fetch.
    pub async fn iterator(&self) -> Result<PaginatedIterator<T>, ResourceError> {
        let resource = if self.first_page_query_required.swap(true, Ordering::AcqRel) {
            let href = self
                .href()
                .ok_or(ResourceError::MissingHref { resource: Self::NAME })?;
            tracing::debug!(href = %href, "Re-fetching collection for a new iterator");
            self.data
                .data_store()?
                .get_resource_with_params::<Self>(href, self.query_params())
                .await?
        } else {
            tracing::debug!(href = ?self.href(), "Reusing loaded page for first iterator");
            self.clone()
        };

        PaginatedIterator::new(resource)
    }

    /// Returns the one and only item of the collection.
    ///
    /// Reads at most two items through a fresh iterator.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::EmptyCollection`] if there are no items and
    /// [`ResourceError::MultipleResourcesFound`] if there is more than one.
    pub async fn single(&self) -> Result<T, ResourceError> {
        let mut iter = self.iterator().await?;
        let Some(item) = iter.try_next().await? else {
            return Err(ResourceError::EmptyCollection);
        };
        if iter.has_next().await? {
            return Err(ResourceError::MultipleResourcesFound);
        }
        Ok(item)
    }

    /// Streams every item across all pages. See [`iterator`](Self::iterator).
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`iterator`](Self::iterator).
    pub async fn stream(
        &self,
    ) -> Result<impl Stream<Item = Result<T, ResourceError>>, ResourceError> {
        Ok(self.iterator().await?.into_stream())
    }

    fn read_total(data: &ResourceData) -> Result<Option<u64>, ResourceError> {
        let Some(meta) = data.get_map(&Self::META)? else {
            return Ok(None);
        };
        match meta.get("total") {
            None | Some(Value::Null) => Ok(None),
            Some(total) => total
                .as_u64()
                .map(Some)
                .ok_or_else(|| ResourceError::type_mismatch("meta.total", "integer", total)),
        }
    }

    fn read_page_links(
        data: &ResourceData,
    ) -> Result<(Option<String>, Option<String>), ResourceError> {
        let Some(links) = data.get_map(&Self::LINKS)? else {
            return Ok((None, None));
        };
        let pages = match links.get("pages") {
            None | Some(Value::Null) => return Ok((None, None)),
            Some(Value::Object(pages)) => pages,
            Some(other) => {
                return Err(ResourceError::schema_violation(
                    Self::NAME,
                    "links.pages",
                    format!("expected an object, found {}", json_kind(other)),
                ))
            }
        };
        Ok((Self::page_link(pages, "next")?, Self::page_link(pages, "prev")?))
    }

    fn page_link(pages: &Document, name: &str) -> Result<Option<String>, ResourceError> {
        match pages.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(href)) => Ok(Some(href.clone())),
            Some(other) => Err(ResourceError::type_mismatch(
                &format!("links.pages.{name}"),
                "string",
                other,
            )),
        }
    }
}

impl<T: CollectionMember> Resource for CollectionResource<T> {
    const NAME: &'static str = "Collection";
    const CACHEABLE: bool = false;

    fn property_descriptors() -> &'static [PropertyDescriptor] {
        Self::DESCRIPTORS
    }

    fn from_data(data: ResourceData) -> Result<Self, ResourceError> {
        let total = Self::read_total(&data)?;
        let (next_page_href, prev_page_href) = Self::read_page_links(&data)?;

        Ok(Self {
            data,
            next_page_href,
            prev_page_href,
            total,
            first_page_query_required: Arc::new(AtomicBool::new(false)),
            _member: PhantomData,
        })
    }

    fn data(&self) -> &ResourceData {
        &self.data
    }
}
