//! Lazy iteration over every page of a collection.

use futures::Stream;

use crate::rest::{CollectionMember, CollectionResource, Page, Resource, ResourceError};

/// Walks the items of a [`CollectionResource`] page by page.
///
/// The next page is fetched only once the current one is exhausted. An
/// empty page ends iteration even if it links to a further page. A failed
/// fetch leaves the iterator exactly as it was, so the call can be retried.
///
/// This is an async iterator; use [`try_next`](Self::try_next) in a loop or
/// convert it with [`into_stream`](Self::into_stream).
#[derive(Debug)]
pub struct PaginatedIterator<T: CollectionMember> {
    resource: CollectionResource<T>,
    current_page: Page<T>,
    cursor: usize,
    next_page_href: Option<String>,
}

impl<T: CollectionMember> PaginatedIterator<T> {
    pub(crate) fn new(resource: CollectionResource<T>) -> Result<Self, ResourceError> {
        let current_page = resource.current_page()?;
        let next_page_href = resource.next_page_href().map(ToOwned::to_owned);

        Ok(Self {
            resource,
            current_page,
            cursor: 0,
            next_page_href,
        })
    }

    /// The collection page the iterator is currently reading.
    #[must_use]
    pub const fn resource(&self) -> &CollectionResource<T> {
        &self.resource
    }

    /// Makes sure an item is available at the cursor, fetching the next page
    /// if needed. Returns `false` once iteration is over.
    async fn advance(&mut self) -> Result<bool, ResourceError> {
        if self.cursor < self.current_page.len() {
            return Ok(true);
        }
        let Some(href) = self.next_page_href.clone() else {
            return Ok(false);
        };

        let data_store = self.resource.data().data_store()?;
        let resource: CollectionResource<T> = data_store.get_resource(&href).await?;
        let page = resource.current_page()?;

        if page.is_empty() {
            tracing::debug!(href = %href, "Empty page, ending pagination");
            self.next_page_href = None;
            return Ok(false);
        }

        self.next_page_href = resource.next_page_href().map(ToOwned::to_owned);
        self.resource = resource;
        self.current_page = page;
        self.cursor = 0;
        Ok(true)
    }

    /// Returns `true` if another item is available, fetching the next page
    /// if the current one is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if fetching the next page fails.
    pub async fn has_next(&mut self) -> Result<bool, ResourceError> {
        self.advance().await
    }

    /// Returns the next item, or `None` once every page is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if fetching the next page fails.
    pub async fn try_next(&mut self) -> Result<Option<T>, ResourceError> {
        if !self.advance().await? {
            return Ok(None);
        }
        let item = self.current_page.get(self.cursor).cloned();
        self.cursor += 1;
        Ok(item)
    }

    /// Collections are read-only views; removal always fails.
    ///
    /// # Errors
    ///
    /// Always returns [`ResourceError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<(), ResourceError> {
        Err(ResourceError::UnsupportedOperation { operation: "Remove" })
    }

    /// Converts the iterator into a [`Stream`] of items.
    pub fn into_stream(self) -> impl Stream<Item = Result<T, ResourceError>> {
        futures::stream::try_unfold(self, |mut iter| async move {
            Ok(iter.try_next().await?.map(|item| (item, iter)))
        })
    }
}
