use std::sync::Arc;

/// One page of items from a paginated collection.
///
/// Pages are immutable snapshots; clones share the same item storage.
#[derive(Debug)]
pub struct Page<T> {
    items: Arc<Vec<T>>,
}

impl<T> Clone for Page<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Page<T> {
    pub(crate) const fn new(items: Arc<Vec<T>>) -> Self {
        Self { items }
    }

    /// The items on this page, in server order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterates over the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_exposes_items_and_size() {
        let page = Page::new(Arc::new(vec![1, 2, 3]));

        assert_eq!(page.len(), 3);
        assert!(!page.is_empty());
        assert_eq!(page.items(), &[1, 2, 3]);
        assert_eq!(page.get(1), Some(&2));
        assert_eq!(page.get(3), None);
        assert_eq!((&page).into_iter().sum::<i32>(), 6);
    }

    #[test]
    fn test_clones_share_storage() {
        let page = Page::new(Arc::new(vec!["a"]));
        let clone = page.clone();

        assert!(std::ptr::eq(page.items(), clone.items()));
    }
}
