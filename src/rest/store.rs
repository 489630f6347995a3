//! Raw property storage with per-field dirty tracking.
//!
//! A [`PropertyStore`] holds one server document as a map from field name to
//! [`PropertyValue`]. Values start out [`PropertyValue::Raw`]; the first typed
//! read of a reference or date field swaps in a
//! [`PropertyValue::Materialized`] entry that keeps the raw JSON alongside the
//! typed value, so the document can always be re-serialized.
//!
//! Dirty flags record fields changed through setters. Materialization never
//! sets a dirty flag.
//!
//! # Example
//!
//! ```rust
//! use digitalocean_sdk::rest::PropertyStore;
//! use serde_json::json;
//!
//! let store = PropertyStore::from_document(
//!     json!({"name": "web-1", "memory": 1024}).as_object().unwrap().clone(),
//! );
//!
//! assert!(!store.is_dirty("name"));
//! store.set_raw("name", json!("web-2"), true);
//! assert!(store.is_dirty("name"));
//! assert_eq!(store.dirty_properties().get("name"), Some(&json!("web-2")));
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

/// An untyped server document.
pub type Document = serde_json::Map<String, Value>;

/// One stored field value.
#[derive(Clone)]
pub enum PropertyValue {
    /// The value exactly as received or set.
    Raw(Value),
    /// A typed form cached alongside the raw value it was built from.
    Materialized {
        /// The raw JSON the typed value corresponds to.
        raw: Value,
        /// The typed value.
        typed: Arc<dyn Any + Send + Sync>,
    },
}

impl PropertyValue {
    /// Wraps a typed value together with its raw JSON.
    #[must_use]
    pub fn materialized<V: Any + Send + Sync>(raw: Value, typed: V) -> Self {
        Self::Materialized {
            raw,
            typed: Arc::new(typed),
        }
    }

    /// The raw JSON for this value.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        match self {
            Self::Raw(raw) | Self::Materialized { raw, .. } => raw,
        }
    }

    /// Returns the typed value if it is materialized as a `V`.
    #[must_use]
    pub fn downcast<V: Any + Send + Sync>(&self) -> Option<Arc<V>> {
        match self {
            Self::Raw(_) => None,
            Self::Materialized { typed, .. } => Arc::clone(typed).downcast::<V>().ok(),
        }
    }

    /// Returns `true` if a typed form is cached.
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        matches!(self, Self::Materialized { .. })
    }
}

impl fmt::Debug for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => f.debug_tuple("Raw").field(raw).finish(),
            Self::Materialized { raw, .. } => f
                .debug_struct("Materialized")
                .field("raw", raw)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    value: PropertyValue,
    dirty: bool,
}

/// Thread-safe field storage for one resource document.
///
/// Locks are held only for the duration of a single map operation, never
/// across an `.await`.
#[derive(Debug, Default)]
pub struct PropertyStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl PropertyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from a server document. Every field starts clean.
    #[must_use]
    pub fn from_document(document: Document) -> Self {
        let entries = document
            .into_iter()
            .map(|(name, raw)| {
                (
                    name,
                    Entry {
                        value: PropertyValue::Raw(raw),
                        dirty: false,
                    },
                )
            })
            .collect();

        Self {
            entries: RwLock::new(entries),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the stored value, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PropertyValue> {
        self.read().get(name).map(|entry| entry.value.clone())
    }

    /// Returns the raw JSON for a field, if any.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<Value> {
        self.read().get(name).map(|entry| entry.value.raw().clone())
    }

    /// Stores a value.
    ///
    /// With `dirty == true` the field is marked dirty. With `dirty == false`
    /// the field's existing dirty flag is left as it was (new fields start
    /// clean), which is what in-place materialization relies on.
    pub fn set(&self, name: impl Into<String>, value: PropertyValue, dirty: bool) {
        let mut entries = self.write();
        let name = name.into();
        let was_dirty = entries.get(&name).is_some_and(|entry| entry.dirty);
        entries.insert(
            name,
            Entry {
                value,
                dirty: dirty || was_dirty,
            },
        );
    }

    /// Swaps in a typed form of a field, provided its raw value is still
    /// `expected`. The dirty flag is left untouched.
    ///
    /// Returns `false` without storing anything if the field was removed or
    /// replaced since `expected` was read.
    pub fn materialize(
        &self,
        name: &str,
        expected: &Value,
        typed: Arc<dyn Any + Send + Sync>,
    ) -> bool {
        let mut entries = self.write();
        match entries.get_mut(name) {
            Some(entry) if entry.value.raw() == expected => {
                entry.value = PropertyValue::Materialized {
                    raw: expected.clone(),
                    typed,
                };
                true
            }
            _ => false,
        }
    }

    /// Stores a raw JSON value.
    pub fn set_raw(&self, name: impl Into<String>, raw: Value, dirty: bool) {
        self.set(name, PropertyValue::Raw(raw), dirty);
    }

    /// Returns `true` if the field was changed through a setter.
    #[must_use]
    pub fn is_dirty(&self, name: &str) -> bool {
        self.read().get(name).is_some_and(|entry| entry.dirty)
    }

    /// Returns `true` if any field is dirty.
    #[must_use]
    pub fn has_dirty_properties(&self) -> bool {
        self.read().values().any(|entry| entry.dirty)
    }

    /// Returns the raw JSON of every dirty field, for the write path.
    #[must_use]
    pub fn dirty_properties(&self) -> Document {
        self.read()
            .iter()
            .filter(|(_, entry)| entry.dirty)
            .map(|(name, entry)| (name.clone(), entry.value.raw().clone()))
            .collect()
    }

    /// Clears every dirty flag, e.g. after a successful write.
    pub fn mark_clean(&self) {
        for entry in self.write().values_mut() {
            entry.dirty = false;
        }
    }

    /// Returns the full raw document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        self.read()
            .iter()
            .map(|(name, entry)| (name.clone(), entry.value.raw().clone()))
            .collect()
    }

    /// Returns `true` if the field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Number of stored fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no fields are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
