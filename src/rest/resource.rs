//! The [`Resource`] trait and the shared state behind every resource.
//!
//! A resource is a thin typed view over a [`ResourceData`]: an href, the
//! query it was fetched with, a [`PropertyStore`] holding the server document,
//! and a weak handle to the [`DataStore`] that produced it. Scalar getters read
//! the raw JSON directly; reference getters materialize a typed resource on
//! first access and cache it in the store, so later reads return the same
//! instance without re-converting.
//!
//! # Implementing a Resource
//!
//! 1. Declare the fields as a `const` slice of [`PropertyDescriptor`]s
//! 2. Wrap a `ResourceData` in a newtype and implement `Resource`
//! 3. Add typed getters that delegate to the `ResourceData` accessors
//!
//! # Example
//!
//! ```rust
//! use digitalocean_sdk::rest::{PropertyDescriptor, Resource, ResourceData, ResourceError};
//!
//! const NAME: PropertyDescriptor = PropertyDescriptor::string("name");
//!
//! #[derive(Clone, Debug)]
//! pub struct Tag {
//!     data: ResourceData,
//! }
//!
//! impl Resource for Tag {
//!     const NAME: &'static str = "Tag";
//!
//!     fn property_descriptors() -> &'static [PropertyDescriptor] {
//!         &[NAME]
//!     }
//!
//!     fn from_data(data: ResourceData) -> Result<Self, ResourceError> {
//!         Ok(Self { data })
//!     }
//!
//!     fn data(&self) -> &ResourceData {
//!         &self.data
//!     }
//! }
//!
//! impl Tag {
//!     pub fn name(&self) -> Result<Option<String>, ResourceError> {
//!         self.data.get_string(&NAME)
//!     }
//! }
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::errors::json_kind;
use crate::rest::{
    find_descriptor, DataStore, Document, PropertyDescriptor, PropertyKind, PropertyStore,
    PropertyValue, QueryParams, ResourceError,
};

/// A typed view over one server document.
///
/// # Required Bounds
///
/// Resources are cheap to clone (clones share the same [`ResourceData`]) and
/// safe to hand across tasks.
pub trait Resource: Clone + fmt::Debug + Send + Sync + Sized + 'static {
    /// The resource type name (e.g. "Droplet").
    ///
    /// Reference descriptors name their target by this value.
    const NAME: &'static str;

    /// Whether fetched documents of this type go through the data store cache.
    const CACHEABLE: bool = true;

    /// The fields this type understands.
    fn property_descriptors() -> &'static [PropertyDescriptor];

    /// Wraps freshly built resource data.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the document cannot back this type.
    fn from_data(data: ResourceData) -> Result<Self, ResourceError>;

    /// The shared state behind this resource.
    fn data(&self) -> &ResourceData;

    /// The canonical href, if the resource has one.
    fn href(&self) -> Option<&str> {
        self.data().href()
    }

    /// Looks up one of this type's descriptors by field name.
    #[must_use]
    fn descriptor(name: &str) -> Option<&'static PropertyDescriptor> {
        find_descriptor(Self::property_descriptors(), name)
    }

    /// Returns `true` if any field was changed through a setter.
    fn is_dirty(&self) -> bool {
        self.data().properties().has_dirty_properties()
    }
}

/// A resource that can appear as an item of a paginated collection.
pub trait CollectionMember: Resource {
    /// The collection field holding the items (e.g. "droplets").
    const PLURAL: &'static str;
}

struct Inner {
    resource: &'static str,
    href: Option<String>,
    query_params: QueryParams,
    properties: PropertyStore,
    data_store: Weak<DataStore>,
}

/// State shared by a resource and all of its clones.
#[derive(Clone)]
pub struct ResourceData {
    inner: Arc<Inner>,
}

impl fmt::Debug for ResourceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceData")
            .field("resource", &self.inner.resource)
            .field("href", &self.inner.href)
            .field("query_params", &self.inner.query_params)
            .field("properties", &self.inner.properties)
            .finish_non_exhaustive()
    }
}

impl ResourceData {
    pub(crate) fn new(
        resource: &'static str,
        href: Option<String>,
        query_params: QueryParams,
        properties: PropertyStore,
        data_store: Weak<DataStore>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                resource,
                href,
                query_params,
                properties,
                data_store,
            }),
        }
    }

    /// Creates resource data that is not bound to any data store.
    ///
    /// Scalar getters work as usual; reference getters fail with
    /// [`ResourceError::DataStoreReleased`].
    #[must_use]
    pub fn detached(resource: &'static str, document: Document) -> Self {
        let href = document
            .get("href")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        Self::new(
            resource,
            href,
            QueryParams::new(),
            PropertyStore::from_document(document),
            Weak::new(),
        )
    }

    /// The resource type name this data was built for.
    #[must_use]
    pub fn resource_name(&self) -> &'static str {
        self.inner.resource
    }

    /// The canonical href, if any.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.inner.href.as_deref()
    }

    /// The query parameters the document was fetched with.
    #[must_use]
    pub fn query_params(&self) -> &QueryParams {
        &self.inner.query_params
    }

    /// The underlying property store.
    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.inner.properties
    }

    /// The raw JSON of every field changed through a setter.
    #[must_use]
    pub fn dirty_properties(&self) -> Document {
        self.inner.properties.dirty_properties()
    }

    /// The data store that produced this resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::DataStoreReleased`] if it has been dropped.
    pub fn data_store(&self) -> Result<Arc<DataStore>, ResourceError> {
        self.inner
            .data_store
            .upgrade()
            .ok_or(ResourceError::DataStoreReleased)
    }

    /// The raw JSON for a field, if present.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<Value> {
        self.inner.properties.get_raw(name)
    }

    fn kind_mismatch(&self, descriptor: &PropertyDescriptor, requested: &str) -> ResourceError {
        ResourceError::schema_violation(
            self.inner.resource,
            descriptor.name(),
            format!(
                "declared as {}, accessed as {requested}",
                descriptor.kind().name()
            ),
        )
    }

    fn check_kind(
        &self,
        descriptor: &PropertyDescriptor,
        kind: PropertyKind,
    ) -> Result<(), ResourceError> {
        if descriptor.kind() == kind {
            Ok(())
        } else {
            Err(self.kind_mismatch(descriptor, kind.name()))
        }
    }

    fn check_target<T: Resource>(
        &self,
        descriptor: &PropertyDescriptor,
        target: &'static str,
    ) -> Result<(), ResourceError> {
        if target == T::NAME {
            Ok(())
        } else {
            Err(ResourceError::schema_violation(
                self.inner.resource,
                descriptor.name(),
                format!("references {target}, accessed as {}", T::NAME),
            ))
        }
    }

    /// Reads a present, non-null raw value after checking the descriptor kind.
    fn scalar(
        &self,
        descriptor: &PropertyDescriptor,
        kind: PropertyKind,
    ) -> Result<Option<Value>, ResourceError> {
        self.check_kind(descriptor, kind)?;
        Ok(self
            .inner
            .properties
            .get_raw(descriptor.name())
            .filter(|value| !value.is_null()))
    }

    /// Reads a string property.
    ///
    /// # Errors
    ///
    /// [`ResourceError::TypeMismatch`] if the raw value is not a string;
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a string.
    pub fn get_string(
        &self,
        descriptor: &PropertyDescriptor,
    ) -> Result<Option<String>, ResourceError> {
        match self.scalar(descriptor, PropertyKind::String)? {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(ResourceError::type_mismatch(
                descriptor.name(),
                "string",
                &other,
            )),
        }
    }

    /// Reads an integer property.
    ///
    /// # Errors
    ///
    /// [`ResourceError::TypeMismatch`] if the raw value is not an integer
    /// that fits in an `i64`.
    pub fn get_integer(&self, descriptor: &PropertyDescriptor) -> Result<Option<i64>, ResourceError> {
        self.scalar(descriptor, PropertyKind::Integer)?
            .map(|value| {
                value
                    .as_i64()
                    .ok_or_else(|| ResourceError::type_mismatch(descriptor.name(), "integer", &value))
            })
            .transpose()
    }

    /// Reads a floating point property. Integers are accepted.
    ///
    /// # Errors
    ///
    /// [`ResourceError::TypeMismatch`] if the raw value is not a number.
    pub fn get_float(&self, descriptor: &PropertyDescriptor) -> Result<Option<f64>, ResourceError> {
        self.scalar(descriptor, PropertyKind::Float)?
            .map(|value| {
                value
                    .as_f64()
                    .ok_or_else(|| ResourceError::type_mismatch(descriptor.name(), "float", &value))
            })
            .transpose()
    }

    /// Reads a boolean property.
    ///
    /// # Errors
    ///
    /// [`ResourceError::TypeMismatch`] if the raw value is not a boolean.
    pub fn get_boolean(
        &self,
        descriptor: &PropertyDescriptor,
    ) -> Result<Option<bool>, ResourceError> {
        self.scalar(descriptor, PropertyKind::Boolean)?
            .map(|value| {
                value
                    .as_bool()
                    .ok_or_else(|| ResourceError::type_mismatch(descriptor.name(), "boolean", &value))
            })
            .transpose()
    }

    /// Reads an untyped nested object.
    ///
    /// # Errors
    ///
    /// [`ResourceError::TypeMismatch`] if the raw value is not an object.
    pub fn get_map(&self, descriptor: &PropertyDescriptor) -> Result<Option<Document>, ResourceError> {
        match self.scalar(descriptor, PropertyKind::Map)? {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(ResourceError::type_mismatch(
                descriptor.name(),
                "object",
                &other,
            )),
        }
    }

    /// Reads an RFC 3339 timestamp. The parsed value is cached in place.
    ///
    /// # Errors
    ///
    /// [`ResourceError::TypeMismatch`] if the raw value is not a string or
    /// does not parse as RFC 3339.
    pub fn get_date(
        &self,
        descriptor: &PropertyDescriptor,
    ) -> Result<Option<DateTime<Utc>>, ResourceError> {
        self.check_kind(descriptor, PropertyKind::Date)?;
        let Some(value) = self.inner.properties.get(descriptor.name()) else {
            return Ok(None);
        };
        if let Some(date) = value.downcast::<DateTime<Utc>>() {
            return Ok(Some(*date));
        }

        let raw = value.raw().clone();
        let date = match &raw {
            Value::Null => return Ok(None),
            Value::String(text) => DateTime::parse_from_rfc3339(text)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|_| ResourceError::TypeMismatch {
                    property: descriptor.name().to_string(),
                    expected: "RFC 3339 date",
                    found: "string",
                })?,
            other => return Err(ResourceError::type_mismatch(descriptor.name(), "date", other)),
        };

        self.inner
            .properties
            .materialize(descriptor.name(), &raw, Arc::new(date));
        Ok(Some(date))
    }

    /// Reads a single referenced resource, materializing it on first access.
    ///
    /// Nested references are built from the embedded document. Link
    /// references accept `{"href": ...}` or a bare href string and produce a
    /// resource that carries only that href. Either way the typed value
    /// replaces the raw one in place without marking the field dirty.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a
    /// reference to `T`, or the payload shape does not match it;
    /// [`ResourceError::DataStoreReleased`] if no data store is reachable.
    pub fn get_resource_property<T: Resource>(
        &self,
        descriptor: &PropertyDescriptor,
    ) -> Result<Option<T>, ResourceError> {
        let PropertyKind::ResourceReference { target, nested } = descriptor.kind() else {
            return Err(self.kind_mismatch(descriptor, "resource reference"));
        };
        self.check_target::<T>(descriptor, target)?;

        let Some(value) = self.inner.properties.get(descriptor.name()) else {
            return Ok(None);
        };
        if let Some(existing) = value.downcast::<T>() {
            return Ok(Some(T::clone(&existing)));
        }

        let raw = value.raw().clone();
        if raw.is_null() {
            return Ok(None);
        }

        let resource = self.reference_from_raw::<T>(descriptor, &raw, nested)?;
        self.inner
            .properties
            .materialize(descriptor.name(), &raw, Arc::new(resource.clone()));
        Ok(Some(resource))
    }

    fn reference_from_raw<T: Resource>(
        &self,
        descriptor: &PropertyDescriptor,
        raw: &Value,
        nested: bool,
    ) -> Result<T, ResourceError> {
        match (raw, nested) {
            (Value::Object(document), true) => self.data_store()?.instantiate(document.clone()),
            (Value::Object(document), false) => {
                let href = document
                    .get("href")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        ResourceError::schema_violation(
                            self.inner.resource,
                            descriptor.name(),
                            "link reference has no href",
                        )
                    })?
                    .to_string();
                self.data_store()?
                    .build(Some(href), QueryParams::new(), document.clone())
            }
            (Value::String(href), false) => {
                let mut document = Document::new();
                document.insert("href".to_string(), Value::String(href.clone()));
                self.data_store()?
                    .build(Some(href.clone()), QueryParams::new(), document)
            }
            (other, _) => Err(ResourceError::schema_violation(
                self.inner.resource,
                descriptor.name(),
                format!(
                    "expected {} reference, found {}",
                    if nested { "a nested" } else { "a link" },
                    json_kind(other)
                ),
            )),
        }
    }

    /// Reads a list of resources, materializing the whole list on first access.
    ///
    /// An absent or null field yields an empty list.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a list of
    /// `T`, the raw value is not an array, or an entry is not an object.
    pub fn get_resource_list_property<T: Resource>(
        &self,
        descriptor: &PropertyDescriptor,
    ) -> Result<Vec<T>, ResourceError> {
        self.resource_list(descriptor)
            .map(|items| items.as_ref().clone())
    }

    pub(crate) fn resource_list<T: Resource>(
        &self,
        descriptor: &PropertyDescriptor,
    ) -> Result<Arc<Vec<T>>, ResourceError> {
        let PropertyKind::ResourceList { target } = descriptor.kind() else {
            return Err(self.kind_mismatch(descriptor, "resource list"));
        };
        self.check_target::<T>(descriptor, target)?;

        let Some(value) = self.inner.properties.get(descriptor.name()) else {
            return Ok(Arc::new(Vec::new()));
        };
        if let Some(existing) = value.downcast::<Vec<T>>() {
            return Ok(existing);
        }

        let raw = value.raw().clone();
        let entries = match &raw {
            Value::Null => return Ok(Arc::new(Vec::new())),
            Value::Array(entries) => entries,
            other => {
                return Err(ResourceError::schema_violation(
                    self.inner.resource,
                    descriptor.name(),
                    format!(
                        "expected an array, found {}",
                        json_kind(other)
                    ),
                ))
            }
        };

        let data_store = self.data_store()?;
        let mut items = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Value::Object(document) = entry else {
                return Err(ResourceError::schema_violation(
                    self.inner.resource,
                    descriptor.name(),
                    format!(
                        "item {index} is {}, expected an object",
                        json_kind(entry)
                    ),
                ));
            };
            items.push(data_store.instantiate::<T>(document.clone())?);
        }

        let items = Arc::new(items);
        let typed: Arc<dyn Any + Send + Sync> = Arc::<Vec<T>>::clone(&items);
        self.inner
            .properties
            .materialize(descriptor.name(), &raw, typed);
        Ok(items)
    }

    fn set_scalar(
        &self,
        descriptor: &PropertyDescriptor,
        kind: PropertyKind,
        value: Value,
    ) -> Result<(), ResourceError> {
        self.check_kind(descriptor, kind)?;
        self.inner.properties.set_raw(descriptor.name(), value, true);
        Ok(())
    }

    /// Sets a string property and marks it dirty.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a string.
    pub fn set_string(
        &self,
        descriptor: &PropertyDescriptor,
        value: impl Into<String>,
    ) -> Result<(), ResourceError> {
        self.set_scalar(descriptor, PropertyKind::String, Value::String(value.into()))
    }

    /// Sets an integer property and marks it dirty.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not an integer.
    pub fn set_integer(&self, descriptor: &PropertyDescriptor, value: i64) -> Result<(), ResourceError> {
        self.set_scalar(descriptor, PropertyKind::Integer, Value::from(value))
    }

    /// Sets a floating point property and marks it dirty.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a float.
    pub fn set_float(&self, descriptor: &PropertyDescriptor, value: f64) -> Result<(), ResourceError> {
        self.set_scalar(descriptor, PropertyKind::Float, Value::from(value))
    }

    /// Sets a boolean property and marks it dirty.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a boolean.
    pub fn set_boolean(&self, descriptor: &PropertyDescriptor, value: bool) -> Result<(), ResourceError> {
        self.set_scalar(descriptor, PropertyKind::Boolean, Value::Bool(value))
    }

    /// Sets an untyped nested object and marks it dirty.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a map.
    pub fn set_map(&self, descriptor: &PropertyDescriptor, value: Document) -> Result<(), ResourceError> {
        self.set_scalar(descriptor, PropertyKind::Map, Value::Object(value))
    }

    /// Sets a timestamp property and marks it dirty.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a date.
    pub fn set_date(
        &self,
        descriptor: &PropertyDescriptor,
        value: DateTime<Utc>,
    ) -> Result<(), ResourceError> {
        self.check_kind(descriptor, PropertyKind::Date)?;
        let raw = Value::String(value.to_rfc3339_opts(SecondsFormat::Secs, true));
        self.inner.properties.set(
            descriptor.name(),
            PropertyValue::materialized(raw, value),
            true,
        );
        Ok(())
    }

    /// Sets a single resource reference and marks it dirty.
    ///
    /// Nested references store the resource's full document; link
    /// references store `{"href": ...}`.
    ///
    /// # Errors
    ///
    /// [`ResourceError::SchemaViolation`] if the descriptor is not a
    /// reference to `T`; [`ResourceError::MissingHref`] if a link reference
    /// is set to a resource without an href.
    pub fn set_resource_property<T: Resource>(
        &self,
        descriptor: &PropertyDescriptor,
        resource: &T,
    ) -> Result<(), ResourceError> {
        let PropertyKind::ResourceReference { target, nested } = descriptor.kind() else {
            return Err(self.kind_mismatch(descriptor, "resource reference"));
        };
        self.check_target::<T>(descriptor, target)?;

        let raw = if nested {
            Value::Object(resource.data().properties().to_document())
        } else {
            let href = resource
                .href()
                .ok_or(ResourceError::MissingHref { resource: T::NAME })?;
            serde_json::json!({ "href": href })
        };

        self.inner.properties.set(
            descriptor.name(),
            PropertyValue::materialized(raw, resource.clone()),
            true,
        );
        Ok(())
    }
}
