//! Droplet resource implementation.
//!
//! This module provides the [`Droplet`] resource, the [`DropletContainer`]
//! envelope returned by `GET /v2/droplets/<id>`, and the [`DropletList`]
//! collection returned by `GET /v2/droplets`.
//!
//! # Embedded Region
//!
//! Droplets embed their full region document. The typed [`Region`] is built
//! on the first call to [`Droplet::region`] and reused afterwards.
//!
//! # Example
//!
//! ```rust,ignore
//! let droplet = client.get_droplet(3164444).await?;
//! println!("{:?} ({:?} MB)", droplet.name()?, droplet.memory()?);
//!
//! if let Some(region) = droplet.region()? {
//!     println!("Region: {:?}", region.slug()?);
//! }
//! ```

use chrono::{DateTime, Utc};

use crate::rest::{
    CollectionMember, CollectionResource, Document, PropertyDescriptor, Resource, ResourceData,
    ResourceError,
};

use super::Region;

const ID: PropertyDescriptor = PropertyDescriptor::integer("id");
const NAME: PropertyDescriptor = PropertyDescriptor::string("name");
const MEMORY: PropertyDescriptor = PropertyDescriptor::integer("memory");
const VCPUS: PropertyDescriptor = PropertyDescriptor::integer("vcpus");
const DISK: PropertyDescriptor = PropertyDescriptor::integer("disk");
const LOCKED: PropertyDescriptor = PropertyDescriptor::boolean("locked");
const STATUS: PropertyDescriptor = PropertyDescriptor::string("status");
const SIZE_SLUG: PropertyDescriptor = PropertyDescriptor::string("size_slug");
const CREATED_AT: PropertyDescriptor = PropertyDescriptor::date("created_at");
const REGION: PropertyDescriptor = PropertyDescriptor::resource_reference("region", Region::NAME, true);
const NETWORKS: PropertyDescriptor = PropertyDescriptor::map("networks");

const PROPERTIES: &[PropertyDescriptor] = &[
    ID, NAME, MEMORY, VCPUS, DISK, LOCKED, STATUS, SIZE_SLUG, CREATED_AT, REGION, NETWORKS,
];

/// A DigitalOcean virtual machine.
///
/// # Fields
///
/// ## Read-Only Fields
/// - `id` - The unique identifier
/// - `memory`, `vcpus`, `disk` - Size in MB, CPU count and disk GB
/// - `locked` - Whether user actions are blocked
/// - `status` - `new`, `active`, `off` or `archive`
/// - `created_at` - Creation time
/// - `region` - Embedded region document
/// - `networks` - Untyped network configuration
///
/// ## Writable Fields
/// - `name` - The human-readable name
/// - `size_slug` - The size to resize to
#[derive(Clone, Debug)]
pub struct Droplet {
    data: ResourceData,
}

impl Resource for Droplet {
    const NAME: &'static str = "Droplet";

    fn property_descriptors() -> &'static [PropertyDescriptor] {
        PROPERTIES
    }

    fn from_data(data: ResourceData) -> Result<Self, ResourceError> {
        Ok(Self { data })
    }

    fn data(&self) -> &ResourceData {
        &self.data
    }
}

impl CollectionMember for Droplet {
    const PLURAL: &'static str = "droplets";
}

/// A paginated list of droplets.
pub type DropletList = CollectionResource<Droplet>;

impl Droplet {
    /// The unique identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not an integer.
    pub fn id(&self) -> Result<Option<i64>, ResourceError> {
        self.data.get_integer(&ID)
    }

    /// The human-readable name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not a string.
    pub fn name(&self) -> Result<Option<String>, ResourceError> {
        self.data.get_string(&NAME)
    }

    /// Sets the name and marks it dirty.
    ///
    /// # Errors
    ///
    /// Never fails for a droplet; the signature matches the other setters.
    pub fn set_name(&self, name: impl Into<String>) -> Result<(), ResourceError> {
        self.data.set_string(&NAME, name)
    }

    /// Memory in megabytes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not an integer.
    pub fn memory(&self) -> Result<Option<i64>, ResourceError> {
        self.data.get_integer(&MEMORY)
    }

    /// Number of virtual CPUs.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not an integer.
    pub fn vcpus(&self) -> Result<Option<i64>, ResourceError> {
        self.data.get_integer(&VCPUS)
    }

    /// Disk size in gigabytes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not an integer.
    pub fn disk(&self) -> Result<Option<i64>, ResourceError> {
        self.data.get_integer(&DISK)
    }

    /// Whether the droplet is locked against user actions.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not a boolean.
    pub fn locked(&self) -> Result<Option<bool>, ResourceError> {
        self.data.get_boolean(&LOCKED)
    }

    /// The lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not a string.
    pub fn status(&self) -> Result<Option<String>, ResourceError> {
        self.data.get_string(&STATUS)
    }

    /// The size slug, e.g. `s-1vcpu-1gb`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not a string.
    pub fn size_slug(&self) -> Result<Option<String>, ResourceError> {
        self.data.get_string(&SIZE_SLUG)
    }

    /// Sets the size slug and marks it dirty.
    ///
    /// # Errors
    ///
    /// Never fails for a droplet; the signature matches the other setters.
    pub fn set_size_slug(&self, size_slug: impl Into<String>) -> Result<(), ResourceError> {
        self.data.set_string(&SIZE_SLUG, size_slug)
    }

    /// When the droplet was created.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not an
    /// RFC 3339 timestamp.
    pub fn created_at(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        self.data.get_date(&CREATED_AT)
    }

    /// The embedded region.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SchemaViolation`] if `region` is not an
    /// object.
    pub fn region(&self) -> Result<Option<Region>, ResourceError> {
        self.data.get_resource_property(&REGION)
    }

    /// Replaces the region and marks it dirty.
    ///
    /// # Errors
    ///
    /// Never fails for a droplet; the signature matches the other setters.
    pub fn set_region(&self, region: &Region) -> Result<(), ResourceError> {
        self.data.set_resource_property(&REGION, region)
    }

    /// The untyped network configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not an object.
    pub fn networks(&self) -> Result<Option<Document>, ResourceError> {
        self.data.get_map(&NETWORKS)
    }
}

const DROPLET: PropertyDescriptor =
    PropertyDescriptor::resource_reference("droplet", Droplet::NAME, true);

/// The `{"droplet": {...}}` envelope of a single-droplet response.
#[derive(Clone, Debug)]
pub struct DropletContainer {
    data: ResourceData,
}

impl Resource for DropletContainer {
    const NAME: &'static str = "DropletContainer";

    fn property_descriptors() -> &'static [PropertyDescriptor] {
        &[DROPLET]
    }

    fn from_data(data: ResourceData) -> Result<Self, ResourceError> {
        Ok(Self { data })
    }

    fn data(&self) -> &ResourceData {
        &self.data
    }
}

impl DropletContainer {
    /// The wrapped droplet.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SchemaViolation`] if `droplet` is not an
    /// object.
    pub fn droplet(&self) -> Result<Option<Droplet>, ResourceError> {
        self.data.get_resource_property(&DROPLET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::test_support::{data_store_with, StubExecutor};
    use serde_json::json;

    fn droplet_document() -> Document {
        json!({
            "id": 3164444,
            "name": "example.com",
            "memory": 1024,
            "vcpus": 1,
            "disk": 25,
            "locked": false,
            "status": "active",
            "size_slug": "s-1vcpu-1gb",
            "created_at": "2020-07-21T18:37:44Z",
            "region": {"slug": "nyc3", "name": "New York 3", "available": true},
            "networks": {"v4": [{"ip_address": "104.236.32.182", "type": "public"}]}
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_droplet_getters() {
        let store = data_store_with(StubExecutor::new());
        let droplet: Droplet = store.instantiate(droplet_document()).unwrap();

        assert_eq!(droplet.id().unwrap(), Some(3_164_444));
        assert_eq!(droplet.name().unwrap().as_deref(), Some("example.com"));
        assert_eq!(droplet.memory().unwrap(), Some(1024));
        assert_eq!(droplet.vcpus().unwrap(), Some(1));
        assert_eq!(droplet.disk().unwrap(), Some(25));
        assert_eq!(droplet.locked().unwrap(), Some(false));
        assert_eq!(droplet.status().unwrap().as_deref(), Some("active"));
        assert_eq!(droplet.size_slug().unwrap().as_deref(), Some("s-1vcpu-1gb"));
        assert_eq!(
            droplet.created_at().unwrap().unwrap().to_rfc3339(),
            "2020-07-21T18:37:44+00:00"
        );
        assert!(droplet.networks().unwrap().unwrap().contains_key("v4"));
    }

    #[test]
    fn test_region_is_materialized_once_and_stays_clean() {
        let store = data_store_with(StubExecutor::new());
        let droplet: Droplet = store.instantiate(droplet_document()).unwrap();

        let region = droplet.region().unwrap().unwrap();
        assert_eq!(region.slug().unwrap().as_deref(), Some("nyc3"));
        assert!(droplet.data().properties().get("region").unwrap().is_materialized());
        assert!(!droplet.is_dirty());

        let again = droplet.region().unwrap().unwrap();
        assert_eq!(again.name().unwrap().as_deref(), Some("New York 3"));
    }

    #[test]
    fn test_setters_are_reported_as_dirty() {
        let store = data_store_with(StubExecutor::new());
        let droplet: Droplet = store.instantiate(droplet_document()).unwrap();
        droplet.set_name("renamed").unwrap();
        droplet.set_size_slug("s-2vcpu-2gb").unwrap();

        assert!(droplet.is_dirty());
        assert_eq!(
            serde_json::Value::Object(droplet.data().dirty_properties()),
            json!({"name": "renamed", "size_slug": "s-2vcpu-2gb"})
        );
    }

    #[test]
    fn test_set_region_embeds_document() {
        let store = data_store_with(StubExecutor::new());
        let droplet: Droplet = store.instantiate(droplet_document()).unwrap();
        let region: Region = store
            .instantiate(json!({"slug": "sfo3"}).as_object().unwrap().clone())
            .unwrap();

        droplet.set_region(&region).unwrap();

        assert_eq!(droplet.data().get_raw("region"), Some(json!({"slug": "sfo3"})));
        assert_eq!(
            droplet.region().unwrap().unwrap().slug().unwrap().as_deref(),
            Some("sfo3")
        );
        assert!(droplet.data().properties().is_dirty("region"));
    }

    #[test]
    fn test_container_unwraps_droplet() {
        let store = data_store_with(StubExecutor::new());
        let mut envelope = Document::new();
        envelope.insert(
            "droplet".to_string(),
            serde_json::Value::Object(droplet_document()),
        );
        let container: DropletContainer = store.instantiate(envelope).unwrap();

        let droplet = container.droplet().unwrap().unwrap();
        assert_eq!(droplet.id().unwrap(), Some(3_164_444));
    }

    #[test]
    fn test_droplet_is_collection_member() {
        assert_eq!(Droplet::PLURAL, "droplets");
        assert!(!DropletList::CACHEABLE);
    }
}
