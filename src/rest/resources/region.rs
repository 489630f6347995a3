//! Region resource implementation.
//!
//! Regions are the datacenters resources are deployed to. A droplet embeds
//! its full region document under `region`.

use crate::rest::{PropertyDescriptor, Resource, ResourceData, ResourceError};

const SLUG: PropertyDescriptor = PropertyDescriptor::string("slug");
const NAME: PropertyDescriptor = PropertyDescriptor::string("name");
const AVAILABLE: PropertyDescriptor = PropertyDescriptor::boolean("available");

const PROPERTIES: &[PropertyDescriptor] = &[SLUG, NAME, AVAILABLE];

/// A DigitalOcean datacenter region.
#[derive(Clone, Debug)]
pub struct Region {
    data: ResourceData,
}

impl Resource for Region {
    const NAME: &'static str = "Region";

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

impl Region {
    /// The short identifier, e.g. `nyc3`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not a string.
    pub fn slug(&self) -> Result<Option<String>, ResourceError> {
        self.data.get_string(&SLUG)
    }

    /// The display name, e.g. `New York 3`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not a string.
    pub fn name(&self) -> Result<Option<String>, ResourceError> {
        self.data.get_string(&NAME)
    }

    /// Whether new resources can be created in this region.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::TypeMismatch`] if the field is not a boolean.
    pub fn available(&self) -> Result<Option<bool>, ResourceError> {
        self.data.get_boolean(&AVAILABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_region_getters() {
        let region = Region::from_data(ResourceData::detached(
            Region::NAME,
            json!({"slug": "ams3", "name": "Amsterdam 3", "available": true})
                .as_object()
                .unwrap()
                .clone(),
        ))
        .unwrap();

        assert_eq!(region.slug().unwrap().as_deref(), Some("ams3"));
        assert_eq!(region.name().unwrap().as_deref(), Some("Amsterdam 3"));
        assert_eq!(region.available().unwrap(), Some(true));
    }

    #[test]
    fn test_region_descriptors() {
        assert_eq!(Region::property_descriptors().len(), 3);
        assert!(Region::descriptor("slug").is_some());
        assert!(Region::descriptor("sizes").is_none());
    }
}
