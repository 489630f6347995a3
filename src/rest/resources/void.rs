use crate::rest::{PropertyDescriptor, Resource, ResourceData, ResourceError};

/// A resource with no declared properties, for endpoints whose response
/// body carries nothing of interest (e.g. actions that return `204`).
#[derive(Clone, Debug)]
pub struct VoidResource {
    data: ResourceData,
}

impl Resource for VoidResource {
    const NAME: &'static str = "VoidResource";
    const CACHEABLE: bool = false;

    fn property_descriptors() -> &'static [PropertyDescriptor] {
        &[]
    }

    fn from_data(data: ResourceData) -> Result<Self, ResourceError> {
        Ok(Self { data })
    }

    fn data(&self) -> &ResourceData {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::test_support::{data_store_with, StubExecutor};
    use serde_json::json;

    #[tokio::test]
    async fn test_void_resource_keeps_raw_document() {
        let executor = StubExecutor::new().with("/v2/void", json!({"ignored": true}));
        let store = data_store_with(executor.clone());

        let first: VoidResource = store.get_resource("/v2/void").await.unwrap();
        let _: VoidResource = store.get_resource("/v2/void").await.unwrap();

        assert!(VoidResource::property_descriptors().is_empty());
        assert_eq!(first.data().get_raw("ignored"), Some(json!(true)));
        assert_eq!(executor.fetches(), 2);
    }
}
