//! Static property metadata for resource types.
//!
//! Each resource type declares the fields it understands as a `const` slice
//! of [`PropertyDescriptor`]s. Descriptors are shared read-only by every
//! instance of the type and drive how raw values are converted on first
//! typed access.
//!
//! # Example
//!
//! ```rust
//! use digitalocean_sdk::rest::{PropertyDescriptor, PropertyKind};
//!
//! const NAME: PropertyDescriptor = PropertyDescriptor::string("name");
//! const REGION: PropertyDescriptor = PropertyDescriptor::resource_reference("region", "Region", true);
//!
//! assert_eq!(NAME.name(), "name");
//! assert!(REGION.kind().is_reference());
//! ```

/// The value kind a property is declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    /// A JSON string.
    String,
    /// A JSON integer.
    Integer,
    /// Any JSON number.
    Float,
    /// A JSON boolean.
    Boolean,
    /// An RFC 3339 timestamp carried as a string.
    Date,
    /// A nested JSON object kept untyped.
    Map,
    /// A single resource of type `target`.
    ///
    /// `nested` references carry the full document inline; link references
    /// carry only `{"href": ...}` (or a bare href string).
    ResourceReference {
        /// Resource type name of the referenced resource.
        target: &'static str,
        /// Whether the full document is embedded.
        nested: bool,
    },
    /// An array of resource documents of type `target`.
    ResourceList {
        /// Resource type name of the list members.
        target: &'static str,
    },
}

impl PropertyKind {
    /// A short name for error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Map => "map",
            Self::ResourceReference { .. } => "resource reference",
            Self::ResourceList { .. } => "resource list",
        }
    }

    /// Returns `true` for single and list resource references.
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::ResourceReference { .. } | Self::ResourceList { .. }
        )
    }
}

/// A field declaration: name plus kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: &'static str,
    kind: PropertyKind,
}

impl PropertyDescriptor {
    /// Creates a descriptor of any kind.
    #[must_use]
    pub const fn new(name: &'static str, kind: PropertyKind) -> Self {
        Self { name, kind }
    }

    /// A string property.
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self::new(name, PropertyKind::String)
    }

    /// An integer property.
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Integer)
    }

    /// A floating point property.
    #[must_use]
    pub const fn float(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Float)
    }

    /// A boolean property.
    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Boolean)
    }

    /// A timestamp property.
    #[must_use]
    pub const fn date(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Date)
    }

    /// An untyped nested object.
    #[must_use]
    pub const fn map(name: &'static str) -> Self {
        Self::new(name, PropertyKind::Map)
    }

    /// A single resource reference.
    #[must_use]
    pub const fn resource_reference(name: &'static str, target: &'static str, nested: bool) -> Self {
        Self::new(name, PropertyKind::ResourceReference { target, nested })
    }

    /// A list of resources.
    #[must_use]
    pub const fn resource_list(name: &'static str, target: &'static str) -> Self {
        Self::new(name, PropertyKind::ResourceList { target })
    }

    /// The field name in the server document.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared kind.
    #[must_use]
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }
}

/// Looks up a descriptor by field name.
#[must_use]
pub fn find_descriptor<'a>(
    descriptors: &'a [PropertyDescriptor],
    name: &str,
) -> Option<&'a PropertyDescriptor> {
    descriptors.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTORS: &[PropertyDescriptor] = &[
        PropertyDescriptor::integer("id"),
        PropertyDescriptor::string("name"),
        PropertyDescriptor::resource_list("droplets", "Droplet"),
    ];

    #[test]
    fn test_const_constructors_set_kind() {
        assert_eq!(PropertyDescriptor::date("created_at").kind(), PropertyKind::Date);
        assert_eq!(
            PropertyDescriptor::resource_reference("droplet", "Droplet", false).kind(),
            PropertyKind::ResourceReference {
                target: "Droplet",
                nested: false
            }
        );
    }

    #[test]
    fn test_is_reference() {
        assert!(PropertyKind::ResourceList { target: "Droplet" }.is_reference());
        assert!(!PropertyKind::Map.is_reference());
    }

    #[test]
    fn test_find_descriptor_by_name() {
        assert_eq!(
            find_descriptor(DESCRIPTORS, "name").map(PropertyDescriptor::kind),
            Some(PropertyKind::String)
        );
        assert!(find_descriptor(DESCRIPTORS, "missing").is_none());
    }
}
