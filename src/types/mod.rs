//! Shared identifier, direction and transform types.

mod direction;
mod transform;

pub use direction::{Axis, Direction};
pub use transform::{BlockTransform, ElementRotation};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Namespace assumed when an identifier string omits one.
pub const DEFAULT_NAMESPACE: &str = "core";

/// Map a point from model coordinates (0-16 per axis) into the centered
/// unit cube (-0.5 to 0.5) that baked geometry lives in. Element corners
/// and rotation origins all pass through here.
pub fn normalize_point(point: [f32; 3]) -> [f32; 3] {
    [
        point[0] / 16.0 - 0.5,
        point[1] / 16.0 - 0.5,
        point[2] / 16.0 - 0.5,
    ]
}

/// A namespaced resource identifier, e.g. `core:block/stone`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Parse `"ns:path"`, defaulting the namespace when absent.
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resource path of the blockstate definition for this block id,
    /// following the `blockstates/<path>.json` convention.
    pub fn blockstate_path(&self) -> ResourceLocation {
        ResourceLocation::new(&self.namespace, format!("blockstates/{}.json", self.path))
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl From<&str> for ResourceLocation {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl Serialize for ResourceLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ResourceLocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ResourceLocation::parse(&s))
    }
}

/// Identifier of one bake target: a model file, optionally pinned to a
/// blockstate variant or item pose.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelId {
    pub location: ResourceLocation,
    pub variant: Option<String>,
}

impl ModelId {
    /// A plain model file, no variant.
    pub fn plain(location: ResourceLocation) -> Self {
        Self {
            location,
            variant: None,
        }
    }

    /// A model pinned to a serialized blockstate variant.
    pub fn with_variant(location: ResourceLocation, variant: impl Into<String>) -> Self {
        Self {
            location,
            variant: Some(variant.into()),
        }
    }

    /// An item's inventory pose.
    pub fn inventory(location: ResourceLocation) -> Self {
        Self::with_variant(location, "inventory")
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{}#{}", self.location, variant),
            None => write!(f, "{}", self.location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_location() {
        let loc = ResourceLocation::parse("core:block/stone");
        assert_eq!(loc.namespace(), "core");
        assert_eq!(loc.path(), "block/stone");

        let bare = ResourceLocation::parse("block/stone");
        assert_eq!(bare.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(bare, loc);

        let modded = ResourceLocation::parse("mymod:block/custom");
        assert_eq!(modded.namespace(), "mymod");
    }

    #[test]
    fn test_blockstate_path() {
        let loc = ResourceLocation::parse("core:stone");
        assert_eq!(
            loc.blockstate_path(),
            ResourceLocation::parse("core:blockstates/stone.json")
        );
    }

    #[test]
    fn test_resource_location_serde() {
        let loc: ResourceLocation = serde_json::from_str("\"block/stone\"").unwrap();
        assert_eq!(loc, ResourceLocation::parse("core:block/stone"));
        assert_eq!(serde_json::to_string(&loc).unwrap(), "\"core:block/stone\"");
    }

    #[test]
    fn test_model_id_display() {
        let id = ModelId::with_variant(ResourceLocation::parse("core:lamp"), "lit=true");
        assert_eq!(id.to_string(), "core:lamp#lit=true");
        assert_eq!(
            ModelId::plain(ResourceLocation::parse("block/stone")).to_string(),
            "core:block/stone"
        );
    }
}
