//! Resource keys, variants and entries.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::qualifier::QualifierSet;
use crate::core::resource_type::ResourceType;

/// A resource identifier, unique within one resource type.
///
/// Keys are case-sensitive and compare byte-wise, which is what gives the
/// table its `str_0, str_1, str_10, str_100` order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(String);

impl ResourceKey {
    pub fn new(key: impl Into<String>) -> Self {
        ResourceKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResourceKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ResourceKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKey {
    fn from(s: &str) -> Self {
        ResourceKey(s.to_string())
    }
}

/// An unvalidated resource occurrence as reported by a scanner.
///
/// All fields are raw strings; the table builder parses the type and
/// qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResource {
    /// Resource type name (`string`, `drawable`, ...)
    pub resource_type: String,
    /// Resource key as written in the source
    pub key: String,
    /// Qualifier suffix without the directory type (`fr`, `en-rUS-dark`)
    pub qualifiers: String,
    /// Path of the contributing file, relative to the resource root
    pub path: String,
}

impl RawResource {
    pub fn new(
        resource_type: impl Into<String>,
        key: impl Into<String>,
        qualifiers: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        RawResource {
            resource_type: resource_type.into(),
            key: key.into(),
            qualifiers: qualifiers.into(),
            path: path.into(),
        }
    }
}

/// One concrete file contributing to a resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceVariant {
    pub qualifiers: QualifierSet,
    pub path: String,
}

/// A logical resource aggregating all of its qualified variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub resource_type: ResourceType,
    pub key: ResourceKey,
    /// Variants sorted by qualifier set; qualifier sets are pairwise distinct.
    pub variants: Vec<ResourceVariant>,
    /// Whether accessors for this entry are guarded as experimental API.
    pub is_experimental: bool,
}

impl ResourceEntry {
    /// Resource id in `type:key` form.
    pub fn id(&self) -> String {
        format!("{}:{}", self.resource_type, self.key)
    }

    /// The variant without qualifiers, if present.
    pub fn default_variant(&self) -> Option<&ResourceVariant> {
        self.variants.iter().find(|v| v.qualifiers.is_default())
    }

    pub fn has_default(&self) -> bool {
        self.default_variant().is_some()
    }

    /// Sort key used for table order.
    pub(crate) fn sort_key(&self) -> (ResourceType, &[u8]) {
        (self.resource_type, self.key.as_str().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::qualifier::{parse_qualifiers, Strictness};

    #[test]
    fn test_key_order_is_lexicographic() {
        let mut keys: Vec<ResourceKey> = ["str_100", "str_2", "str_10", "str_1", "str_0"]
            .into_iter()
            .map(ResourceKey::from)
            .collect();
        keys.sort();
        let sorted: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(sorted, vec!["str_0", "str_1", "str_10", "str_100", "str_2"]);
    }

    #[test]
    fn test_entry_default_variant() {
        let entry = ResourceEntry {
            resource_type: ResourceType::String,
            key: "app_name".into(),
            variants: vec![ResourceVariant {
                qualifiers: parse_qualifiers("fr", Strictness::Strict).unwrap(),
                path: "values-fr/strings.xml".to_string(),
            }],
            is_experimental: false,
        };
        assert_eq!(entry.id(), "string:app_name");
        assert!(!entry.has_default());
    }
}
