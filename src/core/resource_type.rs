//! Resource types and resource directory kinds.
//!
//! A resource root contains one directory per kind (`drawable`, `font`,
//! `values`, `files`), optionally suffixed with qualifiers. Directories map
//! to the resource types that end up in the table; `values` files contribute
//! the string-like types.

use serde::{Deserialize, Serialize};

/// The type of a generated resource entry.
///
/// Variants are declared in the lexicographic order of their names so that
/// the derived `Ord` matches sorting by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceType {
    /// Image or vector drawable
    Drawable,
    /// Font file
    Font,
    /// Quantity strings declared with `<plurals>`
    Plurals,
    /// Plain string declared with `<string>`
    String,
    /// String list declared with `<string-array>`
    StringArray,
}

impl ResourceType {
    /// All resource types in table order.
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Drawable,
        ResourceType::Font,
        ResourceType::Plurals,
        ResourceType::String,
        ResourceType::StringArray,
    ];

    /// Get the type name as used in resource ids (`string:str_0`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Drawable => "drawable",
            ResourceType::Font => "font",
            ResourceType::Plurals => "plurals",
            ResourceType::String => "string",
            ResourceType::StringArray => "string-array",
        }
    }

    /// Name of the generated accessor container for this type.
    ///
    /// Shards are named by appending the shard index (`String0`, `Drawable12`).
    pub fn accessor_name(&self) -> &'static str {
        match self {
            ResourceType::Drawable => "Drawable",
            ResourceType::Font => "Font",
            ResourceType::Plurals => "Plurals",
            ResourceType::String => "String",
            ResourceType::StringArray => "StringArray",
        }
    }

    /// Whether this type is declared inside `values` XML files.
    pub fn is_value_type(&self) -> bool {
        matches!(
            self,
            ResourceType::String | ResourceType::StringArray | ResourceType::Plurals
        )
    }

    /// Parse the element name used in `values` files.
    pub fn from_value_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(ResourceType::String),
            "string-array" => Some(ResourceType::StringArray),
            "plurals" => Some(ResourceType::Plurals),
            _ => None,
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drawable" => Ok(ResourceType::Drawable),
            "font" => Ok(ResourceType::Font),
            "plurals" => Ok(ResourceType::Plurals),
            "string" => Ok(ResourceType::String),
            "string-array" => Ok(ResourceType::StringArray),
            _ => Err(UnknownResourceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown resource type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResourceType(pub String);

impl std::fmt::Display for UnknownResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown resource type: '{}'", self.0)
    }
}

impl std::error::Error for UnknownResourceType {}

/// The kind of a top-level resource directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryKind {
    Drawable,
    Font,
    Values,
    /// Raw files, read by path at runtime; no accessors are generated
    Files,
}

impl DirectoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectoryKind::Drawable => "drawable",
            DirectoryKind::Font => "font",
            DirectoryKind::Values => "values",
            DirectoryKind::Files => "files",
        }
    }

    /// Parse a directory type prefix (the part before the first `-`).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "drawable" => Some(DirectoryKind::Drawable),
            "font" => Some(DirectoryKind::Font),
            "values" => Some(DirectoryKind::Values),
            "files" => Some(DirectoryKind::Files),
            _ => None,
        }
    }

    /// Resource type produced by every file in this directory, if the
    /// directory is file-per-resource.
    pub fn file_resource_type(&self) -> Option<ResourceType> {
        match self {
            DirectoryKind::Drawable => Some(ResourceType::Drawable),
            DirectoryKind::Font => Some(ResourceType::Font),
            DirectoryKind::Values | DirectoryKind::Files => None,
        }
    }

    /// Whether qualifier suffixes are allowed on this directory.
    pub fn supports_qualifiers(&self) -> bool {
        !matches!(self, DirectoryKind::Files)
    }
}

impl std::fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
