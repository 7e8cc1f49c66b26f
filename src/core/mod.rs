//! Core data structures for resforge.
//!
//! This module contains the foundational types used throughout resforge:
//! - Resource types and directory kinds
//! - Qualifier sets and their parser
//! - Raw resources, entries and the finalized table
//! - Generation errors and warnings

pub mod errors;
pub mod qualifier;
pub mod resource;
pub mod resource_type;
pub mod table;

pub use errors::{GenerateError, GenerateWarning};
pub use qualifier::{parse_qualifiers, QualifierError, QualifierSet, Strictness};
pub use resource::{RawResource, ResourceEntry, ResourceKey, ResourceVariant};
pub use resource_type::{DirectoryKind, ResourceType};
pub use table::ResourceTable;
