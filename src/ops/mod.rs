//! High-level operations.
//!
//! This module contains the implementation of resforge commands.

pub mod generate;

pub use generate::{
    generate, generate_from, generate_from_resources, write_manifest, GenerateOptions,
    Generation, Manifest, ManifestEntry, ManifestShard, ManifestVariant, MANIFEST_VERSION,
};
