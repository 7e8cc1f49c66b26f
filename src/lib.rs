//! resforge - A build-time resource registry generator
//!
//! This crate scans a tree of qualified resource directories, merges every
//! variant into one entry per (type, key), maps keys to identifiers that are
//! valid in the target language and partitions the entries into shards.

pub mod builder;
pub mod core;
pub mod ops;
pub mod sanitizer;
pub mod sources;
pub mod util;

/// Test utilities for resforge unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides temporary resource tree fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    GenerateError, GenerateWarning, QualifierSet, RawResource, ResourceEntry, ResourceTable,
    ResourceType,
};

pub use ops::{generate, Generation, GenerateOptions, Manifest};
pub use util::cancel::CancellationToken;
