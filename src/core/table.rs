//! The finalized resource table.
//!
//! Entries live in one contiguous, sorted arena. Lookups use binary search
//! and per-type views are sub-slices, so shards and identifier plans can
//! refer to entries by index.

use std::ops::Range;

use serde::Serialize;

use crate::core::resource::ResourceEntry;
use crate::core::resource_type::ResourceType;
use crate::util::hash::Fingerprint;

/// An immutable table of resource entries sorted by (type, key bytes).
///
/// Only [`TableBuilder::finalize`](crate::builder::TableBuilder::finalize)
/// constructs a table, so holding one means the table is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceTable {
    entries: Vec<ResourceEntry>,
}

impl ResourceTable {
    /// Wrap entries that are already sorted and validated.
    pub(crate) fn from_sorted(entries: Vec<ResourceEntry>) -> Self {
        debug_assert!(entries
            .windows(2)
            .all(|w| w[0].sort_key() < w[1].sort_key()));
        ResourceTable { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in emission order.
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceEntry> {
        self.entries.iter()
    }

    /// Look up an entry by type and key.
    pub fn get(&self, resource_type: ResourceType, key: &str) -> Option<&ResourceEntry> {
        self.position(resource_type, key).map(|i| &self.entries[i])
    }

    /// Arena index of an entry.
    pub fn position(&self, resource_type: ResourceType, key: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|e| e.sort_key().cmp(&(resource_type, key.as_bytes())))
            .ok()
    }

    /// Arena index range holding all entries of one type.
    pub fn type_range(&self, resource_type: ResourceType) -> Range<usize> {
        let start = self
            .entries
            .partition_point(|e| e.resource_type < resource_type);
        let end = self
            .entries
            .partition_point(|e| e.resource_type <= resource_type);
        start..end
    }

    /// Entries of one type, in key order.
    pub fn of_type(&self, resource_type: ResourceType) -> &[ResourceEntry] {
        &self.entries[self.type_range(resource_type)]
    }

    /// Resource types present in the table, in table order.
    pub fn types(&self) -> Vec<ResourceType> {
        let mut types: Vec<ResourceType> = self.entries.iter().map(|e| e.resource_type).collect();
        types.dedup();
        types
    }

    /// Content fingerprint covering order, variants and flags.
    ///
    /// Two runs over the same inputs yield the same fingerprint regardless
    /// of scan order.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        for entry in &self.entries {
            fp.update_str(entry.resource_type.as_str())
                .update_str(entry.key.as_str())
                .update_bool(entry.is_experimental);
            for variant in &entry.variants {
                fp.update_str(&variant.qualifiers.canonical())
                    .update_str(&variant.path);
            }
        }
        fp.finish()
    }
}

impl<'a> IntoIterator for &'a ResourceTable {
    type Item = &'a ResourceEntry;
    type IntoIter = std::slice::Iter<'a, ResourceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
