//! Partitioning of the sorted table into fixed-capacity shards.
//!
//! A shard is an index range into the table arena. Each resource type is
//! partitioned on its own: entry `i` of a type (0-indexed in table order)
//! lands in shard `i / capacity` of that type, but only once the type holds
//! more entries than the partition threshold. Smaller types get one shard.

use std::ops::Range;

use serde::Serialize;

use crate::core::resource_type::ResourceType;
use crate::core::table::ResourceTable;

/// One generated accessor container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shard {
    pub resource_type: ResourceType,
    /// Index of this shard among the shards of its type
    pub index: usize,
    /// Container name, e.g. `String0`
    pub name: String,
    /// Arena index range of the entries in this shard
    pub range: Range<usize>,
}

impl Shard {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Shard capacity and the size at which partitioning starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardPolicy {
    pub capacity: usize,
    pub threshold: usize,
}

impl ShardPolicy {
    /// A policy that partitions as soon as a type exceeds one shard.
    pub fn with_capacity(capacity: usize) -> Self {
        ShardPolicy {
            capacity,
            threshold: capacity,
        }
    }
}

/// Compute shards for a table.
///
/// Returns the shard list in table order and, for every arena index, the
/// shard index within its type. `policy.capacity` must be non-zero.
pub fn plan_shards(table: &ResourceTable, policy: ShardPolicy) -> (Vec<Shard>, Vec<usize>) {
    let mut shards = Vec::new();
    let mut shard_of = vec![0; table.len()];

    for resource_type in table.types() {
        let range = table.type_range(resource_type);
        let count = range.len();
        let chunk = if count > policy.threshold {
            policy.capacity
        } else {
            count.max(1)
        };

        let mut start = range.start;
        let mut index = 0;
        while start < range.end {
            let end = (start + chunk).min(range.end);
            for slot in &mut shard_of[start..end] {
                *slot = index;
            }
            shards.push(Shard {
                resource_type,
                index,
                name: format!("{}{}", resource_type.accessor_name(), index),
                range: start..end,
            });
            start = end;
            index += 1;
        }
    }

    (shards, shard_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildPolicy, TableBuilder};
    use crate::core::resource::RawResource;

    fn table(strings: usize, drawables: usize) -> ResourceTable {
        let mut b = TableBuilder::new(BuildPolicy::default());
        for i in 0..strings {
            b.insert(RawResource::new(
                "string",
                format!("str_{}", i),
                "",
                "values/strings.xml",
            ))
            .unwrap();
        }
        for i in 0..drawables {
            b.insert(RawResource::new(
                "drawable",
                format!("icon_{}", i),
                "",
                format!("drawable/icon_{}.xml", i),
            ))
            .unwrap();
        }
        b.finalize().unwrap().table
    }

    #[test]
    fn test_small_types_single_shard() {
        let t = table(3, 2);
        let (shards, shard_of) = plan_shards(&t, ShardPolicy::with_capacity(10));
        let names: Vec<&str> = shards.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Drawable0", "String0"]);
        assert_eq!(shard_of, vec![0; 5]);
    }

    #[test]
    fn test_partition_by_capacity() {
        let t = table(25, 0);
        let (shards, shard_of) = plan_shards(&t, ShardPolicy::with_capacity(10));
        assert_eq!(shards.len(), 3);
        assert_eq!(shards[0].range, 0..10);
        assert_eq!(shards[2].range, 20..25);
        assert_eq!(shards[2].name, "String2");
        for (i, shard) in shard_of.iter().enumerate() {
            assert_eq!(*shard, i / 10);
        }
    }

    #[test]
    fn test_threshold_delays_partitioning() {
        let t = table(25, 0);
        let policy = ShardPolicy {
            capacity: 10,
            threshold: 30,
        };
        let (shards, _) = plan_shards(&t, policy);
        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0].len(), 25);
    }

    #[test]
    fn test_huge_string_table() {
        let t = table(10_450, 0);
        let (shards, shard_of) = plan_shards(&t, ShardPolicy::with_capacity(10_000));
        assert_eq!(shards.len(), 2);
        assert_eq!(shards[0].len(), 10_000);
        assert_eq!(shards[1].len(), 450);

        // Shard 0 holds the lexicographically first 10,000 keys.
        let mut keys: Vec<String> = (0..10_450).map(|i| format!("str_{}", i)).collect();
        keys.sort();
        let first: Vec<&str> = t.entries()[shards[0].range.clone()]
            .iter()
            .map(|e| e.key.as_str())
            .collect();
        assert_eq!(first, keys[..10_000].iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(shard_of[9_999], 0);
        assert_eq!(shard_of[10_000], 1);
    }

    #[test]
    fn test_empty_table() {
        let t = table(0, 0);
        let (shards, shard_of) = plan_shards(&t, ShardPolicy::with_capacity(10));
        assert!(shards.is_empty());
        assert!(shard_of.is_empty());
    }
}
