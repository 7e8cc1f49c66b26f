//! Resource table builder.
//!
//! Folds raw resource occurrences into one entry per (type, key), keeping
//! every qualified variant. The builder moves forward only:
//!
//! ```text
//! Empty -> Accumulating -> Finalized
//! ```
//!
//! Finalization consumes the builder and yields an immutable
//! [`ResourceTable`], so a finalized table can never be reopened.
//!
//! The builder itself is single-threaded; [`pipeline`] feeds it from a
//! parallel scan through a bounded queue.

pub mod pipeline;

use std::collections::btree_map::Entry as BTreeEntry;
use std::collections::{BTreeMap, HashMap};

use crate::core::errors::{GenerateError, GenerateWarning};
use crate::core::qualifier::{parse_qualifiers, QualifierSet, Strictness};
use crate::core::resource::{RawResource, ResourceEntry, ResourceKey, ResourceVariant};
use crate::core::resource_type::ResourceType;
use crate::core::table::ResourceTable;
use crate::util::config::GeneratorConfig;

pub use pipeline::{fold_parallel, PipelineOptions};

/// Rules applied while building and finalizing a table.
#[derive(Debug, Clone, Default)]
pub struct BuildPolicy {
    /// How unknown qualifier segments are treated
    pub strictness: Strictness,
    /// Whether a missing default variant is fatal
    pub require_defaults: bool,
    /// Types whose entries are all experimental
    pub experimental_types: Vec<ResourceType>,
    /// Patterns over `type:key` ids marking entries experimental
    pub experimental_keys: Vec<glob::Pattern>,
}

impl BuildPolicy {
    /// Build a policy from the `[generator]` configuration section.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let experimental_keys = config
            .experimental_keys
            .iter()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| {
                    GenerateError::InvalidConfig(format!(
                        "invalid experimental key pattern `{}`: {}",
                        p, e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BuildPolicy {
            strictness: config.strictness(),
            require_defaults: config.require_defaults.unwrap_or(false),
            experimental_types: config.experimental_types.clone(),
            experimental_keys,
        })
    }

    /// Whether accessors for `resource_type:key` are experimental.
    pub fn is_experimental(&self, resource_type: ResourceType, key: &str) -> bool {
        if self.experimental_types.contains(&resource_type) {
            return true;
        }
        if self.experimental_keys.is_empty() {
            return false;
        }
        let id = format!("{}:{}", resource_type, key);
        self.experimental_keys.iter().any(|p| p.matches(&id))
    }
}

/// Lifecycle state of a [`TableBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// Nothing inserted yet.
    Empty,
    /// At least one variant inserted.
    Accumulating,
}

/// An entry that is still collecting variants.
#[derive(Debug)]
struct PendingEntry {
    resource_type: ResourceType,
    key: ResourceKey,
    variants: BTreeMap<QualifierSet, String>,
}

/// Result of finalizing a builder.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub table: ResourceTable,
    pub warnings: Vec<GenerateWarning>,
}

/// Accumulates resource variants into entries.
#[derive(Debug)]
pub struct TableBuilder {
    policy: BuildPolicy,
    entries: Vec<PendingEntry>,
    index: HashMap<(ResourceType, ResourceKey), usize>,
    variant_count: usize,
}

impl TableBuilder {
    pub fn new(policy: BuildPolicy) -> Self {
        TableBuilder {
            policy,
            entries: Vec::new(),
            index: HashMap::new(),
            variant_count: 0,
        }
    }

    pub fn state(&self) -> BuilderState {
        if self.variant_count == 0 {
            BuilderState::Empty
        } else {
            BuilderState::Accumulating
        }
    }

    /// Number of distinct (type, key) entries so far.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of variants inserted so far.
    pub fn variant_count(&self) -> usize {
        self.variant_count
    }

    /// Insert one resource occurrence.
    ///
    /// Fails if the type or qualifiers do not parse, or if the entry already
    /// has a variant with an identical qualifier set.
    pub fn insert(&mut self, raw: RawResource) -> Result<(), GenerateError> {
        let resource_type = raw.resource_type.parse::<ResourceType>().map_err(|e| {
            GenerateError::UnknownResourceType {
                name: e.0,
                path: raw.path.clone(),
            }
        })?;

        if raw.key.is_empty() {
            return Err(GenerateError::InvalidKey {
                key: raw.key,
                path: raw.path,
            });
        }

        let qualifiers = parse_qualifiers(&raw.qualifiers, self.policy.strictness).map_err(
            |reason| GenerateError::InvalidQualifier {
                path: raw.path.clone(),
                qualifiers: raw.qualifiers.clone(),
                reason,
            },
        )?;

        let key = ResourceKey::new(raw.key);
        let entries = &mut self.entries;
        let idx = *self
            .index
            .entry((resource_type, key.clone()))
            .or_insert_with(|| {
                entries.push(PendingEntry {
                    resource_type,
                    key,
                    variants: BTreeMap::new(),
                });
                entries.len() - 1
            });

        let entry = &mut self.entries[idx];
        match entry.variants.entry(qualifiers) {
            BTreeEntry::Occupied(existing) => {
                // Report paths in a fixed order so the error does not depend on scan order.
                let (first_path, second_path) = if existing.get().as_str() <= raw.path.as_str() {
                    (existing.get().clone(), raw.path)
                } else {
                    (raw.path, existing.get().clone())
                };
                Err(GenerateError::DuplicateVariant {
                    resource_type,
                    key: entry.key.to_string(),
                    qualifiers: existing.key().to_string(),
                    first_path,
                    second_path,
                })
            }
            BTreeEntry::Vacant(slot) => {
                slot.insert(raw.path);
                self.variant_count += 1;
                Ok(())
            }
        }
    }

    /// Insert every resource from an iterator, stopping at the first error.
    pub fn extend<I>(&mut self, resources: I) -> Result<(), GenerateError>
    where
        I: IntoIterator<Item = RawResource>,
    {
        for raw in resources {
            self.insert(raw)?;
        }
        Ok(())
    }

    /// Validate, sort and freeze the table.
    ///
    /// Entries without a default variant produce a warning, or an error when
    /// the policy requires defaults.
    pub fn finalize(self) -> Result<BuildOutcome, GenerateError> {
        let policy = self.policy;

        let mut entries: Vec<ResourceEntry> = self
            .entries
            .into_iter()
            .map(|pending| {
                let is_experimental =
                    policy.is_experimental(pending.resource_type, pending.key.as_str());
                ResourceEntry {
                    resource_type: pending.resource_type,
                    key: pending.key,
                    variants: pending
                        .variants
                        .into_iter()
                        .map(|(qualifiers, path)| ResourceVariant { qualifiers, path })
                        .collect(),
                    is_experimental,
                }
            })
            .collect();

        // Byte-wise key order: str_0, str_1, str_10, str_100, str_2.
        entries.sort_unstable_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let mut warnings = Vec::new();
        for entry in &entries {
            if entry.has_default() {
                continue;
            }
            let qualifiers: Vec<String> = entry
                .variants
                .iter()
                .map(|v| v.qualifiers.canonical())
                .collect();
            if policy.require_defaults {
                return Err(GenerateError::MissingDefaultVariant {
                    resource_type: entry.resource_type,
                    key: entry.key.to_string(),
                    qualifiers,
                });
            }
            warnings.push(GenerateWarning::MissingDefaultVariant {
                resource_type: entry.resource_type,
                key: entry.key.to_string(),
                qualifiers,
            });
        }

        tracing::debug!(
            "Finalized resource table: {} entries, {} warnings",
            entries.len(),
            warnings.len()
        );

        Ok(BuildOutcome {
            table: ResourceTable::from_sorted(entries),
            warnings,
        })
    }
}
