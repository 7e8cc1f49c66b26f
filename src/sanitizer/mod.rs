//! Identifier sanitizer.
//!
//! Maps every resource key of a finalized table to an identifier that is
//! valid in the target language, and assigns every entry to a shard.
//!
//! Rewrites are deterministic and applied in this order:
//! 1. characters other than ASCII letters, digits and `_` become `_`
//! 2. a leading digit gets a `_` prefix
//! 3. a reserved word gets a `_` suffix
//!
//! Identifiers share one namespace per resource type. Two different keys of
//! the same type that end up with the same identifier are an error; the
//! sanitizer never merges resources.

pub mod keywords;
pub mod shard;

use std::collections::HashMap;

use serde::Serialize;

use crate::core::errors::GenerateError;
use crate::core::resource_type::ResourceType;
use crate::core::table::ResourceTable;
use crate::util::config::{SanitizerConfig, DEFAULT_SHARD_CAPACITY};

pub use keywords::TargetLanguage;
pub use shard::{plan_shards, Shard, ShardPolicy};

/// Why a key was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenameReason {
    IllegalCharacters,
    LeadingDigit,
    ReservedWord,
}

/// A key whose identifier differs from the key itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub resource_type: ResourceType,
    pub key: String,
    pub identifier: String,
    pub reasons: Vec<RenameReason>,
}

/// Sanitize one key for `language`.
///
/// Returns the identifier and the rewrites that were applied (empty when
/// the key is used unchanged).
pub fn sanitize_key(key: &str, language: TargetLanguage) -> (String, Vec<RenameReason>) {
    let mut reasons = Vec::new();

    let mut ident: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if ident != key {
        reasons.push(RenameReason::IllegalCharacters);
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
        reasons.push(RenameReason::LeadingDigit);
    }

    if language.is_reserved(&ident) {
        ident.push('_');
        reasons.push(RenameReason::ReservedWord);
    }

    (ident, reasons)
}

/// Sanitizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizerOptions {
    pub language: TargetLanguage,
    pub shards: ShardPolicy,
}

impl Default for SanitizerOptions {
    fn default() -> Self {
        SanitizerOptions {
            language: TargetLanguage::default(),
            shards: ShardPolicy::with_capacity(DEFAULT_SHARD_CAPACITY),
        }
    }
}

impl SanitizerOptions {
    /// Build options from the `[sanitizer]` configuration section.
    pub fn from_config(config: &SanitizerConfig) -> Result<Self, GenerateError> {
        let capacity = config.shard_capacity.unwrap_or(DEFAULT_SHARD_CAPACITY);
        if capacity == 0 {
            return Err(GenerateError::InvalidConfig(
                "`sanitizer.shard_capacity` must be greater than zero".to_string(),
            ));
        }
        Ok(SanitizerOptions {
            language: config.target_language.unwrap_or_default(),
            shards: ShardPolicy {
                capacity,
                threshold: config.partition_threshold.unwrap_or(capacity),
            },
        })
    }
}

/// Identifiers and shard assignment for a finalized table.
///
/// `identifiers[i]` and `shard_of[i]` belong to `table.entries()[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessorPlan {
    pub language: TargetLanguage,
    pub identifiers: Vec<String>,
    pub shard_of: Vec<usize>,
    pub shards: Vec<Shard>,
    pub renames: Vec<Rename>,
}

impl AccessorPlan {
    /// Shards holding entries of one type.
    pub fn shards_of_type(&self, resource_type: ResourceType) -> impl Iterator<Item = &Shard> {
        self.shards
            .iter()
            .filter(move |s| s.resource_type == resource_type)
    }
}

/// Maps keys to identifiers and partitions entries into shards.
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    options: SanitizerOptions,
}

impl Sanitizer {
    pub fn new(options: SanitizerOptions) -> Self {
        Sanitizer { options }
    }

    pub fn options(&self) -> &SanitizerOptions {
        &self.options
    }

    /// Produce the accessor plan for `table`.
    pub fn sanitize(&self, table: &ResourceTable) -> Result<AccessorPlan, GenerateError> {
        if self.options.shards.capacity == 0 {
            return Err(GenerateError::InvalidConfig(
                "shard capacity must be greater than zero".to_string(),
            ));
        }

        let language = self.options.language;
        let mut identifiers = Vec::with_capacity(table.len());
        let mut renames = Vec::new();
        let mut seen: HashMap<(ResourceType, String), usize> = HashMap::with_capacity(table.len());

        for (idx, entry) in table.iter().enumerate() {
            let key = entry.key.as_str();
            let (ident, reasons) = sanitize_key(key, language);

            if let Some(&other) = seen.get(&(entry.resource_type, ident.clone())) {
                let first_key = table.entries()[other].key.to_string();
                return Err(GenerateError::IdentifierCollision {
                    resource_type: entry.resource_type,
                    identifier: ident,
                    first_key,
                    second_key: key.to_string(),
                });
            }
            seen.insert((entry.resource_type, ident.clone()), idx);

            if !reasons.is_empty() {
                tracing::debug!("Renamed {}:{} to `{}`", entry.resource_type, key, ident);
                renames.push(Rename {
                    resource_type: entry.resource_type,
                    key: key.to_string(),
                    identifier: ident.clone(),
                    reasons,
                });
            }
            identifiers.push(ident);
        }

        let (shards, shard_of) = plan_shards(table, self.options.shards);

        tracing::debug!(
            "Planned {} identifiers ({} renamed) in {} shards",
            identifiers.len(),
            renames.len(),
            shards.len()
        );

        Ok(AccessorPlan {
            language,
            identifiers,
            shard_of,
            shards,
            renames,
        })
    }
}
