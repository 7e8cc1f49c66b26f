//! Implementation of `resforge generate` and `resforge check`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::{fold_parallel, BuildOutcome, BuildPolicy, PipelineOptions, TableBuilder};
use crate::core::errors::{GenerateError, GenerateWarning};
use crate::core::resource::RawResource;
use crate::core::resource_type::ResourceType;
use crate::core::table::ResourceTable;
use crate::sanitizer::{AccessorPlan, Rename, Sanitizer, SanitizerOptions, TargetLanguage};
use crate::sources::{ResourceScanner, ResourceSource};
use crate::util::cancel::CancellationToken;
use crate::util::config::{Config, DEFAULT_READ_TIMEOUT_MS};
use crate::util::fs::write_string;

/// Manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Table building rules
    pub policy: BuildPolicy,

    /// Identifier and shard settings
    pub sanitizer: SanitizerOptions,

    /// Scan worker pool and queue settings
    pub pipeline: PipelineOptions,

    /// Per-file read timeout
    pub read_timeout: Duration,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            policy: BuildPolicy::default(),
            sanitizer: SanitizerOptions::default(),
            pipeline: PipelineOptions::default(),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}

impl GenerateOptions {
    /// Resolve options from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, GenerateError> {
        Ok(GenerateOptions {
            policy: BuildPolicy::from_config(&config.generator)?,
            sanitizer: SanitizerOptions::from_config(&config.sanitizer)?,
            pipeline: PipelineOptions::from_config(&config.scan),
            read_timeout: config.scan.read_timeout(),
        })
    }
}

/// Result of a successful generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Finalized, sorted table
    pub table: ResourceTable,

    /// Identifier and shard for every table entry
    pub plan: AccessorPlan,

    /// Recoverable findings
    pub warnings: Vec<GenerateWarning>,

    /// SHA-256 of the table contents
    pub fingerprint: String,
}

impl Generation {
    /// Number of entries of one type.
    pub fn count(&self, resource_type: ResourceType) -> usize {
        self.table.type_range(resource_type).len()
    }

    /// Build the serializable hand-off for accessor emission.
    pub fn manifest(&self) -> Manifest {
        let entries = self
            .table
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let shard = self
                    .plan
                    .shards_of_type(entry.resource_type)
                    .nth(self.plan.shard_of[idx])
                    .map(|s| s.name.clone())
                    .unwrap_or_default();

                ManifestEntry {
                    id: entry.id(),
                    resource_type: entry.resource_type,
                    key: entry.key.to_string(),
                    identifier: self.plan.identifiers[idx].clone(),
                    shard,
                    experimental: entry.is_experimental,
                    variants: entry
                        .variants
                        .iter()
                        .map(|v| ManifestVariant {
                            qualifiers: v.qualifiers.canonical(),
                            path: v.path.clone(),
                        })
                        .collect(),
                }
            })
            .collect();

        let shards = self
            .plan
            .shards
            .iter()
            .map(|s| ManifestShard {
                name: s.name.clone(),
                resource_type: s.resource_type,
                size: s.len(),
            })
            .collect();

        Manifest {
            version: MANIFEST_VERSION,
            fingerprint: self.fingerprint.clone(),
            language: self.plan.language,
            entries,
            shards,
            renames: self.plan.renames.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

/// Registry description consumed by the accessor emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub version: u32,
    pub fingerprint: String,
    pub language: TargetLanguage,
    pub entries: Vec<ManifestEntry>,
    pub shards: Vec<ManifestShard>,
    pub renames: Vec<Rename>,
    pub warnings: Vec<GenerateWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub key: String,
    pub identifier: String,
    pub shard: String,
    pub experimental: bool,
    pub variants: Vec<ManifestVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestVariant {
    /// Canonical qualifier string, empty for the default variant
    pub qualifiers: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestShard {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub size: usize,
}

/// Scan the resource tree at `root` and build the registry.
pub fn generate(
    root: &Path,
    options: &GenerateOptions,
    cancel: &CancellationToken,
) -> Result<Generation, GenerateError> {
    let scanner = ResourceScanner::new(root).with_read_timeout(options.read_timeout);
    generate_from(&scanner, options, cancel)
}

/// Build the registry from any resource source.
pub fn generate_from<S: ResourceSource>(
    source: &S,
    options: &GenerateOptions,
    cancel: &CancellationToken,
) -> Result<Generation, GenerateError> {
    cancel.check()?;

    let jobs = source.discover()?;
    tracing::info!("Scanning {} resource files ({})", jobs.len(), source.name());

    let mut builder = TableBuilder::new(options.policy.clone());
    fold_parallel(
        &jobs,
        |job| source.scan(job),
        &mut builder,
        &options.pipeline,
        cancel,
    )?;

    finish(builder, options, cancel)
}

/// Build the registry from raw tuples, without touching the filesystem.
pub fn generate_from_resources<I>(
    resources: I,
    options: &GenerateOptions,
    cancel: &CancellationToken,
) -> Result<Generation, GenerateError>
where
    I: IntoIterator<Item = RawResource>,
{
    let mut builder = TableBuilder::new(options.policy.clone());
    for raw in resources {
        cancel.check()?;
        builder.insert(raw)?;
    }

    finish(builder, options, cancel)
}

fn finish(
    builder: TableBuilder,
    options: &GenerateOptions,
    cancel: &CancellationToken,
) -> Result<Generation, GenerateError> {
    cancel.check()?;

    tracing::info!(
        "Merging {} variants into {} entries",
        builder.variant_count(),
        builder.entry_count()
    );
    let BuildOutcome { table, warnings } = builder.finalize()?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let plan = Sanitizer::new(options.sanitizer).sanitize(&table)?;
    cancel.check()?;

    let fingerprint = table.fingerprint();
    tracing::info!(
        "Generated {} entries in {} shards ({} renamed, {} warnings)",
        table.len(),
        plan.shards.len(),
        plan.renames.len(),
        warnings.len()
    );

    Ok(Generation {
        table,
        plan,
        warnings,
        fingerprint,
    })
}

/// Write a manifest as pretty-printed JSON.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest).context("failed to serialize manifest")?;
    write_string(path, &json)?;
    tracing::info!("Wrote manifest to {}", path.display());
    Ok(())
}
