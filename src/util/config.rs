//! Configuration file support for resforge.
//!
//! resforge reads two configuration file locations:
//! - Global: `~/.resforge/config.toml` - User-wide defaults
//! - Project: `.resforge/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::qualifier::Strictness;
use crate::core::resource_type::ResourceType;
use crate::sanitizer::TargetLanguage;

/// Default number of entries per shard.
pub const DEFAULT_SHARD_CAPACITY: usize = 500;

/// Default bound of the scan queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Default per-file read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// resforge configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Table building settings
    pub generator: GeneratorConfig,

    /// Identifier and shard settings
    pub sanitizer: SanitizerConfig,

    /// Scanning settings
    pub scan: ScanConfig,
}

/// Table building configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Reject unknown qualifier segments (default: true)
    pub strict_qualifiers: Option<bool>,

    /// Fail when an entry has no unqualified variant
    pub require_defaults: Option<bool>,

    /// Resource types whose accessors are marked experimental
    pub experimental_types: Vec<ResourceType>,

    /// Glob patterns over `type:key` ids marking entries experimental
    pub experimental_keys: Vec<String>,
}

impl GeneratorConfig {
    pub fn strictness(&self) -> Strictness {
        match self.strict_qualifiers {
            Some(false) => Strictness::Lenient,
            _ => Strictness::Strict,
        }
    }
}

/// Identifier sanitizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Language the identifiers must be valid in (kotlin, rust)
    pub target_language: Option<TargetLanguage>,

    /// Entries per generated shard
    pub shard_capacity: Option<usize>,

    /// Entry count per type above which a type is split into shards
    /// (defaults to the shard capacity)
    pub partition_threshold: Option<usize>,
}

/// Scanner configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of scan workers (None = number of CPUs)
    pub jobs: Option<usize>,

    /// Bound of the queue between scan workers and the table builder
    pub queue_capacity: Option<usize>,

    /// Per-file read timeout in milliseconds
    pub read_timeout_ms: Option<u64>,
}

impl ScanConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.unwrap_or(DEFAULT_READ_TIMEOUT_MS))
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration, or defaults if the file doesn't exist.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Generator settings
        if other.generator.strict_qualifiers.is_some() {
            self.generator.strict_qualifiers = other.generator.strict_qualifiers;
        }
        if other.generator.require_defaults.is_some() {
            self.generator.require_defaults = other.generator.require_defaults;
        }
        if !other.generator.experimental_types.is_empty() {
            self.generator.experimental_types = other.generator.experimental_types;
        }
        if !other.generator.experimental_keys.is_empty() {
            self.generator.experimental_keys = other.generator.experimental_keys;
        }

        // Sanitizer settings
        if other.sanitizer.target_language.is_some() {
            self.sanitizer.target_language = other.sanitizer.target_language;
        }
        if other.sanitizer.shard_capacity.is_some() {
            self.sanitizer.shard_capacity = other.sanitizer.shard_capacity;
        }
        if other.sanitizer.partition_threshold.is_some() {
            self.sanitizer.partition_threshold = other.sanitizer.partition_threshold;
        }

        // Scan settings
        if other.scan.jobs.is_some() {
            self.scan.jobs = other.scan.jobs;
        }
        if other.scan.queue_capacity.is_some() {
            self.scan.queue_capacity = other.scan.queue_capacity;
        }
        if other.scan.read_timeout_ms.is_some() {
            self.scan.read_timeout_ms = other.scan.read_timeout_ms;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.resforge/config.toml)
/// 2. Global config (~/.resforge/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_if_exists(global_path)?);
    }

    config.merge(Config::load_if_exists(project_path)?);

    Ok(config)
}

/// Get the global resforge config directory (~/.resforge).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".resforge"))
}

/// Get the global config path (~/.resforge/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.resforge/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".resforge").join("config.toml")
}
