//! Filesystem resource scanner.
//!
//! Layout of a resource root:
//!
//! ```text
//! <root>/
//!   drawable/logo.xml
//!   drawable-dark/logo.xml
//!   font/inter.ttf
//!   values/strings.xml
//!   values-fr/strings.xml
//!   files/data.json
//! ```
//!
//! Every direct subdirectory is named `<type>[-<qualifiers>]`. Discovery
//! validates directory names and lists one job per file; scanning a job
//! yields the raw tuples of that file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use walkdir::WalkDir;

use crate::core::errors::GenerateError;
use crate::core::qualifier::QualifierError;
use crate::core::resource::RawResource;
use crate::core::resource_type::DirectoryKind;
use crate::sources::source::ResourceSource;
use crate::sources::values::parse_values;
use crate::util::config::DEFAULT_READ_TIMEOUT_MS;
use crate::util::fs::{invariant_relative_path, is_hidden, read_to_string_timeout};

/// Directory types that hold string-like resources, which belong in `values`.
const STRING_DIRECTORY_TYPES: &[&str] = &["string", "plurals"];

/// One file to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanJob {
    pub kind: DirectoryKind,
    /// Qualifier suffix of the containing directory
    pub qualifiers: String,
    /// Absolute path of the file
    pub path: PathBuf,
    /// Path relative to the resource root, `/`-separated
    pub relative: String,
}

/// Scans a resource root on disk.
#[derive(Debug, Clone)]
pub struct ResourceScanner {
    root: PathBuf,
    read_timeout: Duration,
}

impl ResourceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ResourceScanner {
            root: root.into(),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }

    /// Set the per-file read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Split a directory name into its kind and qualifier suffix.
    pub fn classify_directory(name: &str) -> Result<(DirectoryKind, String), GenerateError> {
        let (prefix, qualifiers) = match name.split_once('-') {
            Some((prefix, qualifiers)) => (prefix, Some(qualifiers)),
            None => (name, None),
        };

        let kind = match DirectoryKind::from_prefix(prefix) {
            Some(kind) => kind,
            None if STRING_DIRECTORY_TYPES.contains(&prefix) => {
                return Err(GenerateError::ForbiddenDirectory {
                    name: name.to_string(),
                })
            }
            None => {
                return Err(GenerateError::UnknownResourceType {
                    name: prefix.to_string(),
                    path: name.to_string(),
                })
            }
        };

        match qualifiers {
            None => Ok((kind, String::new())),
            Some(_) if !kind.supports_qualifiers() => Err(GenerateError::FilesWithQualifiers {
                name: name.to_string(),
            }),
            // `values-` would otherwise read as the default directory.
            Some("") => Err(GenerateError::InvalidQualifier {
                path: name.to_string(),
                qualifiers: String::new(),
                reason: QualifierError::EmptySegment,
            }),
            Some(qualifiers) => Ok((kind, qualifiers.to_string())),
        }
    }

    fn discover_directory(
        &self,
        dir: &Path,
        kind: DirectoryKind,
        qualifiers: &str,
        jobs: &mut Vec<ScanJob>,
    ) -> Result<(), GenerateError> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(dir, e))?;
            let path = entry.path();

            if is_hidden(path) {
                continue;
            }

            let relative = invariant_relative_path(&self.root, path);

            if entry.file_type().is_dir() {
                tracing::warn!("Skipping nested directory `{}`", relative);
                continue;
            }

            if kind == DirectoryKind::Values
                && path.extension().and_then(|e| e.to_str()) != Some("xml")
            {
                tracing::warn!("Skipping non-XML file in values directory: `{}`", relative);
                continue;
            }

            jobs.push(ScanJob {
                kind,
                qualifiers: qualifiers.to_string(),
                path: path.to_path_buf(),
                relative,
            });
        }

        Ok(())
    }

    fn scan_values(&self, job: &ScanJob) -> Result<Vec<RawResource>, GenerateError> {
        let content = read_to_string_timeout(&job.path, self.read_timeout)?;
        let declarations =
            parse_values(&content).map_err(|reason| GenerateError::InvalidValuesFile {
                path: job.relative.clone(),
                reason: reason.to_string(),
            })?;

        Ok(declarations
            .into_iter()
            .map(|decl| {
                RawResource::new(
                    decl.resource_type.as_str(),
                    decl.key,
                    job.qualifiers.clone(),
                    job.relative.clone(),
                )
            })
            .collect())
    }
}

impl ResourceSource for ResourceScanner {
    type Job = ScanJob;

    fn name(&self) -> &str {
        "filesystem"
    }

    fn discover(&self) -> Result<Vec<ScanJob>, GenerateError> {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        let mut jobs = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| walk_error(&self.root, e))?;
            let path = entry.path();

            if is_hidden(path) {
                continue;
            }

            if !entry.file_type().is_dir() {
                tracing::warn!(
                    "Skipping file outside a resource directory: `{}`",
                    invariant_relative_path(&self.root, path)
                );
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let (kind, qualifiers) = Self::classify_directory(&name)?;

            if kind == DirectoryKind::Files {
                tracing::debug!("Skipping raw files directory `{}`", name);
                continue;
            }

            self.discover_directory(path, kind, &qualifiers, &mut jobs)?;
        }

        tracing::debug!(
            "Discovered {} resource files under {}",
            jobs.len(),
            self.root.display()
        );
        Ok(jobs)
    }

    fn scan(&self, job: &ScanJob) -> Result<Vec<RawResource>, GenerateError> {
        match job.kind.file_resource_type() {
            Some(resource_type) => {
                let key = job
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                Ok(vec![RawResource::new(
                    resource_type.as_str(),
                    key,
                    job.qualifiers.clone(),
                    job.relative.clone(),
                )])
            }
            None if job.kind == DirectoryKind::Values => self.scan_values(job),
            None => Ok(Vec::new()),
        }
    }
}

fn walk_error(dir: &Path, err: walkdir::Error) -> GenerateError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    GenerateError::Io { path, source }
}
