//! Generation error types and diagnostics.
//!
//! Every variant of [`GenerateError`] aborts the generation run. Recoverable
//! findings are reported as [`GenerateWarning`]s next to a successful result.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::qualifier::QualifierError;
use crate::core::resource_type::ResourceType;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error during a generation run.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GenerateError {
    #[error("`{path}` {reason}")]
    #[diagnostic(code(resforge::qualifier::invalid))]
    InvalidQualifier {
        path: String,
        qualifiers: String,
        reason: QualifierError,
    },

    #[error("duplicate variant for `{resource_type}:{key}` ({qualifiers})")]
    #[diagnostic(
        code(resforge::table::duplicate_variant),
        help("Remove one of the definitions or move it to a different qualifier directory")
    )]
    DuplicateVariant {
        resource_type: ResourceType,
        key: String,
        qualifiers: String,
        first_path: String,
        second_path: String,
    },

    #[error("identifier collision for `{identifier}` between `{resource_type}:{first_key}` and `{resource_type}:{second_key}`")]
    #[diagnostic(
        code(resforge::sanitizer::identifier_collision),
        help("Rename one of the resources so that the generated identifiers differ")
    )]
    IdentifierCollision {
        resource_type: ResourceType,
        identifier: String,
        first_key: String,
        second_key: String,
    },

    #[error("`{resource_type}:{key}` has no default variant")]
    #[diagnostic(
        code(resforge::table::missing_default),
        help("Add an unqualified variant or disable `require_defaults`")
    )]
    MissingDefaultVariant {
        resource_type: ResourceType,
        key: String,
        qualifiers: Vec<String>,
    },

    #[error("Unknown resource type: '{name}'.")]
    #[diagnostic(code(resforge::scan::unknown_type))]
    UnknownResourceType { name: String, path: String },

    #[error("Forbidden directory name '{name}'! String resources should be declared in 'values/strings.xml'.")]
    #[diagnostic(code(resforge::scan::forbidden_directory))]
    ForbiddenDirectory { name: String },

    #[error("The 'files' directory doesn't support qualifiers: '{name}'.")]
    #[diagnostic(code(resforge::scan::files_with_qualifiers))]
    FilesWithQualifiers { name: String },

    #[error("{path} is not valid. {reason}")]
    #[diagnostic(code(resforge::scan::invalid_values_file))]
    InvalidValuesFile { path: String, reason: String },

    #[error("invalid resource key `{key}` in `{path}`")]
    #[diagnostic(code(resforge::table::invalid_key))]
    InvalidKey { key: String, path: String },

    #[error("timed out after {timeout_ms}ms reading `{}`", .path.display())]
    #[diagnostic(code(resforge::scan::read_timeout))]
    ReadTimeout { path: PathBuf, timeout_ms: u64 },

    #[error("failed to read `{}`", .path.display())]
    #[diagnostic(code(resforge::scan::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    #[diagnostic(code(resforge::config::invalid))]
    InvalidConfig(String),

    #[error("failed to start scan workers: {0}")]
    #[diagnostic(code(resforge::scan::worker_pool))]
    WorkerPool(String),

    #[error("generation cancelled")]
    #[diagnostic(code(resforge::cancelled))]
    Cancelled,
}

impl GenerateError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerateError::InvalidQualifier {
                path,
                qualifiers,
                reason,
            } => Diagnostic::error(format!("`{}` {}", path, reason))
                .with_context(format!("qualifier suffix: `{}`", qualifiers))
                .with_suggestion(suggestions::QUALIFIER_GRAMMAR),

            GenerateError::DuplicateVariant {
                resource_type,
                key,
                qualifiers,
                first_path,
                second_path,
            } => Diagnostic::error(format!(
                "duplicate variant for `{}:{}` ({})",
                resource_type, key, qualifiers
            ))
            .with_context(format!("first defined in `{}`", first_path))
            .with_context(format!("defined again in `{}`", second_path))
            .with_suggestion("Remove one of the definitions")
            .with_suggestion("Move one definition to a directory with different qualifiers"),

            GenerateError::IdentifierCollision {
                resource_type,
                identifier,
                first_key,
                second_key,
            } => Diagnostic::error(format!("identifier collision for `{}`", identifier))
                .with_context(format!(
                    "`{}:{}` and `{}:{}` both map to `{}`",
                    resource_type, first_key, resource_type, second_key, identifier
                ))
                .with_suggestion(format!("Rename `{}` or `{}`", first_key, second_key)),

            GenerateError::MissingDefaultVariant {
                resource_type,
                key,
                qualifiers,
            } => Diagnostic::error(format!(
                "`{}:{}` has no default variant",
                resource_type, key
            ))
            .with_context(format!("qualified variants: {}", qualifiers.join(", ")))
            .with_suggestion(suggestions::ADD_DEFAULT),

            GenerateError::UnknownResourceType { name, path } => {
                Diagnostic::error(format!("Unknown resource type: '{}'.", name))
                    .with_location(path)
                    .with_suggestion(suggestions::DIRECTORY_TYPES)
            }

            GenerateError::ForbiddenDirectory { name } => Diagnostic::error(format!(
                "Forbidden directory name '{}'!",
                name
            ))
            .with_suggestion("String resources should be declared in 'values/strings.xml'"),

            GenerateError::FilesWithQualifiers { name } => Diagnostic::error(format!(
                "The 'files' directory doesn't support qualifiers: '{}'.",
                name
            ))
            .with_suggestion("Move the files into the unqualified 'files' directory"),

            GenerateError::InvalidValuesFile { path, reason } => {
                Diagnostic::error(format!("{} is not valid. {}", path, reason))
                    .with_location(path)
                    .with_suggestion(suggestions::VALUES_FORMAT)
            }

            GenerateError::InvalidKey { key, path } => {
                Diagnostic::error(format!("invalid resource key `{}`", key))
                    .with_location(path)
                    .with_context("resource keys must not be empty")
            }

            GenerateError::ReadTimeout { path, timeout_ms } => Diagnostic::error(format!(
                "timed out after {}ms reading file",
                timeout_ms
            ))
            .with_location(path)
            .with_suggestion("Increase `scan.read_timeout_ms` in the configuration"),

            GenerateError::Io { path, source } => {
                Diagnostic::error(format!("failed to read file: {}", source)).with_location(path)
            }

            GenerateError::InvalidConfig(message) => {
                Diagnostic::error(format!("invalid configuration: {}", message))
                    .with_suggestion(suggestions::CHECK_CONFIG)
            }

            GenerateError::WorkerPool(message) => {
                Diagnostic::error(format!("failed to start scan workers: {}", message))
            }

            GenerateError::Cancelled => Diagnostic::error("generation cancelled"),
        }
    }
}

/// A recoverable finding reported alongside a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GenerateWarning {
    /// An entry only has qualified variants.
    MissingDefaultVariant {
        resource_type: ResourceType,
        key: String,
        qualifiers: Vec<String>,
    },
}

impl GenerateWarning {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerateWarning::MissingDefaultVariant {
                resource_type,
                key,
                qualifiers,
            } => Diagnostic::warning(format!(
                "`{}:{}` has no default variant",
                resource_type, key
            ))
            .with_context(format!("qualified variants: {}", qualifiers.join(", ")))
            .with_suggestion(suggestions::ADD_DEFAULT),
        }
    }
}

impl fmt::Display for GenerateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateWarning::MissingDefaultVariant {
                resource_type,
                key,
                qualifiers,
            } => write!(
                f,
                "`{}:{}` has no default variant (qualified: {})",
                resource_type,
                key,
                qualifiers.join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_variant_diagnostic() {
        let err = GenerateError::DuplicateVariant {
            resource_type: ResourceType::String,
            key: "str_1".to_string(),
            qualifiers: "default".to_string(),
            first_path: "a.xml".to_string(),
            second_path: "c.xml".to_string(),
        };
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("error: duplicate variant for `string:str_1`"));
        assert!(output.contains("a.xml"));
        assert!(output.contains("c.xml"));
        assert!(output.contains("help: consider:"));
    }

    #[test]
    fn test_invalid_qualifier_message() {
        let err = GenerateError::InvalidQualifier {
            path: "drawable-rent/icon.xml".to_string(),
            qualifiers: "rent".to_string(),
            reason: QualifierError::Unknown("rent".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "`drawable-rent/icon.xml` contains unknown qualifier: 'rent'."
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = GenerateWarning::MissingDefaultVariant {
            resource_type: ResourceType::Drawable,
            key: "logo".to_string(),
            qualifiers: vec!["dark".to_string()],
        };
        assert_eq!(
            warning.to_string(),
            "`drawable:logo` has no default variant (qualified: dark)"
        );
        assert!(warning.to_diagnostic().format(false).starts_with("warning:"));
    }
}
