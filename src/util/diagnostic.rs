//! User-facing diagnostic messages.
//!
//! Every error printed by the CLI names the offending resource or file, the
//! conflicting inputs and, where possible, how to fix it.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a qualifier suffix does not parse.
    pub const QUALIFIER_GRAMMAR: &str =
        "Use qualifiers like `en`, `en-rUS`, `dark`, `xhdpi` or `land`, separated by `-`";

    /// Suggestion when an entry has no unqualified variant.
    pub const ADD_DEFAULT: &str =
        "Add the resource to the unqualified directory (e.g. `values/strings.xml`)";

    /// Suggestion listing the supported directory types.
    pub const DIRECTORY_TYPES: &str =
        "Resource directories must be one of: drawable, font, values, files";

    /// Suggestion for malformed values files.
    pub const VALUES_FORMAT: &str =
        "Values files must contain a <resources> root with <string>, <string-array> or <plurals> elements";

    /// Suggestion when the configuration file is rejected.
    pub const CHECK_CONFIG: &str = "Check `.resforge/config.toml` and `~/.resforge/config.toml`";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(message)
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("duplicate variant for `string:app_name` (fr)")
            .with_location("values-fr/strings.xml")
            .with_context("first defined in `values-fr/a.xml`")
            .with_suggestion("Remove one of the definitions");

        let output = diag.format(false);
        assert!(output.contains("error: duplicate variant"));
        assert!(output.contains("--> values-fr/strings.xml"));
        assert!(output.contains("= first defined in"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Remove one"));
    }

    #[test]
    fn test_warning_without_suggestions() {
        let output = Diagnostic::warning("skipped").format(false);
        assert_eq!(output, "warning: skipped\n");
    }
}
