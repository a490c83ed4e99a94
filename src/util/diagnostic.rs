//! User-friendly diagnostic messages.
//!
//! Errors reaching the command line carry the failing property, what went
//! wrong, and a suggested next step.

use std::fmt;
use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a property path does not resolve.
    pub const UNKNOWN_PROPERTY: &str = "help: Run `vplcfg schema` to list addressable properties";

    /// Suggestion when no implementation manifest is configured.
    pub const NO_MANIFEST: &str =
        "help: Pass `--manifest <FILE>` or set `defaults.manifest` in vplcfg.toml";

    /// Suggestion when no implementation satisfies the filters.
    pub const NO_MATCH: &str = "help: Run `vplcfg match` without filters to list implementations";
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
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
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

        // Severity prefix with optional color
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

        // Main message
        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        // Location if present
        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        // Context lines
        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        // Suggestions
        if !self.suggestions.is_empty() {
            output.push('\n');
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

/// Property path that does not resolve, with the offending segment marked.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("unknown property path")]
#[diagnostic(
    code(vplcfg::resolve::not_found),
    help("Run `vplcfg schema` to list addressable properties")
)]
pub struct InvalidPathError {
    pub reason: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{reason}")]
    pub span: SourceSpan,
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
        let diag = Diagnostic::error("cannot store `300` in `mfx.FrameInfo.BitDepthLuma`")
            .with_context("`300` is out of range for u16")
            .with_suggestion("Check the field type with `vplcfg schema`")
            .with_location("vplcfg.toml");

        let output = diag.format(false);
        assert!(output.contains("error: cannot store"));
        assert!(output.contains("--> vplcfg.toml"));
        assert!(output.contains("out of range for u16"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Check the field type"));
    }

    #[test]
    fn test_warning_has_no_suggestions_block() {
        let output = Diagnostic::warning("extension buffer attached").format(false);
        assert!(output.starts_with("warning: extension buffer attached"));
        assert!(!output.contains("help"));
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");

        let colored = Diagnostic::warning("attached").format(true);
        assert!(colored.starts_with("\x1b[1;33mwarning\x1b[0m: attached"));
    }
}
