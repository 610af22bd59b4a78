//! User-facing diagnostic messages.
//!
//! Every error shown to a user names the path involved and, where one
//! exists, the fix.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages.
pub mod suggestions {
    /// Run from the wrong directory.
    pub const WRONG_ROOT: &str = "Pass the repository root with `--root <dir>`";

    /// Shim or report writes failed.
    pub const WRITABLE: &str = "Check that the repository is writable";

    /// Resolve without touching the tree.
    pub const NO_SHIMS: &str = "Run with `--no-shims` to resolve without writing";

    /// Unknown classifier strategy.
    pub const LIST_STRATEGIES: &str = "Run `menupack classify --list` to see available strategies";
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
        Self::with_severity(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, message)
    }

    fn with_severity(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = match (color, self.severity) {
            (true, Severity::Error) => "\x1b[1;31merror\x1b[0m",
            (true, Severity::Warning) => "\x1b[1;33mwarning\x1b[0m",
            (false, Severity::Error) => "error",
            (false, Severity::Warning) => "warning",
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  → {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
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

/// Repository content found one level below the expected root.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("repository content is nested inside `{nested}`")]
#[diagnostic(
    code(menupack::layout::nested),
    help("Move the contents of `{nested}` up one level, or pass `--root {nested}`")
)]
pub struct NestedLayoutError {
    pub nested: String,
    pub found: Vec<String>,
}

/// Required root folders are missing.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("missing required folders: {}", .missing.join(", "))]
#[diagnostic(code(menupack::layout::missing_roots))]
pub struct MissingRootsError {
    pub missing: Vec<String>,
    #[help]
    pub suggestion: Option<String>,
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
        let diag = Diagnostic::error("failed to write shim")
            .with_location("Scripts/IfeelLikeSnow/DF95/Tool.lua")
            .with_context("permission denied")
            .with_suggestion("Check that the repository is writable")
            .with_suggestion("Run with --no-shims");

        let output = diag.format(false);
        assert!(output.starts_with("error: failed to write shim\n"));
        assert!(output.contains("  --> Scripts/IfeelLikeSnow/DF95/Tool.lua"));
        assert!(output.contains("  → permission denied"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("2. Run with --no-shims"));
    }

    #[test]
    fn test_miette_errors_render_messages() {
        let nested = NestedLayoutError {
            nested: "df95-suite-main".to_string(),
            found: vec!["Scripts".to_string()],
        };
        assert_eq!(
            nested.to_string(),
            "repository content is nested inside `df95-suite-main`"
        );

        let missing = MissingRootsError {
            missing: vec!["Scripts".to_string(), "MenuSets".to_string()],
            suggestion: None,
        };
        assert_eq!(missing.to_string(), "missing required folders: Scripts, MenuSets");
    }
}
