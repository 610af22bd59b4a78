//! Directive references extracted from export files.

use std::fmt;

use serde::Serialize;

/// The kind of directive a reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    /// `SCRIPT: <target>`
    Script,
    /// `ICON: <target>`
    Icon,
}

impl DirectiveKind {
    /// The directive keyword as it appears in export files.
    pub fn keyword(&self) -> &'static str {
        match self {
            DirectiveKind::Script => "SCRIPT",
            DirectiveKind::Icon => "ICON",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A raw target string found on a directive line.
///
/// References are scoped to the export file they were found in and keep
/// the 1-based line number for the audit report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Directive kind
    pub kind: DirectiveKind,

    /// The target text, trimmed
    pub raw: String,

    /// 1-based line number within the export file
    pub line: usize,

    /// Repository-relative path of the export file
    pub origin: String,
}

impl Reference {
    pub fn new(
        kind: DirectiveKind,
        raw: impl Into<String>,
        line: usize,
        origin: impl Into<String>,
    ) -> Self {
        Reference {
            kind,
            raw: raw.into(),
            line,
            origin: origin.into(),
        }
    }

    pub fn is_script(&self) -> bool {
        self.kind == DirectiveKind::Script
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.raw)
    }
}
