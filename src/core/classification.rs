//! File classification.
//!
//! Every file reached during discovery gets exactly one [`Classification`].

use std::fmt;

use serde::Serialize;

/// Ownership class of a repository file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Packaged by the core package.
    CoreResource,
    /// A toolbar/menu export file, packaged on its own.
    ToolbarExport,
    /// Dropped from all downstream processing.
    Excluded,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::CoreResource => "core-resource",
            Classification::ToolbarExport => "toolbar-export",
            Classification::Excluded => "excluded",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file found under one of the monitored roots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RepoFile {
    /// Repository-relative path with forward slashes
    rel_path: String,

    /// The single class this file belongs to
    classification: Classification,
}

impl RepoFile {
    pub fn new(rel_path: impl Into<String>, classification: Classification) -> Self {
        RepoFile {
            rel_path: rel_path.into(),
            classification,
        }
    }

    /// Repository-relative posix path.
    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// Base file name (last path component).
    pub fn file_name(&self) -> &str {
        base_name(&self.rel_path)
    }
}

/// Last component of a forward-slash path.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Scripts/a/b.lua"), "b.lua");
        assert_eq!(base_name("b.lua"), "b.lua");
        assert_eq!(base_name("Scripts/dir/"), "");
    }

    #[test]
    fn test_classification_display() {
        assert_eq!(Classification::CoreResource.to_string(), "core-resource");
        assert_eq!(Classification::ToolbarExport.to_string(), "toolbar-export");
        assert_eq!(Classification::Excluded.to_string(), "excluded");
    }
}
