//! Script families and normalized targets.
//!
//! Two families share the packaging pipeline. Each one owns a namespace
//! directory under the scripts root; references are routed into a namespace
//! by their base-name prefix.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::classification::base_name;

/// Which of the two parallel families something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    Primary,
    Secondary,
}

/// A script family (e.g. `DF95` or `IFLS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    /// Display name, also used as the path marker for category routing
    pub name: String,

    /// Base-name prefix that routes a reference into this family
    pub prefix: String,

    /// Namespace directory relative to the scripts root
    pub namespace: String,
}

impl Family {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Family {
            name: name.into(),
            prefix: prefix.into(),
            namespace: namespace.into(),
        }
    }

    /// Whether a base file name carries this family's prefix (case-insensitive).
    pub fn claims_basename(&self, basename: &str) -> bool {
        !self.prefix.is_empty() && starts_with_ignore_case(basename, &self.prefix)
    }

    /// Whether the family marker occurs anywhere in a path (case-insensitive).
    pub fn marks_path(&self, path: &str) -> bool {
        !self.name.is_empty() && path.to_lowercase().contains(&self.name.to_lowercase())
    }
}

/// A canonical repository-relative path derived from a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedTarget(String);

impl NormalizedTarget {
    pub fn new(path: impl Into<String>) -> Self {
        NormalizedTarget(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        base_name(&self.0)
    }
}

impl fmt::Display for NormalizedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedTarget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// ASCII case-insensitive prefix test.
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// ASCII case-insensitive suffix test.
pub fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
