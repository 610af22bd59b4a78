//! Package descriptors.
//!
//! A descriptor carries the ordered, deduplicated list of files one package
//! installs. Within a descriptor no source path appears twice.

use std::collections::BTreeMap;

use semver::Version;
use serde::Serialize;

/// One installable file of a package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SourceEntry {
    /// Where the file lands relative to the install root
    pub install_path: String,

    /// Repository-relative source path
    pub source_path: String,

    /// Retrievable URL for the source path
    pub url: String,
}

/// A package in the index.
#[derive(Debug, Clone, Serialize)]
pub struct PackageDescriptor {
    /// Package name
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Version tag
    pub version: Version,

    /// Author shown on the version block
    pub author: String,

    /// Fixed release time, if configured
    pub time: Option<String>,

    /// Entries keyed by source path
    entries: BTreeMap<String, SourceEntry>,
}

impl PackageDescriptor {
    /// Create an empty package.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        version: Version,
        author: impl Into<String>,
    ) -> Self {
        PackageDescriptor {
            name: name.into(),
            description: description.into(),
            version,
            author: author.into(),
            time: None,
            entries: BTreeMap::new(),
        }
    }

    /// Set the release time shown on the version block.
    pub fn with_time(mut self, time: Option<String>) -> Self {
        self.time = time;
        self
    }

    /// Add a source entry. Returns false if the source path was already present.
    pub fn add_entry(&mut self, entry: SourceEntry) -> bool {
        if self.entries.contains_key(&entry.source_path) {
            return false;
        }
        self.entries.insert(entry.source_path.clone(), entry);
        true
    }

    /// Entries sorted ascending by install path, then source path.
    pub fn entries(&self) -> Vec<&SourceEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| {
            a.install_path
                .cmp(&b.install_path)
                .then_with(|| a.source_path.cmp(&b.source_path))
        });
        entries
    }

    /// Check whether a source path is owned by this package.
    pub fn contains(&self, source_path: &str) -> bool {
        self.entries.contains_key(source_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The smallest source path, used as a tie-breaker when ordering packages.
    pub fn first_source(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }
}
