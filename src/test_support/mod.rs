//! Test utilities for menupack unit tests.
//!
//! Provides a builder for throwaway repository trees on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use menupack::test_support::RepoFixture;
//!
//! let fx = RepoFixture::new()
//!     .file("Scripts/Other/IFLS_Fader.lua", "-- real")
//!     .file("MenuSets/Main.ReaperMenuSet", "SCRIPT: IFLS_Fader.lua\n");
//! let layout = fx.layout();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::RepoLayout;
use crate::util::config::Config;

/// A repository tree living in a temporary directory.
pub struct RepoFixture {
    dir: TempDir,
}

impl RepoFixture {
    /// Create an empty repository.
    pub fn new() -> Self {
        RepoFixture {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Add a text file at a repository-relative path.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        self.bytes(rel, contents.as_bytes())
    }

    /// Add a file with raw contents.
    pub fn bytes(self, rel: &str, contents: &[u8]) -> Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a repository-relative path.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Read a repository file.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Default layout rooted at this repository.
    pub fn layout(&self) -> RepoLayout {
        RepoLayout::with_defaults(self.root())
    }

    /// Layout built from a TOML config snippet.
    pub fn layout_with(&self, toml_src: &str) -> RepoLayout {
        let config: Config = toml::from_str(toml_src).unwrap();
        RepoLayout::from_config(self.root(), &config, None).unwrap()
    }
}

impl Default for RepoFixture {
    fn default() -> Self {
        Self::new()
    }
}
