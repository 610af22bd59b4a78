//! Configuration file support for menupack.
//!
//! menupack supports two configuration file locations:
//! - Global: `~/.menupack/config.toml` - User-wide defaults
//! - Project: `menupack.toml` at the repository root - Project-specific overrides
//!
//! Project config takes precedence over global config. Every field is
//! optional; unset fields fall back to the built-in layout defaults when the
//! [`RepoLayout`](crate::core::RepoLayout) is assembled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::layout::Ownership;
use crate::core::target::Family;

/// Name of the project configuration file.
pub const PROJECT_CONFIG_NAME: &str = "menupack.toml";

/// menupack configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Index metadata and output settings
    pub index: IndexConfig,

    /// Directory layout
    pub layout: LayoutConfig,

    /// Script families
    pub families: FamiliesConfig,

    /// Asset classification settings
    pub classify: ClassifyConfig,
}

/// Index-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Display name of the index
    pub name: Option<String>,

    /// Description attribute of the index; an empty string omits it
    pub desc: Option<String>,

    /// Author written on every version block
    pub author: Option<String>,

    /// Package version tag (semver)
    pub version: Option<String>,

    /// Fixed release time for version blocks; omitted when unset
    pub time: Option<String>,

    /// Base URL that source paths are appended to
    pub raw_base: Option<String>,

    /// Which packages own referenced scripts
    pub ownership: Option<Ownership>,

    /// Install export files under `<dir>/<family>/<file name>`
    pub menuset_install_dir: Option<String>,
}

/// Directory layout settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Roots whose files belong to the core package
    pub core_roots: Option<Vec<String>>,

    /// Roots searched for toolbar/menu export files
    pub toolbar_roots: Option<Vec<String>>,

    /// Roots that feed the optional icons package
    pub icon_roots: Option<Vec<String>>,

    /// Scripts root used for normalization and candidate search
    pub scripts_root: Option<String>,

    /// Directory `ICON:` targets are expected in
    pub icon_dir: Option<String>,

    /// Export file suffixes (matched case-insensitively)
    pub export_suffixes: Option<Vec<String>>,

    /// Top-level directories that are never packaged
    pub exclude_dirs: Option<Vec<String>>,

    /// Extra glob patterns for excluded repository paths
    pub exclude_patterns: Option<Vec<String>>,

    /// Package hidden (dot-prefixed) files
    pub include_hidden: Option<bool>,

    /// Directory that receives audit reports
    pub report_dir: Option<String>,

    /// File name of the generated index
    pub index_file: Option<String>,
}

/// Family configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FamiliesConfig {
    /// Default family for unprefixed references
    pub primary: Option<Family>,

    /// Family selected by prefix or path marker
    pub secondary: Option<Family>,
}

/// Classification strategy selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Strategy id (`extension` or `null`)
    pub strategy: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let Config {
            index,
            layout,
            families,
            classify,
        } = other;

        merge_opt(&mut self.index.name, index.name);
        merge_opt(&mut self.index.desc, index.desc);
        merge_opt(&mut self.index.author, index.author);
        merge_opt(&mut self.index.version, index.version);
        merge_opt(&mut self.index.time, index.time);
        merge_opt(&mut self.index.raw_base, index.raw_base);
        merge_opt(&mut self.index.ownership, index.ownership);
        merge_opt(&mut self.index.menuset_install_dir, index.menuset_install_dir);

        // Lists are replaced, not concatenated
        merge_opt(&mut self.layout.core_roots, layout.core_roots);
        merge_opt(&mut self.layout.toolbar_roots, layout.toolbar_roots);
        merge_opt(&mut self.layout.icon_roots, layout.icon_roots);
        merge_opt(&mut self.layout.scripts_root, layout.scripts_root);
        merge_opt(&mut self.layout.icon_dir, layout.icon_dir);
        merge_opt(&mut self.layout.export_suffixes, layout.export_suffixes);
        merge_opt(&mut self.layout.exclude_dirs, layout.exclude_dirs);
        merge_opt(&mut self.layout.exclude_patterns, layout.exclude_patterns);
        merge_opt(&mut self.layout.include_hidden, layout.include_hidden);
        merge_opt(&mut self.layout.report_dir, layout.report_dir);
        merge_opt(&mut self.layout.index_file, layout.index_file);

        merge_opt(&mut self.families.primary, families.primary);
        merge_opt(&mut self.families.secondary, families.secondary);

        merge_opt(&mut self.classify.strategy, classify.strategy);
    }
}

fn merge_opt<T>(slot: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *slot = other;
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`menupack.toml`)
/// 2. Global config (`~/.menupack/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global menupack config directory (~/.menupack).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".menupack"))
}

/// Get the global config path (~/.menupack/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path for a repository root.
pub fn project_config_path(repo_root: &Path) -> PathBuf {
    repo_root.join(PROJECT_CONFIG_NAME)
}
