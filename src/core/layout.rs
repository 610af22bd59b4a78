//! Repository layout - the resolved configuration of one run.
//!
//! A `RepoLayout` names the repository root, the monitored roots, the two
//! script families and every output location. It is built once from the
//! merged [`Config`] and passed by reference through the pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::target::{ends_with_ignore_case, Family, FamilyKind};
use crate::util::config::Config;

/// Default base URL for source entries.
pub const DEFAULT_RAW_BASE: &str =
    "https://raw.githubusercontent.com/IfeelLikeSnow/df95-toolbar-suite/main/";

/// Environment variable overriding the base URL.
pub const RAW_BASE_ENV: &str = "REAPACK_RAW_BASE";

pub const DEFAULT_INDEX_NAME: &str = "DF95 Toolbar Suite";
pub const DEFAULT_INDEX_DESC: &str = "Toolbars + required scripts/resources";
pub const DEFAULT_AUTHOR: &str = "IfeelLikeSnow";
pub const DEFAULT_VERSION: &str = "1.0.0";

pub const DEFAULT_CORE_ROOTS: &[&str] = &[
    "Scripts",
    "_selectors",
    "Data",
    "Effects",
    "FXChains",
    "Support",
    "TrackTemplates",
    "Projects",
    "Theme",
    "ThemeMod",
    "Icons",
    "DF95_MetaCore",
    "Config",
    "Chains",
    "RenderPresets",
];

pub const DEFAULT_TOOLBAR_ROOTS: &[&str] = &["Menus", "MenuSets", "Toolbars"];

pub const DEFAULT_ICON_ROOTS: &[&str] = &["Icons", "DF95_MetaCore/UI/Icons", "Data/toolbar_icons"];

/// Export suffixes, compound suffixes first.
pub const DEFAULT_EXPORT_SUFFIXES: &[&str] = &[
    ".Toolbar.ReaperMenu",
    ".ReaperMenuSets",
    ".ReaperMenuSet",
    ".ReaperMenu",
];

pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", ".github", "Reports", "tools", "tool", "Tools"];

/// Who owns the scripts referenced by an export file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ownership {
    /// Toolbar packages carry their export file plus every resolved target.
    #[default]
    Bundled,
    /// Toolbar packages carry only their export file.
    ExportOnly,
}

/// The resolved layout of one repository.
#[derive(Debug, Clone)]
pub struct RepoLayout {
    /// Repository root
    root: PathBuf,

    pub index_name: String,
    pub index_desc: Option<String>,
    pub author: String,
    pub version: Version,
    pub time: Option<String>,

    /// Base URL, always ending in `/`
    pub raw_base: String,

    pub ownership: Ownership,
    pub menuset_install_dir: Option<String>,

    pub core_roots: Vec<String>,
    pub toolbar_roots: Vec<String>,
    pub icon_roots: Vec<String>,
    pub scripts_root: String,
    pub icon_dir: String,
    pub export_suffixes: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub include_hidden: bool,
    pub report_dir: String,
    pub index_file: String,

    pub primary: Family,
    pub secondary: Family,
}

impl RepoLayout {
    /// Build a layout with all built-in defaults.
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        // Defaults are constants; parsing cannot fail.
        Self::from_config(root, &Config::default(), None)
            .unwrap_or_else(|e| unreachable!("built-in defaults are valid: {e:#}"))
    }

    /// Build a layout from merged configuration.
    ///
    /// `raw_base_override` (CLI flag or environment) wins over the config file.
    pub fn from_config(
        root: impl Into<PathBuf>,
        config: &Config,
        raw_base_override: Option<&str>,
    ) -> Result<Self> {
        let index = &config.index;
        let layout = &config.layout;

        let version_str = index.version.as_deref().unwrap_or(DEFAULT_VERSION);
        let version = Version::parse(version_str)
            .with_context(|| format!("invalid package version `{}`", version_str))?;

        let raw_base = normalize_raw_base(
            raw_base_override
                .or(index.raw_base.as_deref())
                .unwrap_or(DEFAULT_RAW_BASE),
        )?;

        let owned = |v: &Option<Vec<String>>, default: &[&str]| -> Vec<String> {
            v.clone()
                .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
        };

        Ok(RepoLayout {
            root: root.into(),
            index_name: index
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            index_desc: match index.desc.as_deref() {
                Some("") => None,
                Some(desc) => Some(desc.to_string()),
                None => Some(DEFAULT_INDEX_DESC.to_string()),
            },
            author: index
                .author
                .clone()
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            version,
            time: index.time.clone(),
            raw_base,
            ownership: index.ownership.unwrap_or_default(),
            menuset_install_dir: index
                .menuset_install_dir
                .as_deref()
                .map(|d| trim_slashes(d).to_string()),
            core_roots: owned(&layout.core_roots, DEFAULT_CORE_ROOTS),
            toolbar_roots: owned(&layout.toolbar_roots, DEFAULT_TOOLBAR_ROOTS),
            icon_roots: owned(&layout.icon_roots, DEFAULT_ICON_ROOTS),
            scripts_root: trim_slashes(layout.scripts_root.as_deref().unwrap_or("Scripts"))
                .to_string(),
            icon_dir: trim_slashes(layout.icon_dir.as_deref().unwrap_or("Data/toolbar_icons"))
                .to_string(),
            export_suffixes: owned(&layout.export_suffixes, DEFAULT_EXPORT_SUFFIXES),
            exclude_dirs: owned(&layout.exclude_dirs, DEFAULT_EXCLUDE_DIRS),
            exclude_patterns: layout.exclude_patterns.clone().unwrap_or_default(),
            include_hidden: layout.include_hidden.unwrap_or(false),
            report_dir: trim_slashes(layout.report_dir.as_deref().unwrap_or("Reports"))
                .to_string(),
            index_file: layout
                .index_file
                .clone()
                .unwrap_or_else(|| "index.xml".to_string()),
            primary: config
                .families
                .primary
                .clone()
                .unwrap_or_else(|| Family::new("DF95", "DF95_", "IfeelLikeSnow/DF95")),
            secondary: config
                .families
                .secondary
                .clone()
                .unwrap_or_else(|| Family::new("IFLS", "IFLS_", "IfeelLikeSnow/IFLS")),
        })
    }

    /// Get the repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a repository-relative posix path.
    pub fn abs(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|c| !c.is_empty())
            .fold(self.root.clone(), |acc, c| acc.join(c))
    }

    pub fn family(&self, kind: FamilyKind) -> &Family {
        match kind {
            FamilyKind::Primary => &self.primary,
            FamilyKind::Secondary => &self.secondary,
        }
    }

    /// Namespace directory of a family, relative to the repository root.
    pub fn namespace_dir(&self, kind: FamilyKind) -> String {
        format!("{}/{}", self.scripts_root, trim_slashes(&self.family(kind).namespace))
    }

    /// The export suffix a file name carries, if any (case-insensitive).
    pub fn export_suffix_of(&self, file_name: &str) -> Option<&str> {
        self.export_suffixes
            .iter()
            .filter(|s| ends_with_ignore_case(file_name, s))
            .max_by_key(|s| s.len())
            .map(String::as_str)
    }

    /// Category of the core package.
    pub fn core_category(&self) -> String {
        format!("{}/00 Core", self.primary.name)
    }

    /// Category of the optional icons package.
    pub fn icons_category(&self) -> String {
        format!("{}/90 Icons", self.primary.name)
    }

    /// Toolbar category of a family.
    pub fn toolbar_category(&self, kind: FamilyKind) -> String {
        format!("{}/10 Toolbars", self.family(kind).name)
    }

    /// Repository-relative path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.abs(&self.index_file)
    }

    /// Repository-relative path of the toolbar audit report.
    pub fn audit_report_rel(&self) -> String {
        format!("{}/toolbar_script_targets.md", self.report_dir)
    }

    /// Repository-relative path of the unresolved-targets report.
    pub fn unresolved_report_rel(&self) -> String {
        format!("{}/unresolved_script_targets.md", self.report_dir)
    }

    pub fn icon_report_rel(&self) -> String {
        format!("{}/icon_resolution_report.md", self.report_dir)
    }
}

/// Validate a base URL and make sure it ends with exactly one `/`.
pub fn normalize_raw_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let normalized = format!("{}/", trimmed);
    Url::parse(&normalized).with_context(|| format!("invalid base URL `{}`", raw))?;
    Ok(normalized)
}

fn trim_slashes(s: &str) -> &str {
    s.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let layout = RepoLayout::with_defaults("/repo");
        assert_eq!(layout.scripts_root, "Scripts");
        assert_eq!(layout.version, Version::new(1, 0, 0));
        assert_eq!(layout.raw_base, DEFAULT_RAW_BASE);
        assert_eq!(layout.ownership, Ownership::Bundled);
        assert_eq!(
            layout.namespace_dir(FamilyKind::Secondary),
            "Scripts/IfeelLikeSnow/IFLS"
        );
        assert_eq!(layout.core_category(), "DF95/00 Core");
        assert_eq!(layout.index_desc.as_deref(), Some(DEFAULT_INDEX_DESC));
        assert_eq!(layout.toolbar_category(FamilyKind::Secondary), "IFLS/10 Toolbars");
    }

    #[test]
    fn test_export_suffix_prefers_compound() {
        let layout = RepoLayout::with_defaults("/repo");
        assert_eq!(
            layout.export_suffix_of("Main.Toolbar.ReaperMenu"),
            Some(".Toolbar.ReaperMenu")
        );
        assert_eq!(layout.export_suffix_of("x.reapermenuset"), Some(".ReaperMenuSet"));
        assert_eq!(layout.export_suffix_of("x.lua"), None);
    }

    #[test]
    fn test_raw_base_normalization() {
        assert_eq!(
            normalize_raw_base("https://example.com/repo//").unwrap(),
            "https://example.com/repo/"
        );
        assert!(normalize_raw_base("not a url").is_err());
    }

    #[test]
    fn test_override_wins_over_config() {
        let mut config = Config::default();
        config.index.raw_base = Some("https://config.invalid/base".to_string());

        let layout =
            RepoLayout::from_config("/repo", &config, Some("https://flag.invalid/x")).unwrap();
        assert_eq!(layout.raw_base, "https://flag.invalid/x/");

        let layout = RepoLayout::from_config("/repo", &config, None).unwrap();
        assert_eq!(layout.raw_base, "https://config.invalid/base/");
    }

    #[test]
    fn test_index_desc_from_config() {
        let mut config = Config::default();
        config.index.desc = Some("Menus only".to_string());
        let layout = RepoLayout::from_config("/repo", &config, None).unwrap();
        assert_eq!(layout.index_desc.as_deref(), Some("Menus only"));

        config.index.desc = Some(String::new());
        let layout = RepoLayout::from_config("/repo", &config, None).unwrap();
        assert_eq!(layout.index_desc, None);
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        let mut config = Config::default();
        config.index.version = Some("one".to_string());
        assert!(RepoLayout::from_config("/repo", &config, None).is_err());
    }

    #[test]
    fn test_abs_joins_components() {
        let layout = RepoLayout::with_defaults("/repo");
        assert_eq!(
            layout.abs("Scripts/a/b.lua"),
            PathBuf::from("/repo").join("Scripts").join("a").join("b.lua")
        );
    }
}
