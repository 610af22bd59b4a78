//! Classification rules.
//!
//! Exclusion takes precedence over everything else; export suffixes come
//! next; core roots last.

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

use crate::core::{Classification, RepoLayout};

/// Version-control directories, excluded at any depth.
pub const VCS_DIRS: &[&str] = &[".git", ".github", ".hg", ".svn"];

/// Compiled classification rules for one layout.
#[derive(Debug)]
pub struct Rules<'a> {
    layout: &'a RepoLayout,
    patterns: Vec<Pattern>,
}

impl<'a> Rules<'a> {
    /// Compile the layout's exclusion patterns.
    pub fn new(layout: &'a RepoLayout) -> Result<Self> {
        let patterns = layout
            .exclude_patterns
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("invalid exclude pattern: {}", p)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Rules { layout, patterns })
    }

    /// Whether a repository-relative path is excluded.
    pub fn is_excluded(&self, rel: &str) -> bool {
        if let Some(first) = rel.split('/').next() {
            if self.layout.exclude_dirs.iter().any(|d| d == first) {
                return true;
            }
        }

        if rel.split('/').any(|c| VCS_DIRS.contains(&c)) {
            return true;
        }

        if !self.layout.include_hidden && rel.split('/').any(|c| c.starts_with('.')) {
            return true;
        }

        let opts = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.patterns.iter().any(|p| p.matches_with(rel, opts))
    }

    /// Whether a file name carries one of the export suffixes.
    pub fn is_export(&self, file_name: &str) -> bool {
        self.layout.export_suffix_of(file_name).is_some()
    }

    /// Whether a path lies under one of the core roots.
    pub fn is_under_core_root(&self, rel: &str) -> bool {
        self.layout.core_roots.iter().any(|root| is_under(rel, root))
    }

    /// Assign exactly one classification to a repository-relative path.
    pub fn classify(&self, rel: &str) -> Classification {
        let file_name = rel.rsplit('/').next().unwrap_or(rel);

        if self.is_excluded(rel) {
            Classification::Excluded
        } else if self.is_export(file_name) {
            Classification::ToolbarExport
        } else if self.is_under_core_root(rel) {
            Classification::CoreResource
        } else {
            Classification::Excluded
        }
    }
}

/// Whether `rel` is `root` itself or lies beneath it.
pub fn is_under(rel: &str, root: &str) -> bool {
    let root = root.trim_matches('/');
    if root.is_empty() {
        return true;
    }
    rel == root
        || (rel.len() > root.len() && rel.starts_with(root) && rel.as_bytes()[root.len()] == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::Config;

    fn layout() -> RepoLayout {
        RepoLayout::with_defaults("/repo")
    }

    #[test]
    fn test_exclusion_takes_precedence() {
        let layout = layout();
        let rules = Rules::new(&layout).unwrap();

        assert_eq!(rules.classify("Reports/x.ReaperMenuSet"), Classification::Excluded);
        assert_eq!(rules.classify("Scripts/.hidden.lua"), Classification::Excluded);
        assert_eq!(rules.classify("Scripts/.git/config"), Classification::Excluded);
        assert_eq!(rules.classify("tools/build.py"), Classification::Excluded);
    }

    #[test]
    fn test_vcs_dirs_excluded_at_any_depth() {
        let mut config = Config::default();
        config.layout.include_hidden = Some(true);
        let layout = RepoLayout::from_config("/repo", &config, None).unwrap();
        let rules = Rules::new(&layout).unwrap();

        assert_eq!(rules.classify("Scripts/.git/config"), Classification::Excluded);
        assert_eq!(rules.classify("Scripts/Vendor/.github/x.lua"), Classification::Excluded);
        assert_eq!(rules.classify("Scripts/.hidden.lua"), Classification::CoreResource);
    }

    #[test]
    fn test_export_before_core() {
        let layout = layout();
        let rules = Rules::new(&layout).unwrap();

        assert_eq!(
            rules.classify("Data/Main.Toolbar.ReaperMenu"),
            Classification::ToolbarExport
        );
        assert_eq!(
            rules.classify("MenuSets/main.reapermenuset"),
            Classification::ToolbarExport
        );
        assert_eq!(rules.classify("Scripts/a.lua"), Classification::CoreResource);
        assert_eq!(rules.classify("MenuSets/readme.txt"), Classification::Excluded);
    }

    #[test]
    fn test_extra_patterns() {
        let mut config = Config::default();
        config.layout.exclude_patterns = Some(vec!["*.bak".to_string()]);
        let layout = RepoLayout::from_config("/repo", &config, None).unwrap();
        let rules = Rules::new(&layout).unwrap();

        assert_eq!(rules.classify("Scripts/deep/x.bak"), Classification::Excluded);
        assert_eq!(rules.classify("Scripts/deep/x.lua"), Classification::CoreResource);
    }

    #[test]
    fn test_invalid_pattern() {
        let mut config = Config::default();
        config.layout.exclude_patterns = Some(vec!["[".to_string()]);
        let layout = RepoLayout::from_config("/repo", &config, None).unwrap();
        assert!(Rules::new(&layout).is_err());
    }

    #[test]
    fn test_is_under() {
        assert!(is_under("Scripts/a.lua", "Scripts"));
        assert!(is_under("Scripts", "Scripts/"));
        assert!(!is_under("ScriptsX/a.lua", "Scripts"));
        assert!(is_under("DF95_MetaCore/UI/Icons/a.png", "DF95_MetaCore/UI/Icons"));
    }
}
