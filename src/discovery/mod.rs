//! File discovery and classification.
//!
//! Walks the configured roots once and freezes the result in a [`Snapshot`].
//! Everything downstream (candidate search, package building) reads the
//! snapshot, never the live tree, so files written later in the same run
//! cannot be misclassified or counted twice.

pub mod rules;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::core::{Classification, RepoFile, RepoLayout};
use crate::util::fs::relative_posix;

pub use rules::{is_under, Rules};

/// Immutable result of one discovery pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Every reached file, keyed by repository-relative path
    files: BTreeMap<String, Classification>,

    /// Non-excluded, non-export files under the icon roots
    icon_files: BTreeSet<String>,
}

impl Snapshot {
    /// All files in path order.
    pub fn files(&self) -> impl Iterator<Item = RepoFile> + '_ {
        self.files.iter().map(|(p, c)| RepoFile::new(p.clone(), *c))
    }

    /// Paths of one classification, in path order.
    pub fn paths_of(&self, class: Classification) -> impl Iterator<Item = &str> + '_ {
        self.files
            .iter()
            .filter(move |(_, c)| **c == class)
            .map(|(p, _)| p.as_str())
    }

    pub fn core_resources(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths_of(Classification::CoreResource)
    }

    pub fn toolbar_exports(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths_of(Classification::ToolbarExport)
    }

    /// Icon-root files, in path order.
    pub fn icon_files(&self) -> impl Iterator<Item = &str> + '_ {
        self.icon_files.iter().map(String::as_str)
    }

    pub fn classification_of(&self, rel: &str) -> Option<Classification> {
        self.files.get(rel).copied()
    }

    /// Core resources beneath a directory.
    pub fn core_resources_under<'s>(&'s self, dir: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.core_resources().filter(move |p| is_under(p, dir))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files per classification.
    pub fn count(&self, class: Classification) -> usize {
        self.files.values().filter(|c| **c == class).count()
    }

    fn insert(&mut self, rel: String, class: Classification) {
        // A file reachable from two overlapping roots is recorded once.
        self.files.entry(rel).or_insert(class);
    }
}

/// Walk the core, toolbar and icon roots and classify every file.
///
/// Missing roots contribute nothing. Unreadable directory entries are
/// logged and skipped.
pub fn discover(layout: &RepoLayout) -> Result<Snapshot> {
    let rules = Rules::new(layout)?;
    let mut snapshot = Snapshot::default();

    let roots: BTreeSet<&str> = layout
        .core_roots
        .iter()
        .chain(layout.toolbar_roots.iter())
        .map(String::as_str)
        .collect();

    for root in roots {
        for rel in walk_root(layout, root) {
            let class = rules.classify(&rel);
            tracing::trace!("{} -> {}", rel, class);
            snapshot.insert(rel, class);
        }
    }

    for root in &layout.icon_roots {
        for rel in walk_root(layout, root) {
            let file_name = rel.rsplit('/').next().unwrap_or(&rel);
            if !rules.is_excluded(&rel) && !rules.is_export(file_name) {
                snapshot.icon_files.insert(rel);
            }
        }
    }

    tracing::info!(
        "Discovered {} files ({} core, {} toolbar exports, {} excluded)",
        snapshot.len(),
        snapshot.count(Classification::CoreResource),
        snapshot.count(Classification::ToolbarExport),
        snapshot.count(Classification::Excluded),
    );

    Ok(snapshot)
}

/// Repository-relative paths of all files under one root, sorted.
fn walk_root(layout: &RepoLayout, root: &str) -> Vec<String> {
    let abs_root = layout.abs(root);
    if !abs_root.is_dir() {
        tracing::debug!("Root `{}` does not exist, skipping", root);
        return Vec::new();
    }

    let include_hidden = layout.include_hidden;
    let mut out = Vec::new();

    let walker = WalkDir::new(&abs_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e.path()));

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                out.push(relative_posix(layout.root(), entry.path()));
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping unreadable entry under {}: {}", root, e),
        }
    }

    out
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RepoFixture;

    #[test]
    fn test_discover_classifies_every_file_once() {
        let fx = RepoFixture::new()
            .file("Scripts/IfeelLikeSnow/DF95/DF95_Tool.lua", "-- tool")
            .file("Data/presets.txt", "x")
            .file("MenuSets/Main.ReaperMenuSet", "SCRIPT: DF95_Tool.lua")
            .file("MenuSets/notes.txt", "not an export")
            .file("Scripts/.hidden.lua", "x")
            .file("Unmonitored/file.txt", "x");
        let layout = fx.layout();

        let snapshot = discover(&layout).unwrap();

        assert_eq!(
            snapshot.classification_of("Scripts/IfeelLikeSnow/DF95/DF95_Tool.lua"),
            Some(Classification::CoreResource)
        );
        assert_eq!(
            snapshot.classification_of("MenuSets/Main.ReaperMenuSet"),
            Some(Classification::ToolbarExport)
        );
        assert_eq!(
            snapshot.classification_of("MenuSets/notes.txt"),
            Some(Classification::Excluded)
        );
        // Hidden files are pruned during the walk
        assert_eq!(snapshot.classification_of("Scripts/.hidden.lua"), None);
        // Files outside the monitored roots are never reached
        assert_eq!(snapshot.classification_of("Unmonitored/file.txt"), None);

        let total = snapshot.count(Classification::CoreResource)
            + snapshot.count(Classification::ToolbarExport)
            + snapshot.count(Classification::Excluded);
        assert_eq!(total, snapshot.len());
    }

    #[test]
    fn test_nested_vcs_dirs_stay_excluded_with_hidden_files() {
        let fx = RepoFixture::new()
            .file("Scripts/.git/config", "[core]")
            .file("Scripts/.gitattributes", "* text")
            .file("Scripts/a.lua", "");
        let layout = fx.layout_with("[layout]\ninclude_hidden = true\n");

        let snapshot = discover(&layout).unwrap();

        assert_eq!(
            snapshot.classification_of("Scripts/.git/config"),
            Some(Classification::Excluded)
        );
        assert_eq!(
            snapshot.classification_of("Scripts/.gitattributes"),
            Some(Classification::CoreResource)
        );
        assert!(!snapshot.core_resources().any(|p| p.contains(".git/")));
    }

    #[test]
    fn test_missing_roots_contribute_nothing() {
        let fx = RepoFixture::new();
        let snapshot = discover(&fx.layout()).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_exports_under_core_roots_are_exports() {
        let fx = RepoFixture::new().file("Data/Extra.Toolbar.ReaperMenu", "ICON: a.png");
        let snapshot = discover(&fx.layout()).unwrap();

        let exports: Vec<_> = snapshot.toolbar_exports().collect();
        assert_eq!(exports, vec!["Data/Extra.Toolbar.ReaperMenu"]);
        assert_eq!(snapshot.core_resources().count(), 0);
    }

    #[test]
    fn test_icon_files_are_collected() {
        let fx = RepoFixture::new()
            .file("Data/toolbar_icons/a.png", "png")
            .file("Icons/b.png", "png");
        let snapshot = discover(&fx.layout()).unwrap();

        let icons: Vec<_> = snapshot.icon_files().collect();
        assert_eq!(icons, vec!["Data/toolbar_icons/a.png", "Icons/b.png"]);
    }

    #[test]
    fn test_core_resources_under() {
        let fx = RepoFixture::new()
            .file("Scripts/a/x.lua", "")
            .file("Scripts/b/y.lua", "")
            .file("Data/z.txt", "");
        let snapshot = discover(&fx.layout()).unwrap();

        let under: Vec<_> = snapshot.core_resources_under("Scripts").collect();
        assert_eq!(under, vec!["Scripts/a/x.lua", "Scripts/b/y.lua"]);
    }
}
