//! Index assembly and serialization.
//!
//! Turns the discovery snapshot, the export scans and the resolution context
//! into an [`IndexDocument`], then renders it as XML plus a markdown audit
//! report.

pub mod report;
pub mod url;
pub mod xml;

use std::collections::BTreeSet;

use crate::core::classification::base_name;
use crate::core::{
    ExportScan, IndexDocument, Ownership, PackageDescriptor, RepoLayout, SourceEntry,
};
use crate::discovery::Snapshot;
use crate::resolver::ResolveContext;

pub use report::{render_audit_report, render_icon_report, render_unresolved_report};
pub use url::source_url;
pub use xml::render_index;

const CORE_DESC: &str = "Core scripts/resources used by toolbars (install this first).";
const ICONS_DESC: &str = "Optional: toolbar/icon assets.";
const BUNDLED_DESC: &str = "Toolbar/MenuSet + referenced scripts (shims included)";
const EXPORT_ONLY_DESC: &str = "Toolbar/MenuSet only (requires Core). \
     Import via Options > Customize menus/toolbars > Import.";

/// Build the full index document.
pub fn build_index(
    layout: &RepoLayout,
    snapshot: &Snapshot,
    exports: &[ExportScan],
    ctx: &ResolveContext<'_>,
) -> IndexDocument {
    let mut index = IndexDocument::new(&layout.index_name).with_desc(layout.index_desc.clone());

    // Core: every core resource, plus shims and placeholders written during this run.
    let mut core_paths: BTreeSet<&str> = snapshot.core_resources().collect();
    core_paths.extend(ctx.written_files());

    let mut core = new_package(layout, format!("{} – Core", layout.index_name), CORE_DESC);
    for path in &core_paths {
        core.add_entry(entry(layout, path, path));
    }
    index.add_package(&layout.core_category(), core);

    // Icons: only files the core package does not already own.
    let mut icons = new_package(layout, format!("{} – Icons", layout.index_name), ICONS_DESC);
    for path in snapshot.icon_files().filter(|p| !core_paths.contains(p)) {
        icons.add_entry(entry(layout, path, path));
    }
    index.add_package(&layout.icons_category(), icons);

    for scan in exports {
        let package = toolbar_package(layout, scan, ctx);
        index.add_package(&layout.toolbar_category(scan.family), package);
    }

    tracing::info!(
        "Built index with {} packages in {} categories",
        index.package_count(),
        index.categories().count()
    );

    index
}

/// Package for one export file.
fn toolbar_package(
    layout: &RepoLayout,
    scan: &ExportScan,
    ctx: &ResolveContext<'_>,
) -> PackageDescriptor {
    let file_name = base_name(&scan.path);
    let stem = layout
        .export_suffix_of(file_name)
        .and_then(|suffix| file_name.len().checked_sub(suffix.len()))
        .and_then(|end| file_name.get(..end))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name);

    let desc = match layout.ownership {
        Ownership::Bundled => BUNDLED_DESC,
        Ownership::ExportOnly => EXPORT_ONLY_DESC,
    };
    let mut package = new_package(layout, stem.to_string(), desc);

    let install_path = match &layout.menuset_install_dir {
        Some(dir) => format!("{}/{}/{}", dir, layout.family(scan.family).name, file_name),
        None => scan.path.clone(),
    };
    package.add_entry(entry(layout, &install_path, &scan.path));

    if layout.ownership == Ownership::Bundled {
        for target in scan.targets().filter(|t| ctx.exists_after(t)) {
            package.add_entry(entry(layout, target.as_str(), target.as_str()));
        }
    }

    package
}

fn new_package(layout: &RepoLayout, name: String, desc: &str) -> PackageDescriptor {
    PackageDescriptor::new(name, desc, layout.version.clone(), &layout.author)
        .with_time(layout.time.clone())
}

fn entry(layout: &RepoLayout, install_path: &str, source_path: &str) -> SourceEntry {
    SourceEntry {
        install_path: install_path.to_string(),
        source_path: source_path.to_string(),
        url: source_url(&layout.raw_base, source_path),
    }
}
