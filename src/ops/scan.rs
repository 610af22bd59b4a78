//! Export scanning: extraction, normalization and resolution per export file.

use std::collections::HashSet;

use crate::core::{DirectiveKind, ExportScan, FamilyKind, NormalizedTarget, RepoLayout, ScannedRef};
use crate::discovery::Snapshot;
use crate::extract::{extract_file, DirectiveExtractor};
use crate::resolver::{normalize_icon, normalize_script, ResolveContext, ResolveError};

/// Scan every toolbar export of the snapshot, in path order.
///
/// Targets are resolved through `ctx`, which writes shims and placeholder
/// icons unless it is a dry run.
pub fn scan_exports(
    layout: &RepoLayout,
    snapshot: &Snapshot,
    extractor: &dyn DirectiveExtractor,
    ctx: &mut ResolveContext<'_>,
) -> Result<Vec<ExportScan>, ResolveError> {
    scan_all(layout, snapshot, extractor, ctx, None)
}

/// Scan only the `ICON:` references of every toolbar export.
pub fn scan_icon_exports(
    layout: &RepoLayout,
    snapshot: &Snapshot,
    extractor: &dyn DirectiveExtractor,
    ctx: &mut ResolveContext<'_>,
) -> Result<Vec<ExportScan>, ResolveError> {
    scan_all(layout, snapshot, extractor, ctx, Some(DirectiveKind::Icon))
}

fn scan_all(
    layout: &RepoLayout,
    snapshot: &Snapshot,
    extractor: &dyn DirectiveExtractor,
    ctx: &mut ResolveContext<'_>,
    only: Option<DirectiveKind>,
) -> Result<Vec<ExportScan>, ResolveError> {
    let mut scans = Vec::new();
    for path in snapshot.toolbar_exports() {
        scans.push(scan_filtered(layout, path, extractor, ctx, only)?);
    }

    tracing::info!(
        "Scanned {} export files ({} references)",
        scans.len(),
        scans.iter().map(|s| s.refs.len()).sum::<usize>()
    );

    Ok(scans)
}

/// Scan one export file.
pub fn scan_export(
    layout: &RepoLayout,
    path: &str,
    extractor: &dyn DirectiveExtractor,
    ctx: &mut ResolveContext<'_>,
) -> Result<ExportScan, ResolveError> {
    scan_filtered(layout, path, extractor, ctx, None)
}

fn scan_filtered(
    layout: &RepoLayout,
    path: &str,
    extractor: &dyn DirectiveExtractor,
    ctx: &mut ResolveContext<'_>,
    only: Option<DirectiveKind>,
) -> Result<ExportScan, ResolveError> {
    let family = export_family(layout, path);
    let references: Vec<_> = extract_file(extractor, &layout.abs(path), path)
        .into_iter()
        .filter(|r| only.is_none_or(|kind| r.kind == kind))
        .collect();

    let mut seen: HashSet<NormalizedTarget> = HashSet::new();
    let mut refs = Vec::with_capacity(references.len());

    for reference in references {
        let target = match reference.kind {
            DirectiveKind::Script => normalize_script(layout, &reference.raw),
            DirectiveKind::Icon => normalize_icon(layout, &reference.raw),
        };

        let repeat = match &target {
            Some(t) => !seen.insert(t.clone()),
            None => false,
        };

        if let (Some(t), false) = (&target, repeat) {
            match reference.kind {
                DirectiveKind::Script => {
                    ctx.resolve_script(t, path)?;
                }
                DirectiveKind::Icon => {
                    ctx.resolve_icon(t)?;
                }
            }
        }

        refs.push(ScannedRef {
            reference,
            target,
            repeat,
        });
    }

    Ok(ExportScan {
        path: path.to_string(),
        family,
        refs,
    })
}

/// Family an export file is categorized under.
pub fn export_family(layout: &RepoLayout, path: &str) -> FamilyKind {
    if layout.secondary.marks_path(path) {
        FamilyKind::Secondary
    } else {
        FamilyKind::Primary
    }
}
