//! Implementation of `menupack build`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{Classification, RepoLayout};
use crate::discovery::discover;
use crate::extract::LineDirectiveExtractor;
use crate::index::{self, render_audit_report, render_index};
use crate::ops::scan::scan_exports;
use crate::resolver::{ResolveContext, ShimMode};
use crate::util::fs::write_string;
use crate::util::hash::sha256_str;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Write shims, or only decide them
    pub shims: ShimMode,

    /// Index output path (default: `<root>/<index_file>`)
    pub output: Option<PathBuf>,

    /// Audit report path (default: `<root>/<report_dir>/toolbar_script_targets.md`)
    pub report: Option<PathBuf>,
}

/// What a build produced.
#[derive(Debug, Clone, Serialize)]
pub struct BuildSummary {
    pub index_path: PathBuf,
    pub report_path: PathBuf,

    /// Files reached by discovery
    pub files: usize,
    pub core_resources: usize,
    pub export_files: usize,
    pub references: usize,

    pub categories: usize,
    pub packages: usize,

    pub forwarding_shims: usize,
    pub diagnostic_shims: usize,

    /// Shims were decided but not written
    pub dry_run: bool,

    pub unresolved: usize,
    pub missing_icons: usize,
    pub placeholder_icons: usize,

    /// SHA-256 of the index bytes
    pub index_sha256: String,
}

/// Run the full pipeline: discover, resolve, write shims and placeholder
/// icons, then the index and report.
pub fn build_index(layout: &RepoLayout, opts: &BuildOptions) -> Result<BuildSummary> {
    let snapshot = discover(layout)?;

    let mut ctx = ResolveContext::new(layout, &snapshot, opts.shims, layout.audit_report_rel());
    let exports = scan_exports(layout, &snapshot, &LineDirectiveExtractor, &mut ctx)?;

    let document = index::build_index(layout, &snapshot, &exports, &ctx);

    let index_path = opts.output.clone().unwrap_or_else(|| layout.index_path());
    let xml = render_index(&document);
    write_string(&index_path, &xml).context("failed to write index")?;
    tracing::info!("Wrote {}", index_path.display());

    let report_path = opts
        .report
        .clone()
        .unwrap_or_else(|| layout.abs(&layout.audit_report_rel()));
    let report = render_audit_report(layout, &exports, &ctx);
    write_string(&report_path, &report).context("failed to write audit report")?;
    tracing::info!("Wrote {}", report_path.display());

    let forwarding_shims = ctx.shims().iter().filter(|s| s.is_forwarding()).count();

    Ok(BuildSummary {
        index_path,
        report_path,
        files: snapshot.len(),
        core_resources: snapshot.count(Classification::CoreResource),
        export_files: exports.len(),
        references: exports.iter().map(|e| e.refs.len()).sum(),
        categories: document.categories().count(),
        packages: document.package_count(),
        forwarding_shims,
        diagnostic_shims: ctx.shims().len() - forwarding_shims,
        dry_run: ctx.mode() == ShimMode::DryRun,
        unresolved: ctx.unresolved().len(),
        missing_icons: ctx.missing_icons().len(),
        placeholder_icons: ctx.placeholder_icons().len(),
        index_sha256: sha256_str(&xml),
    })
}
