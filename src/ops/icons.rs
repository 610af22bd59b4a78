//! Implementation of `menupack icons`.
//!
//! Resolves `ICON:` references only: placeholder icons are written for
//! missing images and the icon resolution report is produced. Script
//! targets are left alone.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{NormalizedTarget, RepoLayout};
use crate::discovery::discover;
use crate::extract::LineDirectiveExtractor;
use crate::index::render_icon_report;
use crate::ops::scan::scan_icon_exports;
use crate::resolver::{IconOutcome, ResolveContext, ShimMode};
use crate::util::fs::write_string;

/// Options for the icon pass.
#[derive(Debug, Clone, Default)]
pub struct IconOptions {
    pub mode: ShimMode,
}

/// What the icon pass did.
#[derive(Debug, Clone, Serialize)]
pub struct IconSummary {
    /// `ICON:` references across all export files
    pub references: usize,

    pub placeholders: Vec<NormalizedTarget>,

    /// Missing images with no placeholder format
    pub missing: Vec<NormalizedTarget>,

    pub dry_run: bool,

    /// Report location; `None` on a dry run
    pub report_path: Option<PathBuf>,
}

/// Write placeholders for every missing icon target and the icon report.
///
/// A dry run decides the same placeholders and writes nothing.
pub fn generate_icon_placeholders(layout: &RepoLayout, opts: &IconOptions) -> Result<IconSummary> {
    let snapshot = discover(layout)?;
    let mut ctx = ResolveContext::new(layout, &snapshot, opts.mode, layout.icon_report_rel());
    let exports = scan_icon_exports(layout, &snapshot, &LineDirectiveExtractor, &mut ctx)?;

    let report_path = match opts.mode {
        ShimMode::Write => {
            let path = layout.abs(&layout.icon_report_rel());
            write_string(&path, &render_icon_report(layout, &exports, &ctx))
                .context("failed to write icon report")?;
            tracing::info!("Wrote {}", path.display());
            Some(path)
        }
        ShimMode::DryRun => None,
    };

    let missing = ctx
        .missing_icons()
        .into_iter()
        .filter(|t| ctx.icon_outcome(t) == Some(IconOutcome::Missing))
        .cloned()
        .collect();

    Ok(IconSummary {
        references: exports.iter().map(|e| e.refs.len()).sum(),
        placeholders: ctx.placeholder_icons().into_iter().cloned().collect(),
        missing,
        dry_run: opts.mode == ShimMode::DryRun,
        report_path,
    })
}
