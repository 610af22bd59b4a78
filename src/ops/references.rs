//! Implementation of `menupack refs`: a read-only preview of what every
//! export file references and how each target would resolve.

use std::fmt;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::core::{Classification, DirectiveKind, NormalizedTarget, RepoLayout};
use crate::discovery::discover;
use crate::extract::LineDirectiveExtractor;
use crate::ops::scan::{scan_export, scan_exports};
use crate::resolver::{IconOutcome, ResolveContext, ShimMode, TargetOutcome};

/// How a reference would fare in a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum RefStatus {
    Resolved,
    Shim { real: String },
    Unresolved { candidates: usize },
    Icon,
    IconPlaceholder,
    IconMissing,
    /// Script target without a file name, or icon target that is not an image
    Ignored,
    Duplicate,
}

impl fmt::Display for RefStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefStatus::Resolved => write!(f, "resolved"),
            RefStatus::Shim { real } => write!(f, "shim -> {}", real),
            RefStatus::Unresolved { candidates } => {
                write!(f, "unresolved ({} candidates)", candidates)
            }
            RefStatus::Icon => write!(f, "icon"),
            RefStatus::IconPlaceholder => write!(f, "icon placeholder"),
            RefStatus::IconMissing => write!(f, "icon missing"),
            RefStatus::Ignored => write!(f, "ignored"),
            RefStatus::Duplicate => write!(f, "duplicate"),
        }
    }
}

/// One reference of one export file.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceRow {
    pub origin: String,
    pub line: usize,
    pub kind: DirectiveKind,
    pub raw: String,
    pub target: Option<NormalizedTarget>,
    #[serde(flatten)]
    pub status: RefStatus,
}

/// List references of all export files, or of one (repository-relative path).
///
/// Nothing is written.
pub fn list_references(layout: &RepoLayout, file: Option<&str>) -> Result<Vec<ReferenceRow>> {
    let snapshot = discover(layout)?;
    let mut ctx = ResolveContext::new(layout, &snapshot, ShimMode::DryRun, layout.audit_report_rel());
    let extractor = LineDirectiveExtractor;

    let scans = match file {
        Some(rel) => {
            let rel = rel.replace('\\', "/");
            if snapshot.classification_of(&rel) != Some(Classification::ToolbarExport) {
                bail!("not a toolbar export file: {}", rel);
            }
            vec![scan_export(layout, &rel, &extractor, &mut ctx)?]
        }
        None => scan_exports(layout, &snapshot, &extractor, &mut ctx)?,
    };

    let mut rows = Vec::new();
    for scan in scans {
        for scanned in scan.refs {
            let status = match (&scanned.target, scanned.repeat) {
                (_, true) => RefStatus::Duplicate,
                (None, false) => RefStatus::Ignored,
                (Some(t), false) => status_of(&ctx, scanned.reference.kind, t),
            };
            rows.push(ReferenceRow {
                origin: scanned.reference.origin,
                line: scanned.reference.line,
                kind: scanned.reference.kind,
                raw: scanned.reference.raw,
                target: scanned.target,
                status,
            });
        }
    }

    Ok(rows)
}

fn status_of(ctx: &ResolveContext<'_>, kind: DirectiveKind, target: &NormalizedTarget) -> RefStatus {
    match kind {
        DirectiveKind::Icon => match ctx.icon_outcome(target) {
            Some(IconOutcome::Found) => RefStatus::Icon,
            Some(IconOutcome::Placeholder) => RefStatus::IconPlaceholder,
            _ => RefStatus::IconMissing,
        },
        DirectiveKind::Script => match ctx.outcome(target) {
            Some(TargetOutcome::Forwarded { real }) => RefStatus::Shim { real: real.clone() },
            Some(TargetOutcome::Unresolved { candidates }) => RefStatus::Unresolved {
                candidates: candidates.len(),
            },
            _ => RefStatus::Resolved,
        },
    }
}
