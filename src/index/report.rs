//! Markdown reports.
//!
//! The audit report lists every reference of every export file with its
//! normalized target and outcome. The unresolved report lists only the
//! targets that received a diagnostic shim. The icon report lists the
//! placeholder icons and every toolbar → icon reference.

use std::fmt::Write as _;

use crate::core::{DirectiveKind, ExportScan, RepoLayout, ScannedRef};
use crate::resolver::{IconOutcome, ResolveContext, ShimMode, TargetOutcome, UnresolvedTarget};

/// Candidates listed per unresolved target before truncating.
const MAX_LISTED_CANDIDATES: usize = 30;

/// Render the toolbar audit report.
pub fn render_audit_report(
    layout: &RepoLayout,
    exports: &[ExportScan],
    ctx: &ResolveContext<'_>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Toolbar script targets ({})", layout.index_name);
    out.push('\n');
    if ctx.mode() == ShimMode::DryRun {
        out.push_str("_Dry run: no shims were written._\n\n");
    }

    let mut references = 0;
    for scan in exports {
        references += scan.refs.len();
        let _ = writeln!(
            out,
            "## {} ({})\n",
            scan.path,
            layout.family(scan.family).name
        );
        if scan.refs.is_empty() {
            out.push_str("_No directives._\n\n");
            continue;
        }
        out.push_str("| Line | Reference | Target | Outcome |\n");
        out.push_str("|---:|---|---|---|\n");
        for scanned in &scan.refs {
            let target = scanned
                .target
                .as_ref()
                .map(|t| format!("`{}`", cell(t.as_str())))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "| {} | `{}` | {} | {} |",
                scanned.reference.line,
                cell(&scanned.reference.to_string()),
                target,
                outcome_label(scanned, ctx)
            );
        }
        out.push('\n');
    }

    let unresolved = ctx.unresolved();
    out.push_str("## Unresolved script targets\n\n");
    if unresolved.is_empty() {
        out.push_str("_None._\n\n");
    }
    for item in &unresolved {
        write_unresolved_entry(&mut out, "###", item);
    }

    let missing_icons = ctx.missing_icons();
    let placeholders = ctx.placeholder_icons().len();
    let verb = match ctx.mode() {
        ShimMode::Write => "written",
        ShimMode::DryRun => "planned",
    };
    out.push_str("## Missing icons\n\n");
    if missing_icons.is_empty() {
        out.push_str("_None._\n");
    }
    for icon in &missing_icons {
        match ctx.icon_outcome(icon) {
            Some(IconOutcome::Placeholder) => {
                let _ = writeln!(out, "- `{}` (placeholder {})", icon, verb);
            }
            _ => {
                let _ = writeln!(out, "- `{}`", icon);
            }
        }
    }
    out.push('\n');

    let forwarding = ctx.shims().iter().filter(|s| s.is_forwarding()).count();
    let diagnostic = ctx.shims().len() - forwarding;

    out.push_str("## Totals\n\n");
    let _ = writeln!(out, "- Export files: {}", exports.len());
    let _ = writeln!(out, "- References: {}", references);
    let _ = writeln!(
        out,
        "- Shims {}: {} ({} forwarding, {} diagnostic)",
        verb,
        ctx.shims().len(),
        forwarding,
        diagnostic
    );
    let _ = writeln!(out, "- Total unresolved: **{}**", unresolved.len());
    let _ = writeln!(out, "- Missing icons: {}", missing_icons.len());
    let _ = writeln!(out, "- Placeholder icons {}: {}", verb, placeholders);

    out
}

/// Render the icon resolution report.
pub fn render_icon_report(
    layout: &RepoLayout,
    exports: &[ExportScan],
    ctx: &ResolveContext<'_>,
) -> String {
    let placeholders = ctx.placeholder_icons();
    let verb = match ctx.mode() {
        ShimMode::Write => "created",
        ShimMode::DryRun => "planned",
    };

    let mut out = String::new();
    out.push_str("# Icon resolution report\n\n");
    let _ = writeln!(
        out,
        "Placeholder icons {} in `{}/`: **{}**\n",
        verb,
        layout.icon_dir,
        placeholders.len()
    );
    for icon in &placeholders {
        let _ = writeln!(out, "- `{}`", icon.file_name());
    }

    let without_format: Vec<_> = ctx
        .missing_icons()
        .into_iter()
        .filter(|t| ctx.icon_outcome(t) == Some(IconOutcome::Missing))
        .collect();
    if !without_format.is_empty() {
        out.push_str("\n## Missing icons without a placeholder\n\n");
        for icon in &without_format {
            let _ = writeln!(out, "- `{}`", icon);
        }
    }

    out.push_str("\n## References (toolbar -> icon)\n\n");
    for scan in exports {
        for scanned in &scan.refs {
            if scanned.reference.kind != DirectiveKind::Icon {
                continue;
            }
            if let Some(target) = &scanned.target {
                let _ = writeln!(out, "- `{}` -> `{}`", scan.path, target.file_name());
            }
        }
    }

    out
}

/// Render the report written by the standalone shim pass.
pub fn render_unresolved_report(unresolved: &[UnresolvedTarget]) -> String {
    let mut out = String::new();
    out.push_str("# Unresolved script targets referenced by toolbars\n\n");
    let _ = writeln!(out, "Total unresolved: **{}**\n", unresolved.len());
    for item in unresolved {
        write_unresolved_entry(&mut out, "##", item);
    }
    out
}

fn write_unresolved_entry(out: &mut String, heading: &str, item: &UnresolvedTarget) {
    let _ = writeln!(out, "{} {}", heading, item.target);
    let _ = writeln!(out, "- Referenced in: `{}`", item.referenced_in);
    let _ = writeln!(out, "- Candidates found: {}", item.candidates.len());
    for candidate in item.candidates.iter().take(MAX_LISTED_CANDIDATES) {
        let _ = writeln!(out, "  - `{}`", candidate);
    }
    if item.candidates.len() > MAX_LISTED_CANDIDATES {
        let _ = writeln!(
            out,
            "  - ... ({} more)",
            item.candidates.len() - MAX_LISTED_CANDIDATES
        );
    }
    out.push('\n');
}

fn outcome_label(scanned: &ScannedRef, ctx: &ResolveContext<'_>) -> String {
    if scanned.repeat {
        return "duplicate".to_string();
    }
    let Some(target) = &scanned.target else {
        return match scanned.reference.kind {
            DirectiveKind::Script => "ignored (no file name)".to_string(),
            DirectiveKind::Icon => "ignored (not an image)".to_string(),
        };
    };

    match scanned.reference.kind {
        DirectiveKind::Icon => match ctx.icon_outcome(target) {
            Some(IconOutcome::Found) => "icon".to_string(),
            Some(IconOutcome::Placeholder) => "icon placeholder".to_string(),
            _ => "icon missing".to_string(),
        },
        DirectiveKind::Script => match ctx.outcome(target) {
            Some(TargetOutcome::Resolved) => "resolved".to_string(),
            Some(TargetOutcome::Forwarded { real }) => format!("shim → `{}`", cell(real)),
            Some(TargetOutcome::Unresolved { candidates }) => {
                format!("unresolved ({} candidates)", candidates.len())
            }
            None => "-".to_string(),
        },
    }
}

/// Make text safe inside a markdown table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}
