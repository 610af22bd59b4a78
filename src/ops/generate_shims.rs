//! Implementation of `menupack shims`.
//!
//! Runs discovery and resolution only: shims are written and the
//! unresolved-targets report is produced, but no index.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::RepoLayout;
use crate::discovery::discover;
use crate::extract::LineDirectiveExtractor;
use crate::index::render_unresolved_report;
use crate::ops::scan::scan_exports;
use crate::resolver::{ResolveContext, ShimMode, UnresolvedTarget};
use crate::util::fs::write_string;

/// Options for the shim pass.
#[derive(Debug, Clone, Default)]
pub struct ShimOptions {
    pub mode: ShimMode,
}

/// What the shim pass did.
#[derive(Debug, Clone, Serialize)]
pub struct ShimSummary {
    pub forwarding: usize,
    pub diagnostic: usize,

    /// Report location; `None` on a dry run
    pub report_path: Option<PathBuf>,

    pub unresolved: Vec<UnresolvedTarget>,
}

impl ShimSummary {
    pub fn total(&self) -> usize {
        self.forwarding + self.diagnostic
    }
}

/// Write shims for every missing script target and the unresolved report.
///
/// A dry run decides the same shims and writes nothing.
pub fn generate_shims(layout: &RepoLayout, opts: &ShimOptions) -> Result<ShimSummary> {
    let snapshot = discover(layout)?;
    let report_rel = layout.unresolved_report_rel();

    let mut ctx = ResolveContext::new(layout, &snapshot, opts.mode, report_rel.clone());
    scan_exports(layout, &snapshot, &LineDirectiveExtractor, &mut ctx)?;

    let unresolved = ctx.unresolved();
    let forwarding = ctx.shims().iter().filter(|s| s.is_forwarding()).count();

    let report_path = match opts.mode {
        ShimMode::Write => {
            let path = layout.abs(&report_rel);
            write_string(&path, &render_unresolved_report(&unresolved))
                .context("failed to write unresolved report")?;
            tracing::info!("Wrote {}", path.display());
            Some(path)
        }
        ShimMode::DryRun => None,
    };

    Ok(ShimSummary {
        forwarding,
        diagnostic: ctx.shims().len() - forwarding,
        report_path,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RepoFixture;

    fn fixture() -> RepoFixture {
        RepoFixture::new()
            .file("Scripts/A/Dup.lua", "-- a")
            .file("Scripts/B/Dup.lua", "-- b")
            .file("Scripts/Other/IFLS_Fader.lua", "-- real")
            .file(
                "Menus/Main.ReaperMenu",
                "SCRIPT: Dup.lua\nSCRIPT: IFLS_Fader.lua\n",
            )
    }

    #[test]
    fn test_generate_shims() {
        let fx = fixture();
        let layout = fx.layout();

        let summary = generate_shims(&layout, &ShimOptions::default()).unwrap();

        assert_eq!(summary.total(), 2);
        assert_eq!(summary.forwarding, 1);
        assert_eq!(summary.unresolved.len(), 1);
        assert_eq!(
            summary.unresolved[0].candidates,
            vec!["Scripts/A/Dup.lua", "Scripts/B/Dup.lua"]
        );

        let shim = fx.read("Scripts/IfeelLikeSnow/DF95/Dup.lua");
        assert!(shim.contains("--   - Scripts/A/Dup.lua"));
        assert!(shim.contains("See Reports/unresolved_script_targets.md"));

        let report = fx.read("Reports/unresolved_script_targets.md");
        assert!(report.contains("Total unresolved: **1**"));
        assert!(report.contains("- Referenced in: `Menus/Main.ReaperMenu`"));
        assert!(!fx.exists("index.xml"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fx = fixture();
        let layout = fx.layout();
        let opts = ShimOptions {
            mode: ShimMode::DryRun,
        };

        let summary = generate_shims(&layout, &opts).unwrap();

        assert_eq!(summary.total(), 2);
        assert!(summary.report_path.is_none());
        assert!(!fx.exists("Scripts/IfeelLikeSnow/DF95/Dup.lua"));
        assert!(!fx.exists("Reports/unresolved_script_targets.md"));
    }
}
