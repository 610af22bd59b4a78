//! `menupack build` command

use std::path::Path;

use anyhow::Result;

use crate::cli::BuildArgs;
use crate::commands::load_layout;
use menupack::ops::{build_index, BuildOptions};
use menupack::resolver::ShimMode;

pub fn execute(args: BuildArgs, root: &Path) -> Result<()> {
    let (layout, _) = load_layout(root, args.raw_base.as_deref())?;

    let opts = BuildOptions {
        shims: if args.no_shims {
            ShimMode::DryRun
        } else {
            ShimMode::Write
        },
        output: args.output,
        report: args.report,
    };

    let summary = build_index(&layout, &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let verb = if summary.dry_run { "planned" } else { "written" };
    eprintln!(
        "    Indexed {} packages in {} categories ({} export files, {} references)",
        summary.packages, summary.categories, summary.export_files, summary.references
    );
    eprintln!(
        "      Shims {} {} forwarding, {} diagnostic",
        verb, summary.forwarding_shims, summary.diagnostic_shims
    );
    if summary.placeholder_icons > 0 {
        eprintln!("      Icons {} {} placeholders", verb, summary.placeholder_icons);
    }
    if summary.unresolved > 0 || summary.missing_icons > 0 {
        eprintln!(
            "    Warning {} unresolved script targets, {} missing icons (see {})",
            summary.unresolved,
            summary.missing_icons,
            summary.report_path.display()
        );
    }
    eprintln!(
        "   Finished {} (sha256 {})",
        summary.index_path.display(),
        summary.index_sha256
    );

    Ok(())
}
