//! `menupack shims` command

use std::path::Path;

use anyhow::Result;

use crate::cli::ShimsArgs;
use crate::commands::load_layout;
use menupack::ops::{generate_shims, ShimOptions};
use menupack::resolver::ShimMode;

pub fn execute(args: ShimsArgs, root: &Path) -> Result<()> {
    let (layout, _) = load_layout(root, None)?;

    let opts = ShimOptions {
        mode: if args.dry_run {
            ShimMode::DryRun
        } else {
            ShimMode::Write
        },
    };

    let summary = generate_shims(&layout, &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Shims created: {}", summary.total());
    println!("Unresolved targets: {}", summary.unresolved.len());
    if let Some(path) = &summary.report_path {
        eprintln!("   Finished {}", path.display());
    }

    Ok(())
}
