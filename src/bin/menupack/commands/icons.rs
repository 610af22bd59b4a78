//! `menupack icons` command

use std::path::Path;

use anyhow::Result;

use crate::cli::IconsArgs;
use crate::commands::load_layout;
use menupack::ops::{generate_icon_placeholders, IconOptions};
use menupack::resolver::ShimMode;

pub fn execute(args: IconsArgs, root: &Path) -> Result<()> {
    let (layout, _) = load_layout(root, None)?;

    let opts = IconOptions {
        mode: if args.dry_run {
            ShimMode::DryRun
        } else {
            ShimMode::Write
        },
    };

    let summary = generate_icon_placeholders(&layout, &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let verb = if summary.dry_run { "planned" } else { "created" };
    println!("Placeholders {}: {}", verb, summary.placeholders.len());
    for icon in &summary.missing {
        tracing::warn!("No placeholder format for {}", icon);
    }
    if let Some(path) = &summary.report_path {
        eprintln!("   Finished {}", path.display());
    }

    Ok(())
}
