//! `menupack refs` command

use std::path::Path;

use anyhow::Result;

use crate::cli::RefsArgs;
use crate::commands::load_layout;
use menupack::ops::list_references;

pub fn execute(args: RefsArgs, root: &Path) -> Result<()> {
    let (layout, _) = load_layout(root, None)?;
    let rows = list_references(&layout, args.file.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let mut current: Option<&str> = None;
    for row in &rows {
        if current != Some(row.origin.as_str()) {
            println!("{}", row.origin);
            current = Some(row.origin.as_str());
        }
        let target = row.target.as_ref().map(|t| t.as_str()).unwrap_or("-");
        println!(
            "  {:>4}  {}: {}  ->  {}  [{}]",
            row.line, row.kind, row.raw, target, row.status
        );
    }

    if rows.is_empty() {
        eprintln!("No references found.");
    }

    Ok(())
}
