//! `menupack check` command

use std::path::Path;

use anyhow::Result;

use crate::cli::CheckArgs;
use crate::commands::canonical_root;
use menupack::ops::{check_layout, format_report, DEFAULT_REQUIRED_ROOTS};
use menupack::util::diagnostic::emit;

pub fn execute(args: CheckArgs, root: &Path, color: bool) -> Result<()> {
    let root = canonical_root(root)?;

    let required = if args.required.is_empty() {
        DEFAULT_REQUIRED_ROOTS.iter().map(|s| s.to_string()).collect()
    } else {
        args.required
    };

    let report = check_layout(&root, &required)?;
    print!("{}", format_report(&report));

    if let Some(diag) = report.to_diagnostic() {
        emit(&diag, color);
        if let Some(err) = report.to_error() {
            eprintln!("{:?}", miette::Report::new_boxed(err));
        }
        std::process::exit(2);
    }

    Ok(())
}
