//! `menupack classify` command

use std::path::Path;

use anyhow::Result;

use crate::cli::ClassifyArgs;
use crate::commands::load_layout;
use menupack::classify::ClassifierRegistry;
use menupack::ops::classify_assets;

pub fn execute(args: ClassifyArgs, root: &Path) -> Result<()> {
    let registry = ClassifierRegistry::new();

    if args.list {
        for classifier in registry.all() {
            println!("{:<12} {}", classifier.id(), classifier.description());
        }
        return Ok(());
    }

    let (layout, config) = load_layout(root, None)?;
    let strategy = args.strategy.as_deref().or(config.classify.strategy.as_deref());

    let files = classify_assets(&layout, &registry, strategy, args.under.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    for file in &files {
        println!("{:<16} {:.2}  {}", file.label, file.confidence, file.path);
    }

    Ok(())
}
