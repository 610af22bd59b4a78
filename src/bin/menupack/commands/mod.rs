//! Command implementations

pub mod build;
pub mod check;
pub mod classify;
pub mod completions;
pub mod icons;
pub mod refs;
pub mod shims;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use menupack::core::RepoLayout;
use menupack::util::config::{global_config_path, load_config, project_config_path, Config};

/// Resolve the repository root and load its layout.
///
/// `raw_base` is the CLI/environment override for the base URL.
pub fn load_layout(root: &Path, raw_base: Option<&str>) -> Result<(RepoLayout, Config)> {
    let root = canonical_root(root)?;
    let config = load_config(global_config_path().as_deref(), &project_config_path(&root));
    let layout = RepoLayout::from_config(&root, &config, raw_base)
        .with_context(|| format!("invalid configuration for {}", root.display()))?;
    tracing::debug!("Repository root: {}", layout.root().display());
    Ok((layout, config))
}

pub fn canonical_root(root: &Path) -> Result<PathBuf> {
    root.canonicalize()
        .with_context(|| format!("repository root not found: {}", root.display()))
}
