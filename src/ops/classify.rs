//! Implementation of `menupack classify`.

use anyhow::Result;
use serde::Serialize;

use crate::classify::ClassifierRegistry;
use crate::core::RepoLayout;
use crate::discovery::discover;

/// One labeled core resource.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedFile {
    pub path: String,
    pub label: String,
    pub confidence: f32,
}

/// Label every core resource (optionally only those under `under`) with
/// the selected strategy.
pub fn classify_assets(
    layout: &RepoLayout,
    registry: &ClassifierRegistry,
    strategy: Option<&str>,
    under: Option<&str>,
) -> Result<Vec<ClassifiedFile>> {
    let classifier = registry.select(strategy)?;
    let snapshot = discover(layout)?;
    let under = under.map(|d| d.trim_matches('/').to_string());

    tracing::debug!("Classifying with `{}`", classifier.id());

    let files = snapshot
        .core_resources()
        .filter(|p| under.as_deref().is_none_or(|dir| crate::discovery::is_under(p, dir)))
        .map(|path| {
            let classified = classifier.classify(&layout.abs(path));
            ClassifiedFile {
                path: path.to_string(),
                label: classified.label,
                confidence: classified.confidence,
            }
        })
        .collect();

    Ok(files)
}
