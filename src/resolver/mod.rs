//! Reference resolution and shim generation.
//!
//! The resolver owns an explicit per-run [`ResolveContext`]: the set of
//! targets already handled, the shims and placeholder icons written and the
//! unresolved targets. Nothing outlives the run.

pub mod candidates;
pub mod errors;
pub mod normalize;
pub mod placeholder;
pub mod shim;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::core::{NormalizedTarget, RepoLayout};
use crate::discovery::Snapshot;

pub use candidates::find_candidates;
pub use errors::ResolveError;
pub use normalize::{normalize_icon, normalize_script, route_family};
pub use placeholder::{is_placeholder_icon, placeholder_bytes};
pub use shim::{is_generated_shim, Shim, ShimKind, SHIM_MARKER};

/// Result of checking a normalized target against the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target exists on disk.
    Resolved(NormalizedTarget),
    /// The target is missing; these files share its base name.
    AmbiguousOrMissing { candidates: Vec<String> },
}

/// What the run did with a script target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum TargetOutcome {
    /// The target exists as a real file.
    Resolved,
    /// A forwarding shim points at the single candidate.
    Forwarded { real: String },
    /// A diagnostic shim was placed; zero or several candidates.
    Unresolved { candidates: Vec<String> },
}

impl TargetOutcome {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, TargetOutcome::Unresolved { .. })
    }
}

/// What the run did with an icon target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconOutcome {
    /// A real image exists.
    Found,
    /// A placeholder image stands in (written, or planned on a dry run).
    Placeholder,
    /// No image, and no placeholder can be made for it.
    Missing,
}

/// A target that could not be resolved uniquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedTarget {
    pub target: NormalizedTarget,
    pub referenced_in: String,
    pub candidates: Vec<String>,
}

/// Whether shims and placeholder icons are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShimMode {
    /// Write into the repository.
    #[default]
    Write,
    /// Decide everything but write nothing.
    DryRun,
}

/// State of one resolution pass.
pub struct ResolveContext<'a> {
    layout: &'a RepoLayout,
    snapshot: &'a Snapshot,
    mode: ShimMode,

    /// Report the diagnostic shims point users to
    report_rel: String,

    /// Seen script targets and their outcome
    scripts: BTreeMap<NormalizedTarget, TargetOutcome>,

    /// Seen icon targets and their outcome
    icons: BTreeMap<NormalizedTarget, IconOutcome>,

    /// Shims in the order they were decided
    shims: Vec<Shim>,

    /// Targets without a unique real file, in first-seen order
    unresolved: Vec<UnresolvedTarget>,

    /// Files written during this run
    written: BTreeSet<NormalizedTarget>,
}

impl<'a> ResolveContext<'a> {
    /// Create a context over a frozen discovery snapshot.
    pub fn new(
        layout: &'a RepoLayout,
        snapshot: &'a Snapshot,
        mode: ShimMode,
        report_rel: impl Into<String>,
    ) -> Self {
        ResolveContext {
            layout,
            snapshot,
            mode,
            report_rel: report_rel.into(),
            scripts: BTreeMap::new(),
            icons: BTreeMap::new(),
            shims: Vec::new(),
            unresolved: Vec::new(),
            written: BTreeSet::new(),
        }
    }

    /// Check a target against the tree without recording anything.
    ///
    /// A file carrying the shim marker does not count as a real resolution.
    pub fn check(&self, target: &NormalizedTarget) -> Resolution {
        let path = self.layout.abs(target.as_str());
        if path.is_file() && !is_generated_shim(&path) {
            Resolution::Resolved(target.clone())
        } else {
            Resolution::AmbiguousOrMissing {
                candidates: find_candidates(self.layout, self.snapshot, target),
            }
        }
    }

    /// Resolve a script target, writing a shim when it does not exist.
    ///
    /// Targets seen earlier in the run return their recorded outcome.
    pub fn resolve_script(
        &mut self,
        target: &NormalizedTarget,
        referenced_in: &str,
    ) -> Result<&TargetOutcome, ResolveError> {
        if !self.scripts.contains_key(target) {
            let outcome = self.resolve_fresh(target, referenced_in)?;
            self.scripts.insert(target.clone(), outcome);
        }
        Ok(&self.scripts[target])
    }

    fn resolve_fresh(
        &mut self,
        target: &NormalizedTarget,
        referenced_in: &str,
    ) -> Result<TargetOutcome, ResolveError> {
        let candidates = match self.check(target) {
            Resolution::Resolved(_) => {
                tracing::debug!("Resolved {}", target);
                return Ok(TargetOutcome::Resolved);
            }
            Resolution::AmbiguousOrMissing { candidates } => candidates,
        };

        // A directory at the target path cannot hold a shim.
        if self.layout.abs(target.as_str()).is_dir() {
            tracing::warn!(
                "Script target {} is a directory (referenced in {}), no shim written",
                target,
                referenced_in
            );
            self.record_unresolved(target, referenced_in, &candidates);
            return Ok(TargetOutcome::Unresolved { candidates });
        }

        let shim = Shim::for_candidates(target.clone(), referenced_in, candidates);

        if self.mode == ShimMode::Write {
            shim.write(self.layout, &self.report_rel)?;
            self.written.insert(target.clone());
        }

        let outcome = match &shim.kind {
            ShimKind::Forwarding { real } => {
                tracing::debug!("Forwarding shim {} -> {}", target, real);
                TargetOutcome::Forwarded { real: real.clone() }
            }
            ShimKind::Diagnostic => {
                tracing::warn!(
                    "Unresolved script target {} ({} candidates, referenced in {})",
                    target,
                    shim.candidates.len(),
                    referenced_in
                );
                self.record_unresolved(target, referenced_in, &shim.candidates);
                TargetOutcome::Unresolved {
                    candidates: shim.candidates.clone(),
                }
            }
        };

        self.shims.push(shim);
        Ok(outcome)
    }

    fn record_unresolved(
        &mut self,
        target: &NormalizedTarget,
        referenced_in: &str,
        candidates: &[String],
    ) {
        self.unresolved.push(UnresolvedTarget {
            target: target.clone(),
            referenced_in: referenced_in.to_string(),
            candidates: candidates.to_vec(),
        });
    }

    /// Resolve an icon target, writing a placeholder when it does not exist.
    ///
    /// An existing placeholder is regenerated rather than treated as found.
    /// Outcomes are cached per run.
    pub fn resolve_icon(&mut self, target: &NormalizedTarget) -> Result<IconOutcome, ResolveError> {
        if let Some(outcome) = self.icons.get(target) {
            return Ok(*outcome);
        }

        let path = self.layout.abs(target.as_str());
        let outcome = if path.is_file() && !is_placeholder_icon(&path) {
            IconOutcome::Found
        } else if path.is_dir() {
            tracing::warn!("Icon target {} is a directory", target);
            IconOutcome::Missing
        } else if let Some(bytes) = placeholder_bytes(target.file_name()) {
            if self.mode == ShimMode::Write {
                placeholder::write_placeholder(self.layout, target, &bytes)?;
                self.written.insert(target.clone());
            }
            tracing::debug!("Placeholder icon {}", target);
            IconOutcome::Placeholder
        } else {
            tracing::warn!("Missing icon {} (no placeholder format)", target);
            IconOutcome::Missing
        };

        self.icons.insert(target.clone(), outcome);
        Ok(outcome)
    }

    /// Whether a target seen in this run is a file on disk after resolution.
    ///
    /// On a dry run this includes shims and placeholders left by earlier runs.
    pub fn exists_after(&self, target: &NormalizedTarget) -> bool {
        let seen = self.scripts.contains_key(target) || self.icons.contains_key(target);
        seen && self.layout.abs(target.as_str()).is_file()
    }

    /// Outcome of an icon target, if it was seen in this run.
    pub fn icon_outcome(&self, target: &NormalizedTarget) -> Option<IconOutcome> {
        self.icons.get(target).copied()
    }

    /// Outcome of a script target, if it was resolved in this run.
    pub fn outcome(&self, target: &NormalizedTarget) -> Option<&TargetOutcome> {
        self.scripts.get(target)
    }

    /// Shims in decision order.
    pub fn shims(&self) -> &[Shim] {
        &self.shims
    }

    /// Paths of shims and placeholders written during this run, sorted.
    pub fn written_files(&self) -> Vec<&str> {
        self.written.iter().map(NormalizedTarget::as_str).collect()
    }

    /// Targets without a unique real file, in first-seen order.
    pub fn unresolved(&self) -> Vec<UnresolvedTarget> {
        self.unresolved.clone()
    }

    /// Icon targets without a real image, sorted. Placeholders included.
    pub fn missing_icons(&self) -> Vec<&NormalizedTarget> {
        self.icons
            .iter()
            .filter(|(_, outcome)| **outcome != IconOutcome::Found)
            .map(|(t, _)| t)
            .collect()
    }

    /// Icon targets that got a placeholder, sorted.
    pub fn placeholder_icons(&self) -> Vec<&NormalizedTarget> {
        self.icons
            .iter()
            .filter(|(_, outcome)| **outcome == IconOutcome::Placeholder)
            .map(|(t, _)| t)
            .collect()
    }

    pub fn mode(&self) -> ShimMode {
        self.mode
    }
}
