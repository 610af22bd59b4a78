//! Repository root layout check.
//!
//! Verifies that the expected top-level folders exist and detects the
//! common "nested repository" symptom: everything sits one folder too deep,
//! inside a wrapper directory left over from unpacking an archive.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::util::diagnostic::{suggestions, Diagnostic, MissingRootsError, NestedLayoutError};

/// Folders expected at the root of a toolbar suite repository.
pub const DEFAULT_REQUIRED_ROOTS: &[&str] = &["Scripts", "Toolbars", "Menus", "MenuSets"];

/// Result of a layout check.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutReport {
    /// Checked root
    pub root: PathBuf,

    /// Required folders that exist
    pub present: Vec<String>,

    /// Required folders that do not exist
    pub missing: Vec<String>,

    /// Subfolders that hold every missing folder
    pub nested: Vec<String>,
}

impl LayoutReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn is_nested(&self) -> bool {
        !self.missing.is_empty() && !self.nested.is_empty()
    }

    /// The problem as a miette diagnostic, if there is one.
    pub fn to_error(&self) -> Option<Box<dyn miette::Diagnostic + Send + Sync>> {
        if self.is_ok() {
            return None;
        }
        if let Some(first) = self.nested.first() {
            return Some(Box::new(NestedLayoutError {
                nested: first.clone(),
                found: self.missing.clone(),
            }));
        }
        Some(Box::new(MissingRootsError {
            missing: self.missing.clone(),
            suggestion: Some(suggestions::WRONG_ROOT.to_string()),
        }))
    }

    /// Human-readable diagnostic with suggestions.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        if self.is_ok() {
            return None;
        }

        let diag = if self.is_nested() {
            let mut diag = Diagnostic::error("repository layout looks nested (one folder too deep)")
                .with_location(self.root.clone())
                .with_context("index source paths must exist at the repository root");
            for dir in &self.nested {
                diag = diag.with_context(format!("candidate nested folder: {}/", dir));
            }
            diag.with_suggestion(
                "Move the contents of that folder up to the repository root, then delete the wrapper folder",
            )
            .with_suggestion(format!("Or run with `--root {}`", self.nested[0]))
        } else {
            Diagnostic::error(format!(
                "missing expected root folders: {}",
                self.missing.join(", ")
            ))
            .with_location(self.root.clone())
            .with_suggestion(suggestions::WRONG_ROOT)
        };

        Some(diag)
    }
}

/// Check that `required` folders exist under `root`.
pub fn check_layout(root: &Path, required: &[String]) -> Result<LayoutReport> {
    if !root.is_dir() {
        anyhow::bail!("repository root is not a directory: {}", root.display());
    }

    let (present, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|name| root.join(name).is_dir());

    let nested = if missing.is_empty() {
        Vec::new()
    } else {
        nested_candidates(root, &missing)?
    };

    tracing::debug!(
        "Layout check: {} present, {} missing, {} nested candidates",
        present.len(),
        missing.len(),
        nested.len()
    );

    Ok(LayoutReport {
        root: root.to_path_buf(),
        present,
        missing,
        nested,
    })
}

/// Non-hidden subfolders of `root` that contain every folder in `missing`.
fn nested_candidates(root: &Path, missing: &[String]) -> Result<Vec<String>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("failed to read directory: {}", root.display()))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read directory: {}", root.display()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !path.is_dir() {
            continue;
        }
        if missing.iter().all(|m| path.join(m).is_dir()) {
            found.push(name);
        }
    }
    found.sort();
    Ok(found)
}

/// Render a report for the terminal.
pub fn format_report(report: &LayoutReport) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    for name in &report.present {
        let _ = writeln!(output, "  [OK] {}/", name);
    }
    for name in &report.missing {
        let _ = writeln!(output, "  [!!] {}/", name);
    }
    if report.is_ok() {
        output.push_str("Repository root layout OK.\n");
    }
    output
}
