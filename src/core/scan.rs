//! Per-export-file scan results.
//!
//! An `ExportScan` records what extraction and normalization produced for
//! one export file. Both the package builder and the audit report read it.

use serde::Serialize;

use crate::core::{FamilyKind, NormalizedTarget, Reference};

/// One extracted reference and where it points.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedRef {
    pub reference: Reference,

    /// Normalized target; `None` for script targets without a file name and
    /// icon targets that are not images
    pub target: Option<NormalizedTarget>,

    /// An earlier line of the same file already named this target
    pub repeat: bool,
}

/// Scan result for one export file.
#[derive(Debug, Clone, Serialize)]
pub struct ExportScan {
    /// Repository-relative path of the export file
    pub path: String,

    /// Family the export file is categorized under
    pub family: FamilyKind,

    /// References in file order, duplicates included
    pub refs: Vec<ScannedRef>,
}

impl ExportScan {
    /// Distinct targets in first-occurrence order.
    pub fn targets(&self) -> impl Iterator<Item = &NormalizedTarget> + '_ {
        self.refs
            .iter()
            .filter(|r| !r.repeat)
            .filter_map(|r| r.target.as_ref())
    }
}
