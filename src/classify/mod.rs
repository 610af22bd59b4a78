//! Pluggable asset classification.
//!
//! Classification strategies sit behind the [`AssetClassifier`] trait and are
//! selected by id from a [`ClassifierRegistry`]. The rest of the crate never
//! depends on a concrete strategy.

pub mod extension;
pub mod registry;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

pub use extension::{ExtensionClassifier, NullClassifier};
pub use registry::ClassifierRegistry;

/// Label assigned to paths a strategy has no opinion on.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Result of classifying one path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classified {
    pub label: String,

    /// Confidence in `[0.0, 1.0]`
    pub confidence: f32,
}

impl Classified {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Classified {
            label: label.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn unknown() -> Self {
        Classified::new(UNKNOWN_LABEL, 0.0)
    }
}

/// A classification strategy.
pub trait AssetClassifier {
    /// Stable identifier used in configuration.
    fn id(&self) -> &str;

    /// Short human-readable description.
    fn description(&self) -> &str;

    /// Classify a repository path. Must not fail.
    fn classify(&self, path: &Path) -> Classified;
}

/// Errors selecting a strategy.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("unknown classifier strategy `{id}` (available: {})", .available.join(", "))]
    UnknownStrategy { id: String, available: Vec<String> },
}

impl ClassifyError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ClassifyError::UnknownStrategy { id, available } => {
                Diagnostic::error(format!("unknown classifier strategy `{}`", id))
                    .with_context(format!("available: {}", available.join(", ")))
                    .with_suggestion(suggestions::LIST_STRATEGIES)
            }
        }
    }
}
