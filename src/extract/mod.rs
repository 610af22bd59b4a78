//! Reference extraction from toolbar/menu export files.
//!
//! Extraction is line-oriented: it does not parse the export grammar, only
//! the directive lines relevant to packaging. The rest of the pipeline talks
//! to the [`DirectiveExtractor`] trait and never sees the patterns.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::{DirectiveKind, Reference};
use crate::util::fs::read_lossy;

/// Something that turns export file text into references.
pub trait DirectiveExtractor {
    /// Extract references from the text of one export file, in line order.
    fn extract(&self, origin: &str, text: &str) -> Vec<Reference>;
}

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*SCRIPT:\s*(.+?)\s*$").unwrap());

static ICON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*ICON:\s*(.+?)\s*$").unwrap());

/// Matches `SCRIPT:` and `ICON:` lines.
///
/// The keyword is case-insensitive and may be preceded by whitespace; the
/// target is the rest of the line, trimmed. A line yields at most one
/// reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineDirectiveExtractor;

impl LineDirectiveExtractor {
    pub fn new() -> Self {
        LineDirectiveExtractor
    }

    fn match_line(line: &str) -> Option<(DirectiveKind, &str)> {
        let patterns: [(DirectiveKind, &Regex); 2] = [
            (DirectiveKind::Script, &SCRIPT_RE),
            (DirectiveKind::Icon, &ICON_RE),
        ];

        patterns.into_iter().find_map(|(kind, re)| {
            re.captures(line)
                .and_then(|c| c.get(1))
                .map(|m| (kind, m.as_str().trim()))
                .filter(|(_, target)| !target.is_empty())
        })
    }
}

impl DirectiveExtractor for LineDirectiveExtractor {
    fn extract(&self, origin: &str, text: &str) -> Vec<Reference> {
        text.lines()
            .enumerate()
            .filter_map(|(i, line)| {
                Self::match_line(line).map(|(kind, target)| Reference::new(kind, target, i + 1, origin))
            })
            .collect()
    }
}

/// Read an export file and extract its references.
///
/// Files that cannot be read contribute nothing.
pub fn extract_file(
    extractor: &dyn DirectiveExtractor,
    abs_path: &Path,
    origin: &str,
) -> Vec<Reference> {
    match read_lossy(abs_path) {
        Ok(text) => {
            let refs = extractor.extract(origin, &text);
            tracing::debug!("{}: {} references", origin, refs.len());
            refs
        }
        Err(e) => {
            tracing::warn!("Skipping unreadable export file {}: {}", origin, e);
            Vec::new()
        }
    }
}
