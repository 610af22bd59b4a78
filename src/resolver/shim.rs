//! Shim generation.
//!
//! A shim is a small Lua file placed at a target path an export file expects
//! but the repository does not provide. Forwarding shims hand execution to
//! the one real script found elsewhere in the tree; diagnostic shims tell the
//! user at load time that the target is missing or ambiguous.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::core::{NormalizedTarget, RepoLayout};
use crate::resolver::errors::ResolveError;

/// First line of every generated shim.
pub const SHIM_MARKER: &str = "-- Generated by menupack: toolbar compatibility shim";

/// Maximum number of candidates listed in a diagnostic shim comment.
const MAX_LISTED_CANDIDATES: usize = 30;

/// What a shim does when loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShimKind {
    /// Delegates to the single real script.
    Forwarding { real: String },
    /// Surfaces a message naming the unresolved target.
    Diagnostic,
}

/// A stand-in file for a target that did not resolve directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shim {
    /// Where the shim is written
    pub target: NormalizedTarget,

    /// Export file whose reference produced the target
    pub referenced_in: String,

    /// Candidates found by base name, sorted
    pub candidates: Vec<String>,

    pub kind: ShimKind,
}

impl Shim {
    /// Build the shim for a candidate set.
    ///
    /// Exactly one candidate yields a forwarding shim; zero or several yield
    /// a diagnostic shim.
    pub fn for_candidates(
        target: NormalizedTarget,
        referenced_in: impl Into<String>,
        candidates: Vec<String>,
    ) -> Self {
        let kind = match candidates.as_slice() {
            [only] => ShimKind::Forwarding { real: only.clone() },
            _ => ShimKind::Diagnostic,
        };
        Shim {
            target,
            referenced_in: referenced_in.into(),
            candidates,
            kind,
        }
    }

    pub fn is_forwarding(&self) -> bool {
        matches!(self.kind, ShimKind::Forwarding { .. })
    }

    /// Render the Lua body.
    ///
    /// `app_name` titles the message box; `report_rel` is the audit report
    /// the message points to.
    pub fn render(&self, app_name: &str, report_rel: &str) -> String {
        let mut out = String::new();
        out.push_str(SHIM_MARKER);
        out.push('\n');
        out.push_str(&format!("-- Toolbar target: {}\n", lua_string(self.target.as_str())));

        match &self.kind {
            ShimKind::Forwarding { real } => {
                out.push_str(&format!("-- Forwards to: {}\n", lua_string(real)));
                out.push_str(&format!(
                    "local real = reaper.GetResourcePath() .. {}\n",
                    lua_string(&format!("/{}", real))
                ));
                out.push_str("dofile(real)\n");
            }
            ShimKind::Diagnostic => {
                out.push_str("-- Could not uniquely resolve to a real script in this repository.\n");
                out.push_str("-- Candidates:\n");
                if self.candidates.is_empty() {
                    out.push_str("--   (no candidates found)\n");
                }
                for c in self.candidates.iter().take(MAX_LISTED_CANDIDATES) {
                    out.push_str(&format!("--   - {}\n", one_line(c)));
                }
                if self.candidates.len() > MAX_LISTED_CANDIDATES {
                    out.push_str(&format!(
                        "--   ... ({} more)\n",
                        self.candidates.len() - MAX_LISTED_CANDIDATES
                    ));
                }
                let message = format!(
                    "{}: Missing or ambiguous script target:\n{}\n\nSee {}",
                    app_name, self.target, report_rel
                );
                out.push_str(&format!(
                    "reaper.ShowMessageBox({}, {}, 0)\n",
                    lua_string(&message),
                    lua_string(app_name)
                ));
            }
        }

        out
    }

    /// Write the shim below the layout root.
    pub fn write(&self, layout: &RepoLayout, report_rel: &str) -> Result<(), ResolveError> {
        let path = layout.abs(self.target.as_str());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ResolveError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, self.render(&layout.index_name, report_rel))
            .map_err(|source| ResolveError::WriteShim { path, source })
    }
}

/// Whether the file at `path` was produced by [`Shim::write`].
pub fn is_generated_shim(path: &Path) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut first = String::new();
    match BufReader::new(file).read_line(&mut first) {
        Ok(_) => first.trim_end() == SHIM_MARKER,
        Err(_) => false,
    }
}

/// Quote a string as a Lua double-quoted literal.
fn lua_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn one_line(s: &str) -> String {
    s.replace(['\n', '\r'], " ")
}
