//! Built-in classification strategies.

use std::path::Path;

use crate::classify::{AssetClassifier, Classified};

/// Confidence reported for any extension match.
const EXTENSION_CONFIDENCE: f32 = 0.5;

/// Extension families, matched case-insensitively.
const FAMILIES: &[(&str, &[&str])] = &[
    ("audio", &["wav", "flac", "mp3", "ogg", "aif", "aiff", "w64", "opus"]),
    ("image", &["png", "ico", "bmp", "jpg", "jpeg", "svg"]),
    ("script", &["lua", "eel", "py"]),
    ("fx-chain", &["rfxchain"]),
    ("track-template", &["rtracktemplate"]),
    ("project", &["rpp", "rpp-bak"]),
    ("theme", &["reapertheme", "reaperthemezip"]),
    ("menu", &["reapermenu", "reapermenuset", "reapermenusets"]),
    ("data", &["json", "txt", "csv", "ini", "toml", "xml", "md"]),
];

/// Labels a path by its extension family.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionClassifier;

impl ExtensionClassifier {
    pub fn new() -> Self {
        ExtensionClassifier
    }
}

impl AssetClassifier for ExtensionClassifier {
    fn id(&self) -> &str {
        "extension"
    }

    fn description(&self) -> &str {
        "Label from the file extension family"
    }

    fn classify(&self, path: &Path) -> Classified {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Classified::unknown();
        };
        let ext = ext.to_ascii_lowercase();

        FAMILIES
            .iter()
            .find(|(_, exts)| exts.contains(&ext.as_str()))
            .map(|(label, _)| Classified::new(*label, EXTENSION_CONFIDENCE))
            .unwrap_or_else(Classified::unknown)
    }
}

/// Labels every path `unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClassifier;

impl AssetClassifier for NullClassifier {
    fn id(&self) -> &str {
        "null"
    }

    fn description(&self) -> &str {
        "No classification"
    }

    fn classify(&self, _path: &Path) -> Classified {
        Classified::unknown()
    }
}
