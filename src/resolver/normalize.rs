//! Target normalization.
//!
//! Maps a raw directive target to the canonical repository path it is
//! expected at. Pure string transforms: nothing here touches the filesystem.

use crate::core::classification::base_name;
use crate::core::target::{ends_with_ignore_case, starts_with_ignore_case};
use crate::core::{FamilyKind, NormalizedTarget, RepoLayout};

/// Image extensions accepted for `ICON:` targets.
pub const ICON_EXTENSIONS: &[&str] = &[".png", ".ico", ".bmp", ".jpg", ".jpeg"];

/// Which family a base file name routes to.
pub fn route_family(layout: &RepoLayout, basename: &str) -> FamilyKind {
    if layout.secondary.claims_basename(basename) {
        FamilyKind::Secondary
    } else {
        // Primary-prefixed and unprefixed names both land in the primary family.
        FamilyKind::Primary
    }
}

/// Normalize a `SCRIPT:` target.
///
/// Backslashes become forward slashes. Targets already under the scripts
/// root are kept verbatim unless they contain `..`; anything else is
/// reduced to its base name and placed in the namespace of the family its
/// prefix selects.
///
/// Returns `None` for targets without a file name (`Helpers/`, `Scripts/`).
pub fn normalize_script(layout: &RepoLayout, raw: &str) -> Option<NormalizedTarget> {
    let slashed = raw.trim().replace('\\', "/");
    let basename = base_name(&slashed);
    if basename.is_empty() || basename == "." || basename == ".." {
        return None;
    }

    let scripts_prefix = format!("{}/", layout.scripts_root);

    // Parent components would let a shim escape the repository.
    let escapes = slashed.split('/').any(|c| c == "..");

    if starts_with_ignore_case(&slashed, &scripts_prefix) && !escapes {
        return Some(NormalizedTarget::new(slashed));
    }

    let family = route_family(layout, basename);
    Some(NormalizedTarget::new(format!(
        "{}/{}",
        layout.namespace_dir(family),
        basename
    )))
}

/// Normalize an `ICON:` target.
///
/// Returns `None` for targets that are not image files.
pub fn normalize_icon(layout: &RepoLayout, raw: &str) -> Option<NormalizedTarget> {
    let slashed = raw.trim().replace('\\', "/");
    let basename = base_name(&slashed);

    if basename.is_empty() || !ICON_EXTENSIONS.iter().any(|ext| ends_with_ignore_case(basename, ext)) {
        return None;
    }

    Some(NormalizedTarget::new(format!("{}/{}", layout.icon_dir, basename)))
}
