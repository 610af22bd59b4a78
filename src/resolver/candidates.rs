//! Candidate search by base name.

use crate::core::{FamilyKind, NormalizedTarget, RepoLayout};
use crate::discovery::{is_under, Snapshot};
use crate::resolver::shim::is_generated_shim;

/// Find real scripts that could stand behind a missing target.
///
/// Searches the snapshot's core resources below the scripts root for files
/// with the target's base name. Files inside the family namespace
/// directories are skipped (that is the path space that just failed), as
/// are the target itself and shims generated by earlier runs. The result is
/// sorted.
pub fn find_candidates(
    layout: &RepoLayout,
    snapshot: &Snapshot,
    target: &NormalizedTarget,
) -> Vec<String> {
    let basename = target.file_name();
    let namespaces = [
        layout.namespace_dir(FamilyKind::Primary),
        layout.namespace_dir(FamilyKind::Secondary),
    ];

    snapshot
        .core_resources_under(&layout.scripts_root)
        .filter(|p| p.rsplit('/').next() == Some(basename))
        .filter(|p| *p != target.as_str())
        .filter(|p| !namespaces.iter().any(|ns| is_under(p, ns)))
        .filter(|p| !is_generated_shim(&layout.abs(p)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::discover;
    use crate::resolver::shim::SHIM_MARKER;
    use crate::test_support::RepoFixture;

    #[test]
    fn test_finds_matches_outside_namespaces() {
        let fx = RepoFixture::new()
            .file("Scripts/Other/IFLS_Fader.lua", "-- real")
            .file("Scripts/Deep/er/IFLS_Fader.lua", "-- real too")
            .file("Scripts/IfeelLikeSnow/DF95/IFLS_Fader.lua", "-- namespaced")
            .file("Data/IFLS_Fader.lua", "-- not under scripts");
        let layout = fx.layout();
        let snapshot = discover(&layout).unwrap();

        let target = NormalizedTarget::new("Scripts/IfeelLikeSnow/IFLS/IFLS_Fader.lua");
        let found = find_candidates(&layout, &snapshot, &target);

        assert_eq!(
            found,
            vec!["Scripts/Deep/er/IFLS_Fader.lua", "Scripts/Other/IFLS_Fader.lua"]
        );
    }

    #[test]
    fn test_base_name_match_is_exact() {
        let fx = RepoFixture::new().file("Scripts/Other/ifls_fader.lua", "-- real");
        let layout = fx.layout();
        let snapshot = discover(&layout).unwrap();

        let target = NormalizedTarget::new("Scripts/IfeelLikeSnow/IFLS/IFLS_Fader.lua");
        assert!(find_candidates(&layout, &snapshot, &target).is_empty());
    }

    #[test]
    fn test_skips_self_and_generated_shims() {
        let fx = RepoFixture::new()
            .file("Scripts/Vendor/Tool.lua", &format!("{}\n-- old shim\n", SHIM_MARKER))
            .file("Scripts/Elsewhere/Tool.lua", &format!("{}\n", SHIM_MARKER));
        let layout = fx.layout();
        let snapshot = discover(&layout).unwrap();

        let target = NormalizedTarget::new("Scripts/Vendor/Tool.lua");
        assert!(find_candidates(&layout, &snapshot, &target).is_empty());
    }
}
