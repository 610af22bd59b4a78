//! CLI integration tests for menupack.
//!
//! These tests run the binary against throwaway repository trees.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the menupack binary command, isolated from the user's environment.
fn menupack(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("menupack").unwrap();
    cmd.arg("--root")
        .arg(root)
        .env("HOME", root)
        .env_remove("REAPACK_RAW_BASE");
    cmd
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A small suite with one resolvable, one forwarded and one missing target.
fn suite() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "Scripts/IfeelLikeSnow/DF95/DF95_Mixer.lua", "-- mixer\n");
    write(root, "Scripts/Other/IFLS_Fader.lua", "-- fader\n");
    write(root, "Data/toolbar_icons/fader.png", "png");
    write(
        root,
        "MenuSets/IFLS_Main.ReaperMenuSet",
        "SCRIPT: IFLS_Fader.lua\nICON: fader.png\n",
    );
    write(
        root,
        "Toolbars/Main.Toolbar.ReaperMenu",
        "SCRIPT: DF95_Mixer.lua\nSCRIPT: Ghost_Tool.lua\n",
    );
    write(root, "Menus/.keep", "");
    tmp
}

// ============================================================================
// menupack build
// ============================================================================

#[test]
fn test_build_writes_index_report_and_shims() {
    let tmp = suite();
    let root = tmp.path();

    menupack(root).arg("build").assert().success();

    let xml = fs::read_to_string(root.join("index.xml")).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
    assert!(xml.contains(
        "<index version=\"1\" name=\"DF95 Toolbar Suite\" desc=\"Toolbars + required scripts/resources\">"
    ));
    assert!(xml.contains("<category name=\"DF95/00 Core\">"));
    assert!(xml.contains("<reapack name=\"IFLS_Main\" type=\"script\""));
    assert!(xml.contains("<reapack name=\"Main\" type=\"script\""));

    assert!(root.join("Reports/toolbar_script_targets.md").exists());

    let forward = fs::read_to_string(root.join("Scripts/IfeelLikeSnow/IFLS/IFLS_Fader.lua")).unwrap();
    assert!(forward.contains("dofile(real)"));

    let ghost = fs::read_to_string(root.join("Scripts/IfeelLikeSnow/DF95/Ghost_Tool.lua")).unwrap();
    assert!(ghost.contains("reaper.ShowMessageBox"));
}

#[test]
fn test_build_twice_is_byte_identical() {
    let tmp = suite();
    let root = tmp.path();

    menupack(root).arg("build").assert().success();
    let index_1 = fs::read(root.join("index.xml")).unwrap();
    let report_1 = fs::read(root.join("Reports/toolbar_script_targets.md")).unwrap();

    menupack(root).arg("build").assert().success();
    assert_eq!(index_1, fs::read(root.join("index.xml")).unwrap());
    assert_eq!(
        report_1,
        fs::read(root.join("Reports/toolbar_script_targets.md")).unwrap()
    );
}

#[test]
fn test_build_raw_base_from_environment() {
    let tmp = suite();
    let root = tmp.path();

    menupack(root)
        .arg("build")
        .env("REAPACK_RAW_BASE", "https://mirror.invalid/suite")
        .assert()
        .success();

    let xml = fs::read_to_string(root.join("index.xml")).unwrap();
    assert!(xml.contains(">https://mirror.invalid/suite/Scripts/"));
}

#[test]
fn test_build_flag_overrides_config() {
    let tmp = suite();
    let root = tmp.path();
    write(
        root,
        "menupack.toml",
        "[index]\nname = \"My Suite\"\ndesc = \"Just menus\"\nraw_base = \"https://config.invalid/\"\n",
    );

    menupack(root)
        .args(["build", "--raw-base", "https://flag.invalid/x/"])
        .assert()
        .success();

    let xml = fs::read_to_string(root.join("index.xml")).unwrap();
    assert!(xml.contains("name=\"My Suite\" desc=\"Just menus\""));
    assert!(xml.contains("https://flag.invalid/x/"));
    assert!(!xml.contains("config.invalid"));
}

#[test]
fn test_build_no_shims_json() {
    let tmp = suite();
    let root = tmp.path();
    let out = root.join("out").join("index.xml");

    menupack(root)
        .args(["build", "--no-shims", "--json", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\": true"))
        .stdout(predicate::str::contains("\"unresolved\": 1"))
        .stdout(predicate::str::contains("\"index_sha256\""));

    assert!(out.exists());
    assert!(!root.join("index.xml").exists());
    assert!(!root.join("Scripts/IfeelLikeSnow/DF95/Ghost_Tool.lua").exists());
}

#[test]
fn test_build_ignores_script_targets_without_file_name() {
    let tmp = suite();
    let root = tmp.path();
    write(root, "Menus/Broken.ReaperMenu", "SCRIPT: Helpers/\nSCRIPT: Scripts/\n");

    menupack(root).arg("build").assert().success();

    assert!(root.join("Scripts/IfeelLikeSnow/DF95").is_dir());
    let report = fs::read_to_string(root.join("Reports/toolbar_script_targets.md")).unwrap();
    assert!(report.contains("ignored (no file name)"));
}

#[test]
fn test_build_rejects_invalid_raw_base() {
    let tmp = suite();

    menupack(tmp.path())
        .args(["build", "--raw-base", "not a url"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("invalid base URL"));
}

#[test]
fn test_build_missing_root() {
    let tmp = TempDir::new().unwrap();

    menupack(&tmp.path().join("nope"))
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository root not found"));
}

// ============================================================================
// menupack shims / icons / refs
// ============================================================================

#[test]
fn test_shims_writes_unresolved_report() {
    let tmp = suite();
    let root = tmp.path();

    menupack(root)
        .arg("shims")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shims created: 2"))
        .stdout(predicate::str::contains("Unresolved targets: 1"));

    let report = fs::read_to_string(root.join("Reports/unresolved_script_targets.md")).unwrap();
    assert!(report.contains("## Scripts/IfeelLikeSnow/DF95/Ghost_Tool.lua"));
    assert!(!root.join("index.xml").exists());
}

#[test]
fn test_refs_preview_writes_nothing() {
    let tmp = suite();
    let root = tmp.path();

    menupack(root)
        .arg("refs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Toolbars/Main.Toolbar.ReaperMenu"))
        .stdout(predicate::str::contains("[shim -> Scripts/Other/IFLS_Fader.lua]"))
        .stdout(predicate::str::contains("[unresolved (0 candidates)]"));

    assert!(!root.join("Scripts/IfeelLikeSnow/DF95/Ghost_Tool.lua").exists());
    assert!(!root.join("Reports").exists());
}

#[test]
fn test_refs_single_file_json() {
    let tmp = suite();

    menupack(tmp.path())
        .args(["refs", "MenuSets/IFLS_Main.ReaperMenuSet", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"icon\""))
        .stdout(predicate::str::contains("Toolbars").not());
}

#[test]
fn test_icons_writes_placeholders_and_report() {
    let tmp = suite();
    let root = tmp.path();
    write(root, "Toolbars/Icons.ReaperMenu", "ICON: fader.png\nICON: blank.png\n");

    menupack(root)
        .arg("icons")
        .assert()
        .success()
        .stdout(predicate::str::contains("Placeholders created: 1"));

    assert!(root.join("Data/toolbar_icons/blank.png").is_file());
    assert_eq!(fs::read_to_string(root.join("Data/toolbar_icons/fader.png")).unwrap(), "png");
    let report = fs::read_to_string(root.join("Reports/icon_resolution_report.md")).unwrap();
    assert!(report.contains("- `Toolbars/Icons.ReaperMenu` -> `blank.png`"));
    assert!(!root.join("Scripts/IfeelLikeSnow/DF95/Ghost_Tool.lua").exists());
}

#[test]
fn test_icons_dry_run_json() {
    let tmp = suite();
    let root = tmp.path();
    write(root, "Toolbars/Icons.ReaperMenu", "ICON: blank.bmp\n");

    menupack(root)
        .args(["icons", "--dry-run", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\": true"))
        .stdout(predicate::str::contains("Data/toolbar_icons/blank.bmp"));

    assert!(!root.join("Data/toolbar_icons/blank.bmp").exists());
    assert!(!root.join("Reports").exists());
}

// ============================================================================
// menupack check
// ============================================================================

#[test]
fn test_check_ok() {
    let tmp = suite();

    menupack(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository root layout OK."));
}

#[test]
fn test_check_nested_layout_exits_2() {
    let tmp = TempDir::new().unwrap();
    for dir in ["Scripts", "Toolbars", "Menus", "MenuSets"] {
        write(tmp.path(), &format!("suite-main/{}/.keep", dir), "");
    }

    menupack(tmp.path())
        .args(["check", "--no-color"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("looks nested"))
        .stderr(predicate::str::contains("suite-main/"));
}

#[test]
fn test_check_custom_requirements() {
    let tmp = suite();

    menupack(tmp.path())
        .args(["check", "--require", "Scripts", "--require", "Themes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing expected root folders: Themes"));
}

// ============================================================================
// menupack classify / completions
// ============================================================================

#[test]
fn test_classify_default_strategy() {
    let tmp = suite();

    menupack(tmp.path())
        .arg("classify")
        .assert()
        .success()
        .stdout(predicate::str::contains("script"))
        .stdout(predicate::str::contains("Scripts/Other/IFLS_Fader.lua"));
}

#[test]
fn test_classify_unknown_strategy() {
    let tmp = suite();

    menupack(tmp.path())
        .args(["classify", "--strategy", "neural", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown classifier strategy `neural`"));
}

#[test]
fn test_classify_list() {
    let tmp = TempDir::new().unwrap();

    menupack(tmp.path())
        .args(["classify", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extension"))
        .stdout(predicate::str::contains("null"));
}

#[test]
fn test_completions() {
    let tmp = TempDir::new().unwrap();

    menupack(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("menupack"));
}
