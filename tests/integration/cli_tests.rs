//! CLI integration tests
//!
//! These tests verify that the CLI works correctly with various options.

mod common;

use assert_cmd::Command;
use common::Fixture;
use predicates::prelude::*;

fn pbxlint() -> Command {
    Command::cargo_bin("pbxlint").unwrap()
}

fn healthy_project() -> Fixture {
    let mut fixture = Fixture::new();
    fixture
        .group("MAIN", None, &["F_MAIN"])
        .member("F_MAIN", "main.swift")
        .target("T_APP", "App", &["F_MAIN"]);
    fixture.write("main.swift", "print(\"hello\")\n");
    fixture
}

fn broken_project() -> Fixture {
    let mut fixture = healthy_project();
    fixture
        .group("G_EMPTY", Some("Scratch"), &[])
        .file_ref("F_GHOST", "ghost.swift");
    fixture
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_help() {
    pbxlint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--keep-comments"));
}

#[test]
fn test_version() {
    pbxlint()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pbxlint"));
}

#[test]
fn test_healthy_project_exits_cleanly() {
    let fixture = healthy_project();
    fixture.write_project();

    pbxlint()
        .arg(fixture.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("No defects found!"));
}

#[test]
fn test_defects_exit_with_failure() {
    let fixture = broken_project();
    let bundle = fixture.write_project();

    pbxlint()
        .arg(&bundle)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Found 1 empty group"))
        .stdout(predicate::str::contains("These groups have no children and can be deleted."))
        .stdout(predicate::str::contains("Scratch"))
        .stdout(predicate::str::contains("ghost.swift"));
}

#[test]
fn test_missing_bundle_fails() {
    let fixture = Fixture::new();

    pbxlint()
        .arg(fixture.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project found"));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_only_restricts_detectors() {
    let fixture = broken_project();
    fixture.write_project();

    pbxlint()
        .arg(fixture.root())
        .args(["--only", "empty-groups"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Scratch"))
        .stdout(predicate::str::contains("ghost.swift").not());
}

#[test]
fn test_skip_all_defects_found() {
    let fixture = broken_project();
    fixture.write_project();

    pbxlint()
        .arg(fixture.root())
        .args([
            "--skip",
            "empty-groups,nonexistent-paths,nonexistent-files,dangling-files",
        ])
        .assert()
        .success();
}

#[test]
fn test_unknown_kind_is_rejected() {
    pbxlint()
        .args(["--only", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown defect kind"));
}

#[test]
fn test_json_output() {
    let fixture = broken_project();
    fixture.write_project();

    let output = pbxlint()
        .arg(fixture.root())
        .args(["--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<&str> = report["diagnoses"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["kind"].as_str())
        .collect();
    assert!(kinds.contains(&"empty-groups"));
    assert!(kinds.contains(&"nonexistent-files"));
}

#[test]
fn test_json_output_file() {
    let fixture = broken_project();
    fixture.write_project();
    let report = fixture.root().join("report.json");

    pbxlint()
        .arg(fixture.root())
        .args(["-f", "json", "-o"])
        .arg(&report)
        .assert()
        .code(1);

    let contents = std::fs::read_to_string(&report).unwrap();
    assert!(contents.contains("\"empty-groups\""));
}

#[test]
fn test_keep_comments_flag() {
    let mut fixture = Fixture::new();
    fixture
        .member("F_CODE", "Code.swift")
        .member("F_IMG", "logo.png")
        .target("T_APP", "App", &["F_CODE"]);
    fixture.write("Code.swift", "// UIImage(named: \"logo\")\n");
    fixture.write("logo.png", [0u8; 16]);
    fixture.write_project();

    pbxlint()
        .arg(fixture.root())
        .args(["--only", "unused-resources"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("logo.png"));

    pbxlint()
        .arg(fixture.root())
        .args(["--only", "unused-resources", "--keep-comments"])
        .assert()
        .success();
}

#[test]
fn test_config_file_disables_detectors() {
    let fixture = broken_project();
    fixture.write_project();
    fixture.write(
        ".pbxlint.yml",
        "detection:\n  empty_groups: false\n  nonexistent_paths: false\n  nonexistent_files: false\n  dangling_files: false\n",
    );

    pbxlint().arg(fixture.root()).assert().success();
}

#[test]
fn test_parallel_mode() {
    let fixture = broken_project();
    fixture.write_project();

    pbxlint()
        .arg(fixture.root())
        .arg("--parallel")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Scratch"));
}
