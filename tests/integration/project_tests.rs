//! Integration tests for project loading
//!
//! These tests write real bundles to disk and load them through
//! `ProjectFinder` and `Project::open`.

mod common;

use common::Fixture;
use pbxlint::discovery::ProjectFinder;
use pbxlint::{FileKind, Project, ProjectError};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

fn sample_project() -> Fixture {
    let mut fixture = Fixture::new();
    fixture
        .group("MAIN", None, &["APP", "F_README"])
        .group("APP", Some("App"), &["F_MAIN", "F_ICON", "V_STRINGS"])
        .object(
            "V_STRINGS",
            "isa = PBXVariantGroup; children = (F_EN); name = Localizable.strings; sourceTree = \"<group>\";",
        )
        .file_ref("F_EN", "en.lproj/Localizable.strings")
        .member("F_MAIN", "main.swift")
        .member("F_ICON", "icon.png")
        .file_ref("F_README", "README.md")
        .target("T_APP", "App", &["F_MAIN"]);
    fixture
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_locate_bundle_directly() {
    let fixture = sample_project();
    let bundle = fixture.write_project();
    assert_eq!(ProjectFinder::new().locate(&bundle).unwrap(), bundle);
}

#[test]
fn test_locate_bundle_in_directory() {
    let fixture = sample_project();
    let bundle = fixture.write_project();
    assert_eq!(ProjectFinder::new().locate(fixture.root()).unwrap(), bundle);
}

#[test]
fn test_locate_reports_missing_bundle() {
    let fixture = Fixture::new();
    match ProjectFinder::new().locate(fixture.root()) {
        Err(ProjectError::NotFound { searched_directory }) => assert!(searched_directory),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_locate_reports_ambiguous_directory() {
    let fixture = sample_project();
    fixture.write_project();
    fixture.mkdir("Other.xcodeproj");
    match ProjectFinder::new().locate(fixture.root()) {
        Err(ProjectError::NotSpecified(candidates)) => assert_eq!(candidates.len(), 2),
        other => panic!("expected NotSpecified, got {:?}", other),
    }
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_open_resolves_group_relative_paths() {
    let fixture = sample_project();
    let bundle = fixture.write_project();
    let project = Project::open(&bundle).unwrap();

    let paths: BTreeSet<PathBuf> = project.files().iter().map(|f| f.path.clone()).collect();
    assert!(paths.contains(&fixture.root().join("App/main.swift")));
    assert!(paths.contains(&fixture.root().join("App/icon.png")));
    assert!(paths.contains(&fixture.root().join("README.md")));
    // Variant groups contribute their path segments too
    assert!(paths.contains(&fixture.root().join("App/en.lproj/Localizable.strings")));

    let main = project
        .files()
        .iter()
        .find(|f| f.path.ends_with("main.swift"))
        .unwrap();
    assert_eq!(main.kind, FileKind::Code);
    assert!(main.has_target_membership);

    let readme = project
        .files()
        .iter()
        .find(|f| f.path.ends_with("README.md"))
        .unwrap();
    assert!(!readme.has_target_membership);
}

#[test]
fn test_group_without_ancestors_resolves_against_root() {
    let mut fixture = Fixture::new();
    fixture.file_ref("F1", "main.txt");
    let bundle = fixture.write_project();

    let project = Project::open(&bundle).unwrap();
    assert_eq!(project.files().len(), 1);
    assert_eq!(project.files()[0].path, fixture.root().join("main.txt"));
}

#[test]
fn test_loading_is_idempotent() {
    let fixture = sample_project();
    let bundle = fixture.write_project();

    let first = Project::open(&bundle).unwrap();
    let second = Project::open(&bundle).unwrap();

    let files = |p: &Project| p.files().iter().map(|f| f.path.clone()).collect::<BTreeSet<_>>();
    let groups = |p: &Project| p.groups().iter().map(|g| g.display_path.clone()).collect::<BTreeSet<_>>();
    let products = |p: &Project| p.products().iter().map(|t| t.name.clone()).collect::<BTreeSet<_>>();
    assert_eq!(files(&first), files(&second));
    assert_eq!(groups(&first), groups(&second));
    assert_eq!(products(&first), products(&second));
}

#[test]
fn test_sdk_relative_files_are_dropped() {
    let mut fixture = Fixture::new();
    fixture
        .group("MAIN", None, &["F_KIT", "F_OWN"])
        .object(
            "F_KIT",
            "isa = PBXFileReference; path = System/Library/Frameworks/UIKit.framework; sourceTree = SDKROOT;",
        )
        .file_ref("F_OWN", "Own.swift");
    let bundle = fixture.write_project();

    let project = Project::open(&bundle).unwrap();
    assert_eq!(project.files().len(), 1);
    assert!(project.files()[0].path.ends_with("Own.swift"));
}

#[test]
fn test_files_under_build_products_group_resolve_from_root() {
    let mut fixture = Fixture::new();
    fixture
        .group("MAIN", Some("Outer"), &["GEN"])
        .object(
            "GEN",
            "isa = PBXGroup; children = (F_GEN); path = Generated; sourceTree = BUILT_PRODUCTS_DIR;",
        )
        .file_ref("F_GEN", "Strings.swift");
    let bundle = fixture.write_project();

    let project = Project::open(&bundle).unwrap();
    assert_eq!(project.files().len(), 1);
    assert_eq!(project.files()[0].path, fixture.root().join("Generated/Strings.swift"));
}

#[test]
fn test_unknown_anchor_is_incompatible() {
    let mut fixture = Fixture::new();
    fixture.object(
        "F1",
        "isa = PBXFileReference; path = a.swift; sourceTree = NOT_AN_ANCHOR;",
    );
    let bundle = fixture.write_project();

    assert!(matches!(Project::open(&bundle), Err(ProjectError::Incompatible(_))));
}

#[test]
fn test_garbage_document_is_incompatible() {
    let fixture = Fixture::new();
    let bundle = fixture.mkdir("App.xcodeproj");
    fs::write(bundle.join("project.pbxproj"), "{ objects = ").unwrap();

    assert!(matches!(Project::open(&bundle), Err(ProjectError::Incompatible(_))));
}

#[test]
fn test_bundle_without_document_is_incompatible() {
    let fixture = Fixture::new();
    let bundle = fixture.mkdir("App.xcodeproj");
    assert!(matches!(Project::open(&bundle), Err(ProjectError::Incompatible(_))));
}

#[test]
fn test_xml_document_is_accepted() {
    let fixture = Fixture::new();
    let bundle = fixture.mkdir("App.xcodeproj");
    let mut objects = plist::Dictionary::new();
    let mut file = plist::Dictionary::new();
    file.insert("isa".to_string(), "PBXFileReference".into());
    file.insert("path".to_string(), "main.swift".into());
    file.insert("sourceTree".to_string(), "<group>".into());
    objects.insert("F1".to_string(), plist::Value::Dictionary(file));
    let mut top = plist::Dictionary::new();
    top.insert("objects".to_string(), plist::Value::Dictionary(objects));
    plist::Value::Dictionary(top)
        .to_file_xml(bundle.join("project.pbxproj"))
        .unwrap();

    let project = Project::open(&bundle).unwrap();
    assert_eq!(project.files().len(), 1);
    assert_eq!(project.files()[0].path, fixture.root().join("main.swift"));
}
