mod common;

use common::{entry, manifest_doc, write_manifest};
use modrecon_core::manifest::load_manifests;
use modrecon_core::ReconError;
use modrecon_errors::{ExError, ExErrorKind};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_loads_every_manifest_sorted_by_participant() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "carol.json", &manifest_doc(vec![("m", entry("c", "h", "m"))]));
    write_manifest(dir.path(), "alice.json", &manifest_doc(vec![("m", entry("a", "h", "m"))]));
    write_manifest(dir.path(), "bob.json", &manifest_doc(vec![("m", entry("b", "h", "m"))]));
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let loaded = load_manifests(dir.path(), "bob").unwrap();

    let names: Vec<_> = loaded
        .manifests
        .iter()
        .map(|m| m.participant().to_string())
        .collect();
    assert_eq!(names, vec!["alice", "bob", "carol"]);
    assert_eq!(loaded.host.as_str(), "bob");
}

#[test]
fn test_discovery_is_recursive_and_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    write_manifest(dir.path(), "alice.json", &manifest_doc(vec![]));
    write_manifest(&nested, "bob.JSON", &manifest_doc(vec![("m", entry("b", "h", "m"))]));

    let loaded = load_manifests(dir.path(), "alice.json").unwrap();
    assert_eq!(loaded.manifests.len(), 2);
}

#[test]
fn test_empty_directory_is_insufficient_input() {
    let dir = TempDir::new().unwrap();

    let err = load_manifests(dir.path(), "alice").unwrap_err();
    assert!(matches!(err, ReconError::NoManifestsFound { .. }));

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::InsufficientInput);
    assert!(ex.hint().contains("empty"));
}

#[test]
fn test_single_file_is_insufficient_input() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "alice.json", &manifest_doc(vec![]));

    let err = load_manifests(dir.path(), "alice").unwrap_err();
    assert!(matches!(err, ReconError::InsufficientInput { found: 1, .. }));

    let ex: ExError = err.into();
    assert!(ex.hint().contains("at least 2 files"));
}

#[test]
fn test_unknown_host_is_missing_host() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "alice.json", &manifest_doc(vec![]));
    write_manifest(dir.path(), "bob.json", &manifest_doc(vec![("m", entry("b", "h", "m"))]));

    let err = load_manifests(dir.path(), "zed").unwrap_err();
    match err {
        ReconError::MissingHost { host, participants } => {
            assert_eq!(host, "zed");
            assert_eq!(participants, vec!["alice", "bob"]);
        }
        other => panic!("expected MissingHost, got {other:?}"),
    }
}

#[test]
fn test_participant_collision_names_both_files() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "alice.json", &manifest_doc(vec![]));
    write_manifest(dir.path(), "alice.old.json", &manifest_doc(vec![("m", entry("b", "h", "m"))]));

    let err = load_manifests(dir.path(), "alice").unwrap_err();
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex.participants().len(), 2);
}

#[test]
fn test_invalid_json_is_malformed() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "alice.json", &manifest_doc(vec![]));
    std::fs::write(dir.path().join("bob.json"), "{ not json").unwrap();

    let err = load_manifests(dir.path(), "alice").unwrap_err();
    match err {
        ReconError::MalformedManifest { participant, .. } => assert_eq!(participant, "bob"),
        other => panic!("expected MalformedManifest, got {other:?}"),
    }
}

#[test]
fn test_mods_array_of_wrong_length_is_malformed() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "alice.json", &manifest_doc(vec![]));
    write_manifest(dir.path(), "bob.json", &json!({"mods": [{}, {}, {}]}));

    let err = load_manifests(dir.path(), "alice").unwrap_err();
    assert!(matches!(err, ReconError::MalformedManifest { .. }));
}

#[test]
fn test_missing_data_dir_is_io() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = load_manifests(&missing, "alice").unwrap_err();
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::Io);
}
