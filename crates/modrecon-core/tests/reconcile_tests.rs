//! End-to-end reconciliation over in-memory manifests.

mod common;

use common::{entry, manifest, manifest_doc, GAME};
use modrecon_core::diff::render_summary;
use modrecon_core::{reconcile, ParticipantId, ReconError};
use modrecon_errors::{ExError, ExErrorKind};
use serde_json::json;

fn host(name: &str) -> ParticipantId {
    ParticipantId::from(name)
}

#[test]
fn test_identical_mod_sets_yield_no_conflicts() {
    // Same mods, different entry keys so the documents are not duplicates
    let manifests = vec![
        manifest(
            "alice",
            manifest_doc(vec![
                ("k1", entry("a", "h1", "one")),
                ("k2", entry("b", "h2", "two")),
            ]),
        ),
        manifest(
            "bob",
            manifest_doc(vec![
                ("x1", entry("a", "h1", "one")),
                ("x2", entry("b", "h2", "two")),
            ]),
        ),
    ];

    let outcome = reconcile(&manifests, &host("alice"), GAME).unwrap();

    assert!(outcome.conflict_set.is_empty());
    assert!(outcome.conflicting_records.is_empty());
    assert_eq!(outcome.reports.len(), 1);
    assert!(outcome.reports.iter().all(|r| r.is_empty()));
    assert_eq!(outcome.issue_count(), 0);
}

#[test]
fn test_hash_missing_for_one_of_three_is_conflicting() {
    let manifests = vec![
        manifest("alice", manifest_doc(vec![("x", entry("X", "hx", "x"))])),
        manifest("bob", manifest_doc(vec![("y", entry("Y", "hy", "y"))])),
        manifest(
            "carol",
            manifest_doc(vec![
                ("x", entry("X", "hx", "x")),
                ("y", entry("Y", "hy", "y")),
            ]),
        ),
    ];

    let outcome = reconcile(&manifests, &host("alice"), GAME).unwrap();

    assert_eq!(outcome.presence.count_vector("X"), vec![1, 0, 1]);
    assert!(outcome.conflict_set.contains("X"));
    assert!(outcome.conflict_set.contains("Y"));
}

#[test]
fn test_player_only_mod_is_reported_against_host() {
    // Host installs a, b, c; bob installs b, c, d
    let manifests = vec![
        manifest(
            "alice",
            manifest_doc(vec![
                ("a", entry("ha", "a", "A")),
                ("b", entry("hb", "b", "B")),
                ("c", entry("hc", "c", "C")),
            ]),
        ),
        manifest(
            "bob",
            manifest_doc(vec![
                ("b", entry("hb", "b", "B")),
                ("c", entry("hc", "c", "C")),
                ("d", entry("hd", "d", "D")),
            ]),
        ),
    ];

    let outcome = reconcile(&manifests, &host("alice"), GAME).unwrap();
    let report = outcome.report_for(&ParticipantId::from("bob")).unwrap();

    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.homepage, "d");
    assert_eq!(row.content_hash, "hd");
    assert_eq!(row.custom_file_name, "D Custom");
    assert_eq!(report.host.as_str(), "alice");
}

#[test]
fn test_rows_with_missing_columns_are_dropped() {
    let mut partial = entry("hd", "d", "D");
    partial["attributes"]["modVersion"] = json!(null);
    let manifests = vec![
        manifest("alice", manifest_doc(vec![("a", entry("ha", "a", "A"))])),
        manifest("bob", manifest_doc(vec![("a", entry("ha", "a", "A")), ("d", partial)])),
    ];

    let outcome = reconcile(&manifests, &host("alice"), GAME).unwrap();

    assert!(outcome.conflict_set.contains("hd"));
    assert!(outcome.reports[0].is_empty());
}

#[test]
fn test_disabled_player_mod_is_not_reported() {
    let mut disabled = entry("hd", "d", "D");
    disabled["state"] = json!("disabled");
    let manifests = vec![
        manifest("alice", manifest_doc(vec![("a", entry("ha", "a", "A"))])),
        manifest("bob", manifest_doc(vec![("a", entry("ha", "a", "A")), ("d", disabled)])),
    ];

    let outcome = reconcile(&manifests, &host("alice"), GAME).unwrap();
    assert!(outcome.reports[0].is_empty());
}

#[test]
fn test_duplicate_manifests_abort_with_both_names() {
    let doc = manifest_doc(vec![("a", entry("ha", "a", "A"))]);
    let manifests = vec![
        manifest("alice", doc.clone()),
        manifest("bob", doc),
        manifest("carol", manifest_doc(vec![])),
    ];

    let err = reconcile(&manifests, &host("alice"), GAME).unwrap_err();
    match &err {
        ReconError::DuplicateManifest { groups } => {
            assert_eq!(groups.len(), 1);
            assert_eq!(groups[0].participants, vec!["alice", "bob"]);
        }
        other => panic!("expected DuplicateManifest, got {other:?}"),
    }

    let ex: ExError = err.into();
    assert_eq!(ex.code(), "ERR_DUPLICATE_MANIFEST");
    assert!(ex.hint().contains("duplicated"));
    assert!(ex.hint().contains("bob"));
}

#[test]
fn test_unknown_host_aborts() {
    let manifests = vec![
        manifest("alice", manifest_doc(vec![])),
        manifest("bob", manifest_doc(vec![("a", entry("ha", "a", "A"))])),
    ];

    let err = reconcile(&manifests, &host("zed"), GAME).unwrap_err();
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::MissingHost);
}

#[test]
fn test_corrupt_entry_keeps_the_rest_of_the_ledger() {
    let manifests = vec![
        manifest(
            "alice",
            manifest_doc(vec![
                ("a", entry("ha", "a", "A")),
                ("bad", json!({"attributes": [1, 2]})),
            ]),
        ),
        manifest("bob", manifest_doc(vec![("a", entry("ha", "a", "A"))])),
    ];

    let outcome = reconcile(&manifests, &host("alice"), GAME).unwrap();

    assert_eq!(outcome.ledger.len(), 2);
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].entry_key, "bad");
}

#[test]
fn test_summary_reports_conflicts() {
    let manifests = vec![
        manifest("alice", manifest_doc(vec![("a", entry("ha", "a", "A"))])),
        manifest(
            "bob",
            manifest_doc(vec![
                ("a", entry("ha", "a", "A")),
                ("d", entry("hd", "d", "D")),
            ]),
        ),
    ];

    let outcome = reconcile(&manifests, &host("alice"), GAME).unwrap();
    let summary = render_summary(&outcome);

    assert!(summary.contains("**Host**: alice"));
    assert!(summary.contains("### bob"));
    assert!(summary.contains("D Custom"));
}
