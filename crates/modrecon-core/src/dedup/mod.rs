//! Duplicate manifest detection.
//!
//! Two participants with identical manifests mean one state backup was
//! copied under several names. Reconciling such a set would hide real
//! conflicts, so any duplicate group aborts the run. The check compares raw
//! documents (after canonicalization), before any normalization.

pub mod canonical;

pub use canonical::{canonical_json, compute_manifest_digest};

use crate::errors::{ReconError, Result};
use crate::model::Manifest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Participants whose manifests share one digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    pub digest: String,
    pub participants: Vec<String>,
}

/// Group participant identities by manifest digest
///
/// # Errors
///
/// Returns `Serialization` if a document cannot be canonicalized.
pub fn group_by_digest(manifests: &[Manifest]) -> Result<BTreeMap<String, Vec<String>>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for manifest in manifests {
        let digest = compute_manifest_digest(manifest.raw_content())?;
        groups
            .entry(digest)
            .or_default()
            .push(manifest.participant().to_string());
    }
    Ok(groups)
}

/// Reject input sets that contain identical manifests
///
/// # Errors
///
/// Returns `DuplicateManifest` listing every offending group, each with all
/// of its participant identities.
pub fn check_duplicates(manifests: &[Manifest]) -> Result<()> {
    let duplicates: Vec<DuplicateGroup> = group_by_digest(manifests)?
        .into_iter()
        .filter(|(_, participants)| participants.len() > 1)
        .map(|(digest, mut participants)| {
            participants.sort();
            DuplicateGroup {
                digest,
                participants,
            }
        })
        .collect();

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ReconError::DuplicateManifest { groups: duplicates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParticipantId;
    use serde_json::json;

    fn manifest(name: &str, content: serde_json::Value) -> Manifest {
        Manifest::new(ParticipantId::from(name), format!("{}.json", name), content)
    }

    #[test]
    fn test_distinct_manifests_pass() {
        let manifests = vec![
            manifest("alice", json!({"mods": [{}, {"g": {"a": {}}}]})),
            manifest("bob", json!({"mods": [{}, {"g": {"b": {}}}]})),
        ];
        assert!(check_duplicates(&manifests).is_ok());
    }

    #[test]
    fn test_reordered_keys_are_duplicates() {
        let manifests = vec![
            manifest("alice", json!({"x": 1, "y": {"p": true, "q": false}})),
            manifest("bob", json!({"y": {"q": false, "p": true}, "x": 1})),
            manifest("carol", json!({"x": 2})),
        ];

        let err = check_duplicates(&manifests).unwrap_err();
        match err {
            ReconError::DuplicateManifest { groups } => {
                assert_eq!(groups.len(), 1);
                assert_eq!(groups[0].participants, vec!["alice", "bob"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_every_group_is_reported() {
        let manifests = vec![
            manifest("a1", json!({"v": 1})),
            manifest("b1", json!({"v": 2})),
            manifest("a2", json!({"v": 1})),
            manifest("b2", json!({"v": 2})),
            manifest("b3", json!({"v": 2})),
        ];

        let err = check_duplicates(&manifests).unwrap_err();
        let ReconError::DuplicateManifest { groups } = err else {
            panic!("expected DuplicateManifest");
        };
        let mut sizes: Vec<usize> = groups.iter().map(|g| g.participants.len()).collect();
        sizes.sort();
        assert_eq!(sizes, vec![2, 3]);
    }
}
