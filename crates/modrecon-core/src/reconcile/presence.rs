//! Presence counting and conflict classification.

use crate::model::{ModRecord, ParticipantId};
use crate::reconcile::Ledger;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Occurrence counts of each content hash, per participant
///
/// A hash is conflicting iff its count vector over the known participants is
/// not uniformly 1. Records without a content hash do not contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresenceTable {
    participants: Vec<ParticipantId>,
    counts: BTreeMap<String, BTreeMap<ParticipantId, usize>>,
}

impl PresenceTable {
    pub fn build(ledger: &Ledger) -> Self {
        let mut counts: BTreeMap<String, BTreeMap<ParticipantId, usize>> = BTreeMap::new();
        for record in ledger.records() {
            if let Some(hash) = &record.content_hash {
                *counts
                    .entry(hash.clone())
                    .or_default()
                    .entry(record.participant_id.clone())
                    .or_insert(0) += 1;
            }
        }
        Self {
            participants: ledger.participants().to_vec(),
            counts,
        }
    }

    /// Occurrences of `hash` for `participant`; 0 when absent
    pub fn count(&self, hash: &str, participant: &ParticipantId) -> usize {
        self.counts
            .get(hash)
            .and_then(|per| per.get(participant))
            .copied()
            .unwrap_or(0)
    }

    /// Counts of `hash` in participant order
    pub fn count_vector(&self, hash: &str) -> Vec<usize> {
        self.participants
            .iter()
            .map(|p| self.count(hash, p))
            .collect()
    }

    pub fn is_conflicting(&self, hash: &str) -> bool {
        self.count_vector(hash).iter().any(|&c| c != 1)
    }

    pub fn conflict_set(&self) -> ConflictSet {
        ConflictSet(
            self.counts
                .keys()
                .filter(|hash| self.is_conflicting(hash))
                .cloned()
                .collect(),
        )
    }

    pub fn hashes(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Content hashes classified as conflicting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConflictSet(BTreeSet<String>);

impl ConflictSet {
    pub fn contains(&self, hash: &str) -> bool {
        self.0.contains(hash)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ConflictSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ledger records whose hash is in `conflicts`
///
/// Ordered by custom file name (missing first), content hash, participant.
pub fn conflicting_records(ledger: &Ledger, conflicts: &ConflictSet) -> Vec<ModRecord> {
    let mut records: Vec<ModRecord> = ledger
        .records()
        .iter()
        .filter(|r| {
            r.content_hash
                .as_deref()
                .is_some_and(|h| conflicts.contains(h))
        })
        .cloned()
        .collect();
    records.sort_by(|a, b| {
        (&a.custom_file_name, &a.content_hash, &a.participant_id).cmp(&(
            &b.custom_file_name,
            &b.content_hash,
            &b.participant_id,
        ))
    });
    records
}
