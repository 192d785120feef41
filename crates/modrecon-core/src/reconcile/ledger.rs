use crate::model::{ModRecord, ParticipantId};
use crate::normalize::NormalizedManifest;

/// All participants' records of one run
///
/// Built once from the normalized manifests and never mutated. The
/// participant list is explicit so a participant without any record still
/// takes part in presence counting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    participants: Vec<ParticipantId>,
    records: Vec<ModRecord>,
}

impl Ledger {
    /// Concatenate normalized manifests in participant order
    pub fn build(normalized: &[NormalizedManifest]) -> Self {
        let mut ordered: Vec<&NormalizedManifest> = normalized.iter().collect();
        ordered.sort_by(|a, b| a.participant.cmp(&b.participant));

        let participants = ordered.iter().map(|n| n.participant.clone()).collect();
        let records = ordered
            .into_iter()
            .flat_map(|n| n.records.iter().cloned())
            .collect();
        Self {
            participants,
            records,
        }
    }

    pub fn from_parts(mut participants: Vec<ParticipantId>, records: Vec<ModRecord>) -> Self {
        participants.sort();
        participants.dedup();
        Self {
            participants,
            records,
        }
    }

    /// Participants, sorted
    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn records(&self) -> &[ModRecord] {
        &self.records
    }

    pub fn records_for<'a>(
        &'a self,
        participant: &'a ParticipantId,
    ) -> impl Iterator<Item = &'a ModRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| &r.participant_id == participant)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
