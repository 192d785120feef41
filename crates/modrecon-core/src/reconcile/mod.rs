//! Multi-party reconciliation.
//!
//! [`reconcile`] runs the pure part of the pipeline over loaded manifests:
//! duplicate check, normalization, ledger, presence classification and the
//! host-relative diffs. It is a pure function of its inputs.

pub mod ledger;
pub mod presence;

pub use ledger::Ledger;
pub use presence::{conflicting_records, ConflictSet, PresenceTable};

use crate::dedup::check_duplicates;
use crate::diff::{compute_diff_reports, DiffReport};
use crate::errors::{ReconError, Result};
use crate::model::{Manifest, ModRecord, ParticipantId};
use crate::normalize::{normalize_manifest, CorruptEntryWarning, NormalizedManifest};

/// Result of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconciliationOutcome {
    pub host: ParticipantId,
    /// Sorted
    pub participants: Vec<ParticipantId>,
    pub ledger: Ledger,
    pub presence: PresenceTable,
    pub conflict_set: ConflictSet,
    pub conflicting_records: Vec<ModRecord>,
    /// One per non-host participant, in participant order
    pub reports: Vec<DiffReport>,
    pub warnings: Vec<CorruptEntryWarning>,
}

impl ReconciliationOutcome {
    /// Total rows over all reports
    pub fn issue_count(&self) -> usize {
        self.reports.iter().map(DiffReport::len).sum()
    }

    pub fn report_for(&self, participant: &ParticipantId) -> Option<&DiffReport> {
        self.reports.iter().find(|r| &r.participant == participant)
    }
}

/// Reconcile `manifests` against `host` for the mods of `game_key`
///
/// # Errors
///
/// - `MissingHost` if `host` owns none of the manifests
/// - `DuplicateManifest` if two manifests are identical after canonicalization
/// - `MalformedManifest` if a manifest has no usable mod table
pub fn reconcile(
    manifests: &[Manifest],
    host: &ParticipantId,
    game_key: &str,
) -> Result<ReconciliationOutcome> {
    if !manifests.iter().any(|m| m.participant() == host) {
        let mut participants: Vec<String> = manifests
            .iter()
            .map(|m| m.participant().to_string())
            .collect();
        participants.sort();
        return Err(ReconError::MissingHost {
            host: host.to_string(),
            participants,
        });
    }

    check_duplicates(manifests)?;

    let normalized = manifests
        .iter()
        .map(|m| normalize_manifest(m, game_key))
        .collect::<Result<Vec<NormalizedManifest>>>()?;

    let warnings = normalized
        .iter()
        .flat_map(|n| n.warnings.iter().cloned())
        .collect();

    let ledger = Ledger::build(&normalized);
    let presence = PresenceTable::build(&ledger);
    let conflict_set = presence.conflict_set();
    let conflicting_records = conflicting_records(&ledger, &conflict_set);
    let reports = compute_diff_reports(&ledger, &conflict_set, host);

    Ok(ReconciliationOutcome {
        host: host.clone(),
        participants: ledger.participants().to_vec(),
        ledger,
        presence,
        conflict_set,
        conflicting_records,
        reports,
        warnings,
    })
}
