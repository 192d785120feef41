//! Host-relative diff computation.
//!
//! The host's installed set is the reference. For every other participant,
//! mods installed by them but not by the host (keyed on homepage, which is
//! stable across version drift) are reported, restricted to records whose
//! content hash is conflicting.

use crate::diff::model::{DiffReport, DiffRow};
use crate::model::{ModRecord, ParticipantId};
use crate::reconcile::{ConflictSet, Ledger};
use std::collections::BTreeSet;

/// Homepages of `participant`'s installed records
///
/// Records without a homepage contribute nothing.
pub fn installed_keys<'a>(ledger: &'a Ledger, participant: &ParticipantId) -> BTreeSet<&'a str> {
    ledger
        .records()
        .iter()
        .filter(|r| &r.participant_id == participant && r.is_installed())
        .filter_map(|r| r.homepage_url.as_deref())
        .collect()
}

/// Keys installed by the participant and not by the host
pub fn diff_keys<'a>(
    participant_keys: &BTreeSet<&'a str>,
    host_keys: &BTreeSet<&str>,
) -> BTreeSet<&'a str> {
    participant_keys
        .iter()
        .filter(|key| !host_keys.contains(*key))
        .copied()
        .collect()
}

/// Diff report of `participant` against `host`
pub fn diff_for_participant(
    ledger: &Ledger,
    conflicts: &ConflictSet,
    host: &ParticipantId,
    participant: &ParticipantId,
) -> DiffReport {
    let host_keys = installed_keys(ledger, host);
    let keys = diff_keys(&installed_keys(ledger, participant), &host_keys);

    let mut rows: Vec<DiffRow> = ledger
        .records_for(participant)
        .filter(|r| is_reportable(r, &keys, conflicts))
        .filter_map(DiffRow::from_record)
        .collect();
    rows.sort_by(|a, b| {
        (&a.custom_file_name, &a.content_hash).cmp(&(&b.custom_file_name, &b.content_hash))
    });

    DiffReport {
        participant: participant.clone(),
        host: host.clone(),
        rows,
    }
}

fn is_reportable(record: &ModRecord, keys: &BTreeSet<&str>, conflicts: &ConflictSet) -> bool {
    let in_diff = record
        .homepage_url
        .as_deref()
        .is_some_and(|h| keys.contains(h));
    let conflicting = record
        .content_hash
        .as_deref()
        .is_some_and(|h| conflicts.contains(h));
    in_diff && conflicting
}

/// One report per non-host participant, in participant order
pub fn compute_diff_reports(
    ledger: &Ledger,
    conflicts: &ConflictSet,
    host: &ParticipantId,
) -> Vec<DiffReport> {
    ledger
        .participants()
        .iter()
        .filter(|p| *p != host)
        .map(|p| diff_for_participant(ledger, conflicts, host, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstallState;

    fn installed(participant: &str, homepage: &str) -> ModRecord {
        let mut r = ModRecord::empty(ParticipantId::from(participant));
        r.homepage_url = Some(homepage.to_string());
        r.install_state = Some(InstallState::Installed);
        r
    }

    #[test]
    fn test_diff_keys_is_set_difference() {
        let host: BTreeSet<&str> = ["a", "b", "c"].into_iter().collect();
        let player: BTreeSet<&str> = ["b", "c", "d"].into_iter().collect();

        let keys = diff_keys(&player, &host);
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["d"]);
    }

    #[test]
    fn test_installed_keys_skip_disabled_and_missing_homepage() {
        let mut disabled = installed("alice", "h2");
        disabled.install_state = Some(InstallState::Disabled);
        let mut no_homepage = installed("alice", "unused");
        no_homepage.homepage_url = None;

        let ledger = Ledger::from_parts(
            vec![ParticipantId::from("alice")],
            vec![installed("alice", "h1"), disabled, no_homepage],
        );

        let keys = installed_keys(&ledger, &ParticipantId::from("alice"));
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["h1"]);
    }

    #[test]
    fn test_host_gets_no_report() {
        let ledger = Ledger::from_parts(
            vec![ParticipantId::from("alice"), ParticipantId::from("bob")],
            Vec::new(),
        );
        let reports =
            compute_diff_reports(&ledger, &ConflictSet::default(), &ParticipantId::from("alice"));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].participant.as_str(), "bob");
        assert!(reports[0].is_empty());
    }
}
