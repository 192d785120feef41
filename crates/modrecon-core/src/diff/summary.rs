//! Markdown summary of a reconciliation run.

use crate::reconcile::ReconciliationOutcome;

/// Render a Markdown summary of `outcome`
///
/// Informational only; the report files are the actual output.
pub fn render_summary(outcome: &ReconciliationOutcome) -> String {
    let mut out = String::new();

    out.push_str("## Mod Reconciliation\n\n");
    let participants: Vec<&str> = outcome.participants.iter().map(|p| p.as_str()).collect();
    out.push_str(&format!(
        "**Host**: {}  \n**Participants** ({}): {}  \n**Records**: {}  \n**Conflicting hashes**: {}\n\n",
        outcome.host,
        participants.len(),
        participants.join(", "),
        outcome.ledger.len(),
        outcome.conflict_set.len(),
    ));

    if !outcome.warnings.is_empty() {
        out.push_str(&format!(
            "### Skipped Entries ({})\n\n",
            outcome.warnings.len()
        ));
        for warning in &outcome.warnings {
            out.push_str(&format!(
                "- `{}` in {}: {}\n",
                warning.entry_key, warning.participant, warning.reason
            ));
        }
        out.push('\n');
    }

    if outcome.issue_count() == 0 {
        out.push_str("_No conflicts detected._\n");
        return out;
    }

    for report in &outcome.reports {
        out.push_str(&format!("### {}\n\n", report.participant));
        if report.is_empty() {
            out.push_str("_No conflicts._\n\n");
            continue;
        }
        out.push_str("| # | Custom File Name | Mod | Version | Homepage |\n|---|---|---|---|---|\n");
        for (i, row) in report.rows.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                i + 1,
                cell(&row.custom_file_name),
                cell(&row.mod_name),
                cell(&row.mod_version),
                cell(&row.homepage),
            ));
        }
        out.push('\n');
    }

    out
}

/// Escape pipes so a value cannot break the table
fn cell(value: &str) -> String {
    value.replace('|', "\\|")
}
