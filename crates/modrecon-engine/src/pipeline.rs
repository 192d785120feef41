//! Reconciliation run orchestration.
//!
//! ## Pipeline (in order):
//! 1. Ensure the data folder exists
//! 2. Load manifests and resolve the host
//! 3. Reconcile (duplicate check, normalization, presence, diffs)
//! 4. Write one report per participant with issues
//!
//! Any failure aborts the run before a report is written.
//!
//! ## Logging Ownership
//!
//! This layer owns lifecycle logging: `log_op_start!` / `log_op_end!` /
//! `log_op_error!` around each stage, plus one warning per skipped entry.
//! The core crate never logs.

use crate::config::ReconConfig;
use crate::report::write_reports;
use modrecon_core::manifest::{load_manifests, LoadedManifests};
use modrecon_core::{reconcile, ReconciliationOutcome};
use modrecon_core_types::RunId;
use modrecon_errors::{ExError, ExErrorKind, Result};
use modrecon_logging::{log_op_end, log_op_error, log_op_start};
use std::path::PathBuf;
use std::time::Instant;

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    pub outcome: ReconciliationOutcome,
    /// Report files written, in participant order
    pub written: Vec<PathBuf>,
}

/// Run the whole pipeline for `host`
///
/// # Errors
///
/// Returns the first fatal error of any stage, tagged with the run id.
pub fn run(config: &ReconConfig, host: &str) -> Result<RunReport> {
    let run_id = RunId::new();
    log_op_start!(
        "reconcile_run",
        run_id = run_id.as_str(),
        host = host,
        data_dir = %config.data_dir.display()
    );
    let start = Instant::now();

    match run_stages(config, host, &run_id) {
        Ok(report) => {
            log_op_end!(
                "reconcile_run",
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = run_id.as_str(),
                issue_count = report.outcome.issue_count()
            );
            Ok(report)
        }
        Err(e) => {
            let e = e.with_run_id(run_id.clone());
            log_op_error!(
                "reconcile_run",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = run_id.as_str()
            );
            Err(e)
        }
    }
}

fn run_stages(config: &ReconConfig, host: &str, run_id: &RunId) -> Result<RunReport> {
    ensure_data_dir(config)?;

    let loaded = load_stage(config, host, run_id)?;
    let outcome = reconcile_stage(config, &loaded, run_id)?;

    for report in &outcome.reports {
        if report.is_empty() {
            tracing::info!(
                run_id = run_id.as_str(),
                participant = report.participant.as_str(),
                "no conflicts"
            );
        } else {
            tracing::info!(
                run_id = run_id.as_str(),
                participant = report.participant.as_str(),
                issue_count = report.len(),
                "conflicts found"
            );
        }
    }

    let written = write_stage(config, &outcome, run_id)?;
    Ok(RunReport {
        run_id: run_id.clone(),
        outcome,
        written,
    })
}

/// Create the data folder on first use so the user sees where files go
fn ensure_data_dir(config: &ReconConfig) -> Result<()> {
    if config.data_dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(&config.data_dir).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("ensure_data_dir")
            .with_path(config.data_dir.display().to_string())
            .with_message(format!("cannot create data folder: {}", e))
    })?;
    tracing::debug!(path = %config.data_dir.display(), "created data folder");
    Ok(())
}

fn load_stage(config: &ReconConfig, host: &str, run_id: &RunId) -> Result<LoadedManifests> {
    log_op_start!("load_manifests", run_id = run_id.as_str());
    let start = Instant::now();

    let loaded = load_manifests(&config.data_dir, host).map_err(|e| {
        let e = ExError::from(e);
        log_op_error!(
            "load_manifests",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = run_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "load_manifests",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = run_id.as_str(),
        manifest_count = loaded.manifests.len(),
        host = loaded.host.as_str()
    );
    Ok(loaded)
}

fn reconcile_stage(
    config: &ReconConfig,
    loaded: &LoadedManifests,
    run_id: &RunId,
) -> Result<ReconciliationOutcome> {
    log_op_start!(
        "reconcile",
        run_id = run_id.as_str(),
        game = config.game_key.as_str()
    );
    let start = Instant::now();

    let outcome = reconcile(&loaded.manifests, &loaded.host, &config.game_key).map_err(|e| {
        let e = ExError::from(e);
        log_op_error!(
            "reconcile",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = run_id.as_str()
        );
        e
    })?;

    for warning in &outcome.warnings {
        tracing::warn!(
            run_id = run_id.as_str(),
            event = modrecon_core_types::schema::EVENT_CORRUPT_ENTRY,
            participant = warning.participant.as_str(),
            entry_key = warning.entry_key.as_str(),
            code = warning.code(),
            "skipped corrupt entry: {}",
            warning.reason
        );
    }

    log_op_end!(
        "reconcile",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = run_id.as_str(),
        ledger_len = outcome.ledger.len(),
        conflict_count = outcome.conflict_set.len()
    );
    Ok(outcome)
}

fn write_stage(
    config: &ReconConfig,
    outcome: &ReconciliationOutcome,
    run_id: &RunId,
) -> Result<Vec<PathBuf>> {
    log_op_start!(
        "write_reports",
        run_id = run_id.as_str(),
        format = %config.format
    );
    let start = Instant::now();

    let written = write_reports(&outcome.reports, &config.output_dir, config.format).map_err(|e| {
        log_op_error!(
            "write_reports",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = run_id.as_str()
        );
        e
    })?;

    for path in &written {
        tracing::info!(run_id = run_id.as_str(), path = %path.display(), "report written");
    }
    log_op_end!(
        "write_reports",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = run_id.as_str(),
        report_count = written.len()
    );
    Ok(written)
}
