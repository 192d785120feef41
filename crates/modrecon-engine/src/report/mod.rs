//! Per-participant report files.
//!
//! Every writer emits the same table: a 1-based `issue` sequence, the
//! participant, then the reported mod columns. Empty reports produce no file.
//!
//! A run replaces every `conflicts_<participant>.*` file of the participants
//! it covers, so a player who is now clean loses the old report. New files
//! are written under a hidden staging name and moved into place only after
//! every writer succeeded.

pub mod csv;
pub mod html;
pub mod xlsx;

use crate::config::OutputFormat;
use modrecon_core::DiffReport;
use modrecon_errors::{ExError, ExErrorKind, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Report columns, in order
pub const REPORT_COLUMNS: [&str; 9] = [
    "issue",
    "player",
    "fileName",
    "fileMD5",
    "customFileName",
    "modName",
    "modVersion",
    "version",
    "homepage",
];

pub type TableRow = [String; 9];

/// Report table body, one row per diff row
pub fn table_rows(report: &DiffReport) -> Vec<TableRow> {
    report
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            [
                (i + 1).to_string(),
                report.participant.to_string(),
                row.file_name.clone(),
                row.content_hash.clone(),
                row.custom_file_name.clone(),
                row.mod_name.clone(),
                row.mod_version.clone(),
                row.version.clone(),
                row.homepage.clone(),
            ]
        })
        .collect()
}

/// A report file format
pub trait ReportWriter {
    fn format(&self) -> OutputFormat;

    /// Write `report` to `path`, replacing any previous file
    ///
    /// # Errors
    ///
    /// Returns `Report` when the file cannot be produced.
    fn write(&self, report: &DiffReport, path: &Path) -> Result<()>;
}

pub fn writer_for(format: OutputFormat) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Xlsx => Box::new(self::xlsx::XlsxReportWriter),
        OutputFormat::Csv => Box::new(self::csv::CsvReportWriter),
        OutputFormat::Html => Box::new(self::html::HtmlReportWriter),
    }
}

/// `<output_dir>/conflicts_<participant>.<ext>`
pub fn report_path(output_dir: &Path, report: &DiffReport, format: OutputFormat) -> PathBuf {
    output_dir.join(report_file_name(report, format))
}

fn report_file_name(report: &DiffReport, format: OutputFormat) -> String {
    format!("conflicts_{}.{}", report.participant, format.extension())
}

/// Hidden sibling a report is written to before it is moved into place
fn staging_path(output_dir: &Path, report: &DiffReport, format: OutputFormat) -> PathBuf {
    output_dir.join(format!(".{}.tmp", report_file_name(report, format)))
}

/// Write every non-empty report; returns the written paths
///
/// Earlier reports of every participant in `reports` are removed first,
/// whatever their format. On failure no new report file is left behind.
///
/// # Errors
///
/// Returns `Report` on the first report that cannot be removed, written or
/// moved into place.
pub fn write_reports(
    reports: &[DiffReport],
    output_dir: &Path,
    format: OutputFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| {
        report_error(output_dir, format!("cannot create output folder: {}", e))
    })?;

    for report in reports {
        remove_previous(output_dir, report)?;
    }

    let writer = writer_for(format);
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();
    for report in reports.iter().filter(|r| !r.is_empty()) {
        let staging = staging_path(output_dir, report, writer.format());
        if let Err(e) = writer.write(report, &staging) {
            discard(staged.iter().map(|(tmp, _)| tmp).chain([&staging]));
            return Err(e.with_participant(report.participant.to_string()));
        }
        staged.push((staging, report_path(output_dir, report, writer.format())));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (i, (staging, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(staging, path) {
            discard(written.iter().chain(staged[i..].iter().map(|(tmp, _)| tmp)));
            return Err(report_error(path, format!("cannot move report into place: {}", e)));
        }
        written.push(path.clone());
    }
    Ok(written)
}

fn remove_previous(output_dir: &Path, report: &DiffReport) -> Result<()> {
    for format in OutputFormat::ALL {
        let path = report_path(output_dir, report, format);
        match fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed previous report"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(report_error(&path, format!("cannot remove previous report: {}", e))
                    .with_participant(report.participant.to_string()));
            }
        }
    }
    Ok(())
}

/// Best-effort removal of files left by an aborted write
fn discard<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

pub(crate) fn report_error(path: &Path, message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Report)
        .with_op("write_report")
        .with_path(path.display().to_string())
        .with_message(message)
}
