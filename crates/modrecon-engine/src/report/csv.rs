use crate::config::OutputFormat;
use crate::report::{report_error, table_rows, ReportWriter, REPORT_COLUMNS};
use modrecon_core::DiffReport;
use modrecon_errors::Result;
use std::path::Path;

/// Comma-separated report with a header row
pub struct CsvReportWriter;

impl ReportWriter for CsvReportWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn write(&self, report: &DiffReport, path: &Path) -> Result<()> {
        let mut writer =
            ::csv::Writer::from_path(path).map_err(|e| report_error(path, e.to_string()))?;
        writer
            .write_record(REPORT_COLUMNS)
            .map_err(|e| report_error(path, e.to_string()))?;
        for row in table_rows(report) {
            writer
                .write_record(&row)
                .map_err(|e| report_error(path, e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| report_error(path, e.to_string()))
    }
}
