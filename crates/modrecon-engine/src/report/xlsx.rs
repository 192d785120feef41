//! Spreadsheet report: one worksheet named after the participant.

use crate::config::OutputFormat;
use crate::report::{report_error, table_rows, ReportWriter, REPORT_COLUMNS};
use modrecon_core::DiffReport;
use modrecon_errors::Result;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

/// Longest worksheet name the format accepts
const MAX_SHEET_NAME: usize = 31;

pub struct XlsxReportWriter;

impl ReportWriter for XlsxReportWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xlsx
    }

    fn write(&self, report: &DiffReport, path: &Path) -> Result<()> {
        build_workbook(report, path).map_err(|e| report_error(path, e.to_string()))
    }
}

fn build_workbook(report: &DiffReport, path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name(report.participant.as_str()))?;

    for (col, title) in (0u16..).zip(REPORT_COLUMNS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, cells) in (1u32..).zip(table_rows(report)) {
        for (col, value) in (0u16..).zip(cells.iter()) {
            sheet.write_string(row, col, value)?;
        }
    }
    sheet.autofit();

    workbook.save(path)
}

/// Participant name made acceptable as a worksheet name
fn sheet_name(participant: &str) -> String {
    let cleaned: String = participant
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .take(MAX_SHEET_NAME)
        .collect();
    let trimmed = cleaned.trim_matches('\'');
    if trimmed.is_empty() {
        "conflicts".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_name_replaces_forbidden_characters() {
        assert_eq!(sheet_name("bob"), "bob");
        assert_eq!(sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sheet_name("''"), "conflicts");
        assert_eq!(sheet_name(&"x".repeat(40)).len(), 31);
    }
}
