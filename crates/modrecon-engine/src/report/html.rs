use crate::config::OutputFormat;
use crate::report::{report_error, table_rows, ReportWriter, REPORT_COLUMNS};
use modrecon_core::DiffReport;
use modrecon_errors::Result;
use std::path::Path;

/// Standalone HTML page holding one table
pub struct HtmlReportWriter;

impl ReportWriter for HtmlReportWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn write(&self, report: &DiffReport, path: &Path) -> Result<()> {
        std::fs::write(path, render_html(report)).map_err(|e| report_error(path, e.to_string()))
    }
}

pub fn render_html(report: &DiffReport) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>Conflicts for {}</title>\n</head>\n<body>\n",
        escape(report.participant.as_str())
    ));
    out.push_str("<table border=\"1\">\n<thead>\n<tr>");
    for title in REPORT_COLUMNS {
        out.push_str(&format!("<th>{}</th>", title));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in table_rows(report) {
        out.push_str("<tr>");
        for cell in &row {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
