//! modrecon Engine - run orchestration
//!
//! Coordinates the pure reconciliation core with configuration, logging and
//! the report writers.

pub mod config;
pub mod pipeline;
pub mod report;

pub use config::{ConfigOverrides, LoggingConfig, OutputFormat, ReconConfig};
pub use pipeline::{run, RunReport};
pub use report::{write_reports, ReportWriter, REPORT_COLUMNS};
