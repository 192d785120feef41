//! Host-relative diff reports.
//!
//! - [`model`]: `DiffRow`, `DiffReport`
//! - [`differ`]: installed-key sets and per-participant reports
//! - [`summary`]: Markdown rendering of a whole run

pub mod differ;
pub mod model;
pub mod summary;

pub use differ::{compute_diff_reports, diff_for_participant, diff_keys, installed_keys};
pub use model::{DiffReport, DiffRow};
pub use summary::render_summary;
