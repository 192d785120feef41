//! modrecon Core - mod manifest reconciliation kernel
//!
//! This crate provides the pure reconciliation pipeline:
//! - Manifest discovery and loading with structural validation
//! - Content-addressed duplicate detection over canonical JSON
//! - Two-pass normalization of nested mod entries into [`ModRecord`]s
//! - Ledger construction, presence counting and conflict classification
//! - Host-relative diff reports and a Markdown summary
//!
//! Nothing in this crate logs. Recoverable problems (corrupt entries) are
//! returned as values, fatal ones as [`ReconError`].

pub mod dedup;
pub mod diff;
pub mod errors;
pub mod manifest;
pub mod model;
pub mod normalize;
pub mod reconcile;

// Re-export commonly used types
pub use diff::{DiffReport, DiffRow};
pub use errors::{ReconError, Result};
pub use model::{InstallState, Manifest, ModRecord, ParticipantId};
pub use normalize::CorruptEntryWarning;
pub use reconcile::{reconcile, ConflictSet, Ledger, PresenceTable, ReconciliationOutcome};
