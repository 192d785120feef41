//! Canonical schema constants for structured logging and events
//!
//! Field names emitted by the lifecycle macros and the pipeline. `tracing`
//! takes field names as identifiers, so emitters spell them out and readers
//! of captured events (the capture layer, tests) look them up through these
//! constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Entity identifiers
pub const FIELD_PARTICIPANT: &str = "participant";
pub const FIELD_HOST: &str = "host";
pub const FIELD_ENTRY_KEY: &str = "entry_key";

// Collection sizes
pub const FIELD_MANIFEST_COUNT: &str = "manifest_count";
pub const FIELD_LEDGER_LEN: &str = "ledger_len";
pub const FIELD_CONFLICT_COUNT: &str = "conflict_count";
pub const FIELD_ISSUE_COUNT: &str = "issue_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_CORRUPT_ENTRY: &str = "corrupt_entry";
