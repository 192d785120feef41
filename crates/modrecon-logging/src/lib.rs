//! Structured logging facility for modrecon
//!
//! This crate provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - An optional dated log file next to the console output
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use modrecon_logging::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error
//!
//! Only the orchestration layer logs operation boundaries. The reconciliation
//! core returns warnings and errors as values and never logs by itself.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, init_with_log_dir, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

// Re-exported for macro expansion in downstream crates
#[doc(hidden)]
pub use modrecon_core_types as core_types;
#[doc(hidden)]
pub use modrecon_errors::ExError;
#[doc(hidden)]
pub use tracing;
