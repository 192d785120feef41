//! Canonical error facility for modrecon
//!
//! [`ExError`] is the structured error every fatal pipeline failure is
//! reported through. Each [`ExErrorKind`] maps to a stable code and to a
//! default remediation hint, so the CLI can always print a diagnostic plus
//! an actionable suggestion.

use modrecon_core_types::RunId;
use serde_json::{json, Value};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised while reconciling manifests. Each kind maps to a stable error code
/// that can be used for programmatic handling and in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Input set
    /// Fewer than two manifests were discovered
    InsufficientInput,
    /// The designated host does not match any discovered participant
    MissingHost,
    /// Two or more manifests are identical after canonicalization
    DuplicateManifest,
    /// A manifest cannot be parsed into the expected nested shape
    MalformedManifest,
    /// A single mod entry lacks a valid attribute mapping (non-fatal)
    CorruptEntry,
    /// Generic invalid input (e.g. two files mapping to one participant)
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Config,
    Report,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InsufficientInput => "ERR_INSUFFICIENT_INPUT",
            ExErrorKind::MissingHost => "ERR_MISSING_HOST",
            ExErrorKind::DuplicateManifest => "ERR_DUPLICATE_MANIFEST",
            ExErrorKind::MalformedManifest => "ERR_MALFORMED_MANIFEST",
            ExErrorKind::CorruptEntry => "ERR_CORRUPT_ENTRY",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Report => "ERR_REPORT",
        }
    }

    /// Default remediation hint shown when no more specific hint was attached
    pub fn default_hint(&self) -> &'static str {
        match self {
            ExErrorKind::InsufficientInput => "You need at least 2 manifest files to compare.",
            ExErrorKind::MissingHost => {
                "Pass the file name of the host's state backup, with or without `.json`."
            }
            ExErrorKind::DuplicateManifest => {
                "The same state backup was copied under several names; keep one copy per player."
            }
            ExErrorKind::MalformedManifest => {
                "Is the file a Vortex state backup (%APPDATA%\\Vortex\\temp\\state_backups_full\\settings.json)?"
            }
            ExErrorKind::CorruptEntry => "The entry was skipped; reinstalling the mod usually repairs it.",
            ExErrorKind::InvalidInput => "Check the files in the data folder.",
            ExErrorKind::Io => "Check that the path exists and is readable.",
            ExErrorKind::Serialization => "The data could not be encoded; please report this.",
            ExErrorKind::Config => "Check the configuration file syntax.",
            ExErrorKind::Report => "Check that the output folder is writable.",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for
/// the user-facing diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    participant: Option<String>,
    participants: Vec<String>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
    hint: Option<String>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            participant: None,
            participants: Vec::new(),
            path: None,
            run_id: None,
            message: String::new(),
            hint: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the participant the error is about
    pub fn with_participant(mut self, participant: impl Into<String>) -> Self {
        self.participant = Some(participant.into());
        self
    }

    /// Add every participant identity involved (e.g. a duplicate group)
    pub fn with_participants(mut self, participants: Vec<String>) -> Self {
        self.participants = participants;
        self
    }

    /// Add the filesystem path involved
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add run correlation
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach a specific remediation hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn participant(&self) -> Option<&str> {
        self.participant.as_deref()
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attached hint, or the kind's default hint
    pub fn hint(&self) -> &str {
        self.hint
            .as_deref()
            .unwrap_or_else(|| self.kind.default_hint())
    }

    /// Structured form of the error
    pub fn to_json(&self) -> Value {
        json!({
            "code": self.code(),
            "op": self.op,
            "participant": self.participant,
            "participants": self.participants,
            "path": self.path,
            "run_id": self.run_id.as_ref().map(|r| r.as_str()),
            "message": self.message,
            "hint": self.hint(),
        })
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(participant) = &self.participant {
            write!(f, " (participant: {})", participant)?;
        }
        if !self.participants.is_empty() {
            write!(f, " (participants: {})", self.participants.join(", "))?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

impl From<std::io::Error> for ExError {
    fn from(err: std::io::Error) -> Self {
        ExError::new(ExErrorKind::Io).with_message(err.to_string())
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
