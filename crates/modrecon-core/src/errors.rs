use crate::dedup::DuplicateGroup;
use modrecon_errors::{ExError, ExErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ReconError
pub type Result<T> = std::result::Result<T, ReconError>;

/// Error taxonomy for a reconciliation run
///
/// Every variant is fatal for the run. Entry-level corruption is not an
/// error; see [`crate::normalize::CorruptEntryWarning`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReconError {
    // ===== Input Set Errors =====
    /// The data directory holds no manifest at all
    #[error("No manifest files found in {}", data_dir.display())]
    NoManifestsFound { data_dir: PathBuf },

    /// Fewer than two manifests were discovered
    #[error("Not enough manifests to compare: found {found}, need at least 2")]
    InsufficientInput { found: usize, files: Vec<String> },

    /// The designated host matches no discovered participant
    #[error("Host '{host}' not found among participants: {participants:?}")]
    MissingHost {
        host: String,
        participants: Vec<String>,
    },

    /// Two discovered files derive the same participant identity
    #[error("Participant '{participant}' is derived from several files: {paths:?}")]
    ParticipantCollision {
        participant: String,
        paths: Vec<String>,
    },

    /// Two or more manifests are identical after canonicalization
    #[error("Duplicate manifests found: {}", describe_groups(groups))]
    DuplicateManifest { groups: Vec<DuplicateGroup> },

    // ===== Structural Errors =====
    /// A manifest cannot be parsed into the expected nested shape
    #[error("Malformed manifest for '{participant}' ({path}): {reason}")]
    MalformedManifest {
        participant: String,
        path: String,
        reason: String,
    },

    // ===== Generic Errors =====
    /// Filesystem access failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error (JSON encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl ReconError {
    /// Stable kind of this error in the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            ReconError::NoManifestsFound { .. } | ReconError::InsufficientInput { .. } => {
                ExErrorKind::InsufficientInput
            }
            ReconError::MissingHost { .. } => ExErrorKind::MissingHost,
            ReconError::ParticipantCollision { .. } => ExErrorKind::InvalidInput,
            ReconError::DuplicateManifest { .. } => ExErrorKind::DuplicateManifest,
            ReconError::MalformedManifest { .. } => ExErrorKind::MalformedManifest,
            ReconError::Io { .. } => ExErrorKind::Io,
            ReconError::Serialization { .. } => ExErrorKind::Serialization,
        }
    }

    pub(crate) fn malformed(
        participant: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ReconError::MalformedManifest {
            participant: participant.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn describe_groups(groups: &[DuplicateGroup]) -> String {
    groups
        .iter()
        .map(|g| format!("[{}]", g.participants.join(", ")))
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<serde_json::Error> for ReconError {
    fn from(err: serde_json::Error) -> Self {
        ReconError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from ReconError to ExError
///
/// Attaches the participants, paths and remediation hint the CLI prints.
impl From<ReconError> for ExError {
    fn from(err: ReconError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            ReconError::NoManifestsFound { data_dir } => ExError::new(kind)
                .with_op("load_manifests")
                .with_path(data_dir.display().to_string())
                .with_message(message)
                .with_hint(format!(
                    "Is the data folder empty? Put one state backup per player in {}",
                    data_dir.display()
                )),

            ReconError::InsufficientInput { files, .. } => ExError::new(kind)
                .with_op("load_manifests")
                .with_participants(files)
                .with_message(message)
                .with_hint("o.O? You need at least 2 files to compare."),

            ReconError::MissingHost { host, participants } => ExError::new(kind)
                .with_op("resolve_host")
                .with_participant(host)
                .with_participants(participants.clone())
                .with_message(message)
                .with_hint(format!(
                    "Host's file not found in the list of files; pick one of: {}",
                    participants.join(", ")
                )),

            ReconError::ParticipantCollision { participant, paths } => ExError::new(kind)
                .with_op("load_manifests")
                .with_participant(participant)
                .with_participants(paths)
                .with_message(message)
                .with_hint("Rename the files so every player name (text before the first '.') is unique."),

            ReconError::DuplicateManifest { groups } => {
                let involved: Vec<String> = groups
                    .iter()
                    .flat_map(|g| g.participants.iter().cloned())
                    .collect();
                let listing = serde_json::to_string_pretty(&groups).unwrap_or_default();
                ExError::new(kind)
                    .with_op("dedup_check")
                    .with_participants(involved)
                    .with_message(message)
                    .with_hint(format!(
                        "You have probably duplicated the following: {}",
                        listing
                    ))
            }

            ReconError::MalformedManifest {
                participant, path, ..
            } => ExError::new(kind)
                .with_op("parse_manifest")
                .with_participant(participant)
                .with_path(path)
                .with_message(message),

            ReconError::Io { path, .. } => ExError::new(kind)
                .with_op("read")
                .with_hint(format!("Check that {} exists and is readable.", path))
                .with_path(path)
                .with_message(message),

            ReconError::Serialization { .. } => ExError::new(kind).with_message(message),
        }
    }
}
