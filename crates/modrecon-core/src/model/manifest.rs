use crate::model::ParticipantId;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Raw manifest document of one participant
///
/// Read once at startup and never mutated. The content is kept opaque
/// until the normalizer projects it onto [`crate::ModRecord`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    participant: ParticipantId,
    path: PathBuf,
    raw_content: Value,
}

impl Manifest {
    pub fn new(participant: ParticipantId, path: impl Into<PathBuf>, raw_content: Value) -> Self {
        Self {
            participant,
            path: path.into(),
            raw_content,
        }
    }

    pub fn participant(&self) -> &ParticipantId {
        &self.participant
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw_content(&self) -> &Value {
        &self.raw_content
    }
}
