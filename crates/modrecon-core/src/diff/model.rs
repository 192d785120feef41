//! Host-relative diff output types.
//!
//! Rows carry only the columns a player needs to fix their install; the
//! administrative fields of [`crate::ModRecord`] are dropped.

use crate::model::{ModRecord, ParticipantId};
use serde::{Deserialize, Serialize};

/// One reportable mod file of a participant
///
/// Every field is required; a record with any of them missing is not
/// reportable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiffRow {
    /// Row key only, not a report data column
    #[serde(rename = "fileMD5")]
    pub content_hash: String,
    #[serde(rename = "customFileName")]
    pub custom_file_name: String,
    #[serde(rename = "modName")]
    pub mod_name: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "modVersion")]
    pub mod_version: String,
    pub version: String,
    pub homepage: String,
}

impl DiffRow {
    /// Project a record onto the report columns
    ///
    /// Returns `None` when any reported field is null.
    pub fn from_record(record: &ModRecord) -> Option<Self> {
        Some(Self {
            content_hash: record.content_hash.clone()?,
            custom_file_name: record.custom_file_name.clone()?,
            mod_name: record.mod_name.clone()?,
            file_name: record.file_name.clone()?,
            mod_version: record.mod_version.clone()?,
            version: record.version.clone()?,
            homepage: record.homepage_url.clone()?,
        })
    }
}

/// Diff of one non-host participant against the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub participant: ParticipantId,
    pub host: ParticipantId,
    /// Sorted by custom file name
    pub rows: Vec<DiffRow>,
}

impl DiffReport {
    /// True for the "no conflicts" outcome
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
