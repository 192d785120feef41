//! Record normalization.
//!
//! Flattens a manifest's nested mod entries into [`ModRecord`]s in two
//! explicit passes: discover the manifest-local attribute schema, then
//! project every entry onto the fixed record shape.
//!
//! An entry whose value or attribute payload is not a mapping is a known
//! upstream corruption. It is skipped and reported as a
//! [`CorruptEntryWarning`]; it never aborts the run. A manifest whose mod
//! table cannot be located at all is a fatal `MalformedManifest`.

pub mod project;
pub mod schema;

pub use schema::ManifestSchema;

use crate::errors::{ReconError, Result};
use crate::manifest::format::{locate_mod_table, type_name, ATTRIBUTES_KEY};
use crate::model::{Manifest, ModRecord, ParticipantId};
use modrecon_errors::ExErrorKind;
use project::FlatEntry;
use serde::Serialize;

/// A mod entry skipped because it has no valid attribute mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorruptEntryWarning {
    pub participant: ParticipantId,
    /// Key of the entry inside the game section
    pub entry_key: String,
    pub reason: String,
}

impl CorruptEntryWarning {
    pub fn code(&self) -> &'static str {
        ExErrorKind::CorruptEntry.code()
    }
}

impl std::fmt::Display for CorruptEntryWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] skipped entry '{}' of '{}': {}",
            self.code(),
            self.entry_key,
            self.participant,
            self.reason
        )
    }
}

/// Normalization result for one manifest
#[derive(Debug, Clone)]
pub struct NormalizedManifest {
    pub participant: ParticipantId,
    pub schema: ManifestSchema,
    /// Ordered by content hash (missing last), then entry key
    pub records: Vec<ModRecord>,
    pub warnings: Vec<CorruptEntryWarning>,
}

/// Normalize one manifest's entries for `game_key`
///
/// # Errors
///
/// Returns `MalformedManifest` if the mod table cannot be located or has no
/// mapping for `game_key`.
pub fn normalize_manifest(manifest: &Manifest, game_key: &str) -> Result<NormalizedManifest> {
    let participant = manifest.participant();
    let malformed = |reason: String| {
        ReconError::malformed(
            participant.as_str(),
            manifest.path().display().to_string(),
            reason,
        )
    };

    let table = locate_mod_table(manifest.raw_content()).map_err(malformed)?;
    let game_mods = match table.get(game_key) {
        Some(section) => section.as_object().ok_or_else(|| {
            malformed(format!(
                "game section `{}` must be an object, found {}",
                game_key,
                type_name(section)
            ))
        })?,
        None => return Err(malformed(format!("mod table has no `{}` section", game_key))),
    };

    // Pass 1: manifest-local schema
    let schema = ManifestSchema::discover(game_mods.values());

    // Pass 2: projection
    let mut keyed: Vec<(&str, ModRecord)> = Vec::with_capacity(game_mods.len());
    let mut warnings = Vec::new();
    for (entry_key, entry) in game_mods {
        let corrupt = |reason: String| CorruptEntryWarning {
            participant: participant.clone(),
            entry_key: entry_key.clone(),
            reason,
        };

        let Some(entry_map) = entry.as_object() else {
            warnings.push(corrupt(format!(
                "entry is not a mapping, found {}",
                type_name(entry)
            )));
            continue;
        };
        let attributes = match entry_map.get(ATTRIBUTES_KEY) {
            Some(serde_json::Value::Object(attributes)) => attributes,
            Some(other) => {
                warnings.push(corrupt(format!(
                    "attribute payload is not a mapping, found {}",
                    type_name(other)
                )));
                continue;
            }
            None => {
                warnings.push(corrupt("entry has no attribute payload".to_string()));
                continue;
            }
        };

        let flat = FlatEntry {
            entry: entry_map,
            attributes,
        };
        let record = flat.project(&schema, participant);
        if !record.is_empty() {
            keyed.push((entry_key.as_str(), record));
        }
    }

    keyed.sort_by(|(a_key, a), (b_key, b)| {
        (a.content_hash.is_none(), &a.content_hash, a_key).cmp(&(
            b.content_hash.is_none(),
            &b.content_hash,
            b_key,
        ))
    });

    Ok(NormalizedManifest {
        participant: participant.clone(),
        schema,
        records: keyed.into_iter().map(|(_, record)| record).collect(),
        warnings,
    })
}
