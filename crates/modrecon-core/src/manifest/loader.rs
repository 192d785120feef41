//! Manifest loader with validation
//!
//! Discovers manifest files, checks the input set (count, host, identity
//! collisions) before reading any document, then parses each document and
//! validates that its mod table can be located. The first failure aborts the
//! load; a partially loaded input set is never returned.

use crate::errors::{ReconError, Result};
use crate::manifest::format::locate_mod_table;
use crate::model::{Manifest, ParticipantId};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MANIFEST_EXTENSION: &str = "json";

/// Manifests of one run plus the resolved host identity
#[derive(Debug, Clone)]
pub struct LoadedManifests {
    /// Ordered by participant identity
    pub manifests: Vec<Manifest>,
    pub host: ParticipantId,
}

/// Find every `*.json` file below `data_dir`, sorted by path
///
/// # Errors
///
/// Returns `Io` if the directory cannot be walked.
pub fn discover_manifest_paths(data_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(data_dir).follow_links(true) {
        let entry = entry.map_err(|e| ReconError::Io {
            path: data_dir.display().to_string(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() && has_manifest_extension(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
}

/// Map each path to its participant identity
///
/// # Errors
///
/// - `MalformedManifest` if a file name yields no identity
/// - `ParticipantCollision` if two files yield the same identity
fn assign_participants(paths: &[PathBuf]) -> Result<BTreeMap<ParticipantId, PathBuf>> {
    let mut assigned: BTreeMap<ParticipantId, PathBuf> = BTreeMap::new();
    for path in paths {
        let participant = ParticipantId::from_path(path).ok_or_else(|| {
            ReconError::malformed("", path.display().to_string(), "file name has no player name")
        })?;
        if let Some(existing) = assigned.get(&participant) {
            return Err(ReconError::ParticipantCollision {
                participant: participant.to_string(),
                paths: vec![existing.display().to_string(), path.display().to_string()],
            });
        }
        assigned.insert(participant, path.clone());
    }
    Ok(assigned)
}

/// Resolve the host argument against the discovered files
///
/// Accepts the participant identity or the file name, with or without the
/// `.json` extension (`alice`, `alice.json`, `alice.settings`).
///
/// # Errors
///
/// Returns `MissingHost` when nothing matches.
pub fn resolve_host(
    host_arg: &str,
    participants: &BTreeMap<ParticipantId, PathBuf>,
) -> Result<ParticipantId> {
    let wanted = strip_manifest_extension(host_arg.trim());

    if let Some((id, _)) = participants.iter().find(|(id, _)| id.as_str() == wanted) {
        return Ok(id.clone());
    }

    let by_file_name = participants.iter().find(|(_, path)| {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| strip_manifest_extension(name) == wanted)
    });
    if let Some((id, _)) = by_file_name {
        return Ok(id.clone());
    }

    Err(ReconError::MissingHost {
        host: host_arg.to_string(),
        participants: participants.keys().map(|p| p.to_string()).collect(),
    })
}

fn strip_manifest_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(MANIFEST_EXTENSION.len() + 1);
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(suffix))
            if !stem.is_empty()
                && suffix
                    .strip_prefix('.')
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION)) =>
        {
            stem
        }
        _ => name,
    }
}

/// Read and validate one manifest document
fn read_manifest(participant: ParticipantId, path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(path).map_err(|e| {
        ReconError::malformed(
            participant.as_str(),
            path.display().to_string(),
            format!("cannot read file: {}", e),
        )
    })?;

    let raw: Value = serde_json::from_str(&text).map_err(|e| {
        ReconError::malformed(
            participant.as_str(),
            path.display().to_string(),
            format!("not valid JSON: {}", e),
        )
    })?;

    locate_mod_table(&raw).map_err(|reason| {
        ReconError::malformed(participant.as_str(), path.display().to_string(), reason)
    })?;

    Ok(Manifest::new(participant, path, raw))
}

/// Load every manifest of `data_dir` and resolve `host_arg`
///
/// Checks run in this order: at least one file, at least two files,
/// unique participant identities, host present, then every document parses.
///
/// # Errors
///
/// - `NoManifestsFound` / `InsufficientInput` for fewer than 2 files
/// - `ParticipantCollision` for two files of one player
/// - `MissingHost` when the host is not among the participants
/// - `MalformedManifest` for the first document that fails to parse
/// - `Io` when the directory cannot be walked
pub fn load_manifests(data_dir: &Path, host_arg: &str) -> Result<LoadedManifests> {
    let paths = discover_manifest_paths(data_dir)?;

    match paths.len() {
        0 => {
            return Err(ReconError::NoManifestsFound {
                data_dir: data_dir.to_path_buf(),
            })
        }
        1 => {
            return Err(ReconError::InsufficientInput {
                found: 1,
                files: paths.iter().map(|p| p.display().to_string()).collect(),
            })
        }
        _ => {}
    }

    let participants = assign_participants(&paths)?;
    let host = resolve_host(host_arg, &participants)?;

    let manifests = participants
        .into_iter()
        .map(|(participant, path)| read_manifest(participant, &path))
        .collect::<Result<Vec<_>>>()?;

    Ok(LoadedManifests { manifests, host })
}
