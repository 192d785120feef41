use modrecon_core::{Manifest, ParticipantId};
use serde_json::{json, Map, Value};
use std::path::Path;

#[allow(dead_code)]
pub const GAME: &str = "baldursgate3";

/// One mod entry with the given attributes, installed
#[allow(dead_code)]
pub fn entry(hash: &str, homepage: &str, name: &str) -> Value {
    json!({
        "state": "installed",
        "type": "",
        "attributes": {
            "modName": name,
            "fileName": format!("{}.zip", name),
            "fileSize": 1024,
            "fileMD5": hash,
            "modVersion": "1.0",
            "modId": 7,
            "homepage": homepage,
            "downloadGame": GAME,
            "customFileName": format!("{} Custom", name),
            "version": "1.0.0",
            "isPrimary": true
        }
    })
}

/// Wrap entries into the array layout: `{"mods": [{}, {"baldursgate3": {...}}]}`
#[allow(dead_code)]
pub fn manifest_doc(entries: Vec<(&str, Value)>) -> Value {
    let mods: Map<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    json!({ "mods": [{}, { GAME: mods }] })
}

/// Wrap entries into the row-oriented backup layout
#[allow(dead_code)]
pub fn section_doc(entries: Vec<(&str, Value)>) -> Value {
    let mods: Map<String, Value> = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    json!({
        "settings": { "mods": {} },
        "persistent": { "mods": { GAME: mods } }
    })
}

#[allow(dead_code)]
pub fn manifest(participant: &str, doc: Value) -> Manifest {
    Manifest::new(
        ParticipantId::from(participant),
        format!("{}.json", participant),
        doc,
    )
}

/// Write `doc` as `<dir>/<file_name>`
#[allow(dead_code)]
pub fn write_manifest(dir: &Path, file_name: &str, doc: &Value) {
    let text = serde_json::to_string_pretty(doc).unwrap();
    std::fs::write(dir.join(file_name), text).unwrap();
}
