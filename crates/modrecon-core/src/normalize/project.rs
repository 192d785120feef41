//! Projection of one flattened entry onto the fixed record shape
//! (normalization pass 2).

use crate::manifest::format::ATTRIBUTES_KEY;
use crate::model::{InstallState, ModRecord, ParticipantId};
use crate::normalize::schema::ManifestSchema;
use serde_json::{Map, Value};

/// Upstream attribute names of the projected fields
pub mod field {
    pub const MOD_NAME: &str = "modName";
    pub const FILE_NAME: &str = "fileName";
    pub const FILE_SIZE: &str = "fileSize";
    pub const FILE_MD5: &str = "fileMD5";
    pub const MOD_VERSION: &str = "modVersion";
    pub const MOD_ID: &str = "modId";
    pub const STATE: &str = "state";
    pub const HOMEPAGE: &str = "homepage";
    pub const DOWNLOAD_GAME: &str = "downloadGame";
    pub const CUSTOM_FILE_NAME: &str = "customFileName";
    pub const VERSION: &str = "version";
    pub const TYPE: &str = "type";
    pub const IS_PRIMARY: &str = "isPrimary";
}

/// One entry's namespace: its attribute bundle flattened over its own fields
pub(crate) struct FlatEntry<'a> {
    pub entry: &'a Map<String, Value>,
    pub attributes: &'a Map<String, Value>,
}

impl FlatEntry<'_> {
    /// The entry's namespace as seen through the manifest schema. Only
    /// schema keys are read from the attributes, and a key this entry lacks
    /// stays absent (reads as null). Entry-level fields (`state`, `type`)
    /// fill whatever the attributes leave empty.
    fn flatten(&self, schema: &ManifestSchema) -> Map<String, Value> {
        let mut flat: Map<String, Value> = schema
            .keys()
            .filter_map(|key| {
                let value = self.attributes.get(key).filter(|v| !v.is_null())?;
                Some((key.to_string(), value.clone()))
            })
            .collect();
        let entry_fields = self
            .entry
            .iter()
            .filter(|(key, value)| key.as_str() != ATTRIBUTES_KEY && !value.is_null());
        for (key, value) in entry_fields {
            flat.entry(key.clone()).or_insert_with(|| value.clone());
        }
        flat
    }

    pub fn project(&self, schema: &ManifestSchema, participant: &ParticipantId) -> ModRecord {
        let flat = self.flatten(schema);
        let text_of = |key: &str| flat.get(key).and_then(text);
        ModRecord {
            mod_name: text_of(field::MOD_NAME),
            file_name: text_of(field::FILE_NAME),
            file_size: flat.get(field::FILE_SIZE).and_then(size),
            content_hash: text_of(field::FILE_MD5),
            mod_version: text_of(field::MOD_VERSION),
            mod_id: text_of(field::MOD_ID),
            install_state: text_of(field::STATE).map(|s| InstallState::parse(&s)),
            homepage_url: text_of(field::HOMEPAGE),
            download_game: text_of(field::DOWNLOAD_GAME),
            custom_file_name: text_of(field::CUSTOM_FILE_NAME),
            version: text_of(field::VERSION),
            mod_type: text_of(field::TYPE),
            is_primary: flat.get(field::IS_PRIMARY).and_then(flag),
            participant_id: participant.clone(),
        }
    }
}

/// Text form of a scalar; containers keep their JSON text
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn size(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(text(&json!(12)), Some("12".to_string()));
        assert_eq!(text(&json!(null)), None);
        assert_eq!(size(&json!(1024)), Some(1024));
        assert_eq!(size(&json!("2048")), Some(2048));
        assert_eq!(size(&json!(-1)), None);
        assert_eq!(flag(&json!("TRUE")), Some(true));
        assert_eq!(flag(&json!(0)), Some(false));
        assert_eq!(flag(&json!("maybe")), None);
    }

    #[test]
    fn test_attributes_win_over_entry_fields() {
        let entry = json!({"state": "installed", "type": "", "attributes": {}});
        let attributes = json!({"type": "collection", "fileMD5": "abc"});
        let schema = ManifestSchema::discover([&json!({"attributes": attributes.clone()})]);
        let flat = FlatEntry {
            entry: entry.as_object().unwrap(),
            attributes: attributes.as_object().unwrap(),
        };

        let record = flat.project(&schema, &ParticipantId::from("alice"));
        assert_eq!(record.mod_type.as_deref(), Some("collection"));
        assert_eq!(record.install_state, Some(InstallState::Installed));
        assert_eq!(record.content_hash.as_deref(), Some("abc"));
        assert_eq!(record.homepage_url, None);
    }

    #[test]
    fn test_keys_outside_the_schema_are_not_projected() {
        let entry = json!({"state": "installed", "attributes": {}});
        let attributes = json!({"fileMD5": "abc", "homepage": "https://mods/1"});
        let schema = ManifestSchema::discover([&json!({"attributes": {"fileMD5": "x"}})]);
        let flat = FlatEntry {
            entry: entry.as_object().unwrap(),
            attributes: attributes.as_object().unwrap(),
        };

        let record = flat.project(&schema, &ParticipantId::from("alice"));
        assert_eq!(record.content_hash.as_deref(), Some("abc"));
        assert_eq!(record.homepage_url, None);
        assert_eq!(record.install_state, Some(InstallState::Installed));
    }

    #[test]
    fn test_null_attribute_falls_back_to_entry_field() {
        let entry = json!({"state": "installed", "type": "collection", "attributes": {}});
        let attributes = json!({"type": null, "fileMD5": "abc"});
        let schema = ManifestSchema::discover([&json!({"attributes": attributes.clone()})]);
        let flat = FlatEntry {
            entry: entry.as_object().unwrap(),
            attributes: attributes.as_object().unwrap(),
        };

        let record = flat.project(&schema, &ParticipantId::from("alice"));
        assert_eq!(record.mod_type.as_deref(), Some("collection"));
    }
}
