//! Access to the upstream (Vortex state backup) document layout.
//!
//! The mod table sits at position 1 of the top-level `mods` structure. This
//! is a quirk of the upstream format, not a named field, so it is pinned here
//! as [`MOD_TABLE_POSITION`] and checked loudly: an upstream reordering must
//! fail as a malformed manifest instead of silently reading the wrong table.
//!
//! Two layouts carry that structure:
//!
//! ```text
//! array layout     {"mods": [<ignored>, {"<game>": {...}}]}
//! section layout   {"<section0>": {...}, "<section1>": {"mods": {"<game>": {...}}}}
//! ```
//!
//! In the section layout the top-level sections, in document order, are the
//! rows of a `mods` column.

use serde_json::{Map, Value};

/// Top-level key of the mods structure
pub const MODS_KEY: &str = "mods";

/// Position of the mod table inside the mods structure
pub const MOD_TABLE_POSITION: usize = 1;

/// Number of elements the array layout must have
pub const MODS_ARRAY_LEN: usize = 2;

/// Game section read when none is configured
pub const DEFAULT_GAME_KEY: &str = "baldursgate3";

/// Key of the nested attribute bundle inside each mod entry
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Locate the mod table of a manifest document
///
/// # Errors
///
/// Returns a human-readable reason when the document does not have one of
/// the supported layouts.
pub fn locate_mod_table(doc: &Value) -> Result<&Map<String, Value>, String> {
    let root = doc
        .as_object()
        .ok_or_else(|| format!("document root must be an object, found {}", type_name(doc)))?;

    match root.get(MODS_KEY) {
        Some(Value::Array(items)) => {
            if items.len() != MODS_ARRAY_LEN {
                return Err(format!(
                    "`{}` array must have exactly {} elements, found {}",
                    MODS_KEY,
                    MODS_ARRAY_LEN,
                    items.len()
                ));
            }
            items[MOD_TABLE_POSITION].as_object().ok_or_else(|| {
                format!(
                    "`{}[{}]` must be an object, found {}",
                    MODS_KEY,
                    MOD_TABLE_POSITION,
                    type_name(&items[MOD_TABLE_POSITION])
                )
            })
        }
        _ => {
            let (name, section) = root.iter().nth(MOD_TABLE_POSITION).ok_or_else(|| {
                format!(
                    "expected at least {} top-level sections, found {}",
                    MOD_TABLE_POSITION + 1,
                    root.len()
                )
            })?;
            let mods = section
                .get(MODS_KEY)
                .ok_or_else(|| format!("section `{}` has no `{}` key", name, MODS_KEY))?;
            mods.as_object().ok_or_else(|| {
                format!(
                    "`{}.{}` must be an object, found {}",
                    name,
                    MODS_KEY,
                    type_name(mods)
                )
            })
        }
    }
}

/// JSON type name used in diagnostics
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
