//! Canonical JSON rendering and manifest digests.
//!
//! ## Determinism Guarantees
//!
//! - Object keys are emitted in lexicographic order at every depth,
//!   independent of document order
//! - No incidental whitespace
//! - Array order is preserved (arrays are positional)
//!
//! Same semantic document → same digest, whatever the source formatting.

use crate::errors::Result;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Render `value` as canonical JSON text
///
/// # Errors
///
/// Returns `Serialization` if a scalar fails to encode.
pub fn canonical_json(value: &Value) -> Result<String> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                write_canonical(&map[key], out)?;
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

/// Compute the content digest of a manifest document.
///
/// ## Returns
///
/// Hex-encoded SHA256 digest (64 characters) of the canonical JSON text
///
/// ## Errors
///
/// Returns `ReconError::Serialization` if canonical rendering fails.
///
/// ## Example
///
/// ```
/// use modrecon_core::dedup::compute_manifest_digest;
/// use serde_json::json;
///
/// let a = compute_manifest_digest(&json!({"b": 1, "a": 2})).unwrap();
/// let b = compute_manifest_digest(&json!({"a": 2, "b": 1})).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn compute_manifest_digest(value: &Value) -> Result<String> {
    let canonical = canonical_json(value)?;
    Ok(hash_string(&canonical))
}

/// Hash a string using SHA256.
fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
