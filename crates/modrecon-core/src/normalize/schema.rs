//! Manifest-local schema discovery (normalization pass 1).

use crate::manifest::format::ATTRIBUTES_KEY;
use serde_json::Value;
use std::collections::BTreeSet;

/// Union of attribute keys observed across one manifest's entries
///
/// The schema is local to a manifest: two players' backups may carry
/// different key sets, and keys missing on an entry read as null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSchema {
    keys: BTreeSet<String>,
}

impl ManifestSchema {
    /// Collect the attribute keys of every entry whose attribute payload is
    /// a mapping. Corrupt entries contribute nothing.
    pub fn discover<'a>(entries: impl IntoIterator<Item = &'a Value>) -> Self {
        let keys = entries
            .into_iter()
            .filter_map(|entry| entry.get(ATTRIBUTES_KEY)?.as_object())
            .flat_map(|attributes| attributes.keys().cloned())
            .collect();
        Self { keys }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
