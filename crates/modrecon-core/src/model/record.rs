use crate::model::ParticipantId;
use serde::{Deserialize, Serialize};

/// Installation state of a mod as recorded by the mod manager
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallState {
    Installed,
    Disabled,
    /// Any other state string (e.g. `downloading`), kept verbatim
    Other(String),
}

impl InstallState {
    /// Parse the upstream `state` value
    pub fn parse(raw: &str) -> Self {
        match raw {
            "installed" => InstallState::Installed,
            "disabled" | "uninstalled" => InstallState::Disabled,
            other => InstallState::Other(other.to_string()),
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, InstallState::Installed)
    }
}

/// One normalized mod file entry of one participant
///
/// Every attribute is optional: `None` is the null sentinel for keys that
/// are absent from an entry. Field names serialize with the upstream
/// attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    #[serde(rename = "modName")]
    pub mod_name: Option<String>,
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    #[serde(rename = "fileSize")]
    pub file_size: Option<u64>,
    /// MD5 of the mod archive; primary identity key
    #[serde(rename = "fileMD5")]
    pub content_hash: Option<String>,
    #[serde(rename = "modVersion")]
    pub mod_version: Option<String>,
    #[serde(rename = "modId")]
    pub mod_id: Option<String>,
    #[serde(rename = "state")]
    pub install_state: Option<InstallState>,
    /// Secondary identity key, stable across version drift
    #[serde(rename = "homepage")]
    pub homepage_url: Option<String>,
    #[serde(rename = "downloadGame")]
    pub download_game: Option<String>,
    #[serde(rename = "customFileName")]
    pub custom_file_name: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub mod_type: Option<String>,
    #[serde(rename = "isPrimary")]
    pub is_primary: Option<bool>,
    #[serde(rename = "player")]
    pub participant_id: ParticipantId,
}

impl ModRecord {
    /// An all-null record for `participant`
    pub fn empty(participant_id: ParticipantId) -> Self {
        Self {
            mod_name: None,
            file_name: None,
            file_size: None,
            content_hash: None,
            mod_version: None,
            mod_id: None,
            install_state: None,
            homepage_url: None,
            download_game: None,
            custom_file_name: None,
            version: None,
            mod_type: None,
            is_primary: None,
            participant_id,
        }
    }

    /// True when every attribute is null (the participant tag does not count)
    pub fn is_empty(&self) -> bool {
        self.mod_name.is_none()
            && self.file_name.is_none()
            && self.file_size.is_none()
            && self.content_hash.is_none()
            && self.mod_version.is_none()
            && self.mod_id.is_none()
            && self.install_state.is_none()
            && self.homepage_url.is_none()
            && self.download_game.is_none()
            && self.custom_file_name.is_none()
            && self.version.is_none()
            && self.mod_type.is_none()
            && self.is_primary.is_none()
    }

    pub fn is_installed(&self) -> bool {
        self.install_state
            .as_ref()
            .is_some_and(InstallState::is_installed)
    }
}
