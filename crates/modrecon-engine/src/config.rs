//! Run configuration.
//!
//! Precedence: built-in defaults < TOML config file < command-line flags.

use modrecon_core::manifest::DEFAULT_GAME_KEY;
use modrecon_errors::{ExError, ExErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_DATA_DIR: &str = "data/settings_json";
pub const DEFAULT_OUTPUT_DIR: &str = "data/conflict_analysis";

/// Report file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Xlsx, OutputFormat::Csv, OutputFormat::Html];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ExError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "html" | "htm" => Ok(OutputFormat::Html),
            other => Err(ExError::new(ExErrorKind::Config)
                .with_op("parse_format")
                .with_message(format!("unknown report format '{}'", other))
                .with_hint("Use one of: xlsx, csv, html.")),
        }
    }
}

/// `[logging]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `development` or `production`
    pub profile: Option<String>,
    /// Directory of the dated log files; no file sink when unset
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub game_key: String,
    pub format: OutputFormat,
    pub logging: LoggingConfig,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            game_key: DEFAULT_GAME_KEY.to_string(),
            format: OutputFormat::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub game_key: Option<String>,
    pub format: Option<OutputFormat>,
    pub log_profile: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl ReconConfig {
    /// Parse a TOML document; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns `Config` on invalid TOML or unknown values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(format!("invalid configuration: {}", e))
        })
    }

    /// # Errors
    ///
    /// Returns `Config` when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_path(path.display().to_string())
                .with_message(format!("cannot read configuration: {}", e))
                .with_hint("Check the --config path.")
        })?;
        Self::from_toml_str(&text).map_err(|e| e.with_path(path.display().to_string()))
    }

    /// Defaults, then `path` if given, then `overrides`
    ///
    /// # Errors
    ///
    /// Returns `Config` when the configuration file is invalid.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let base = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(game) = overrides.game_key {
            self.game_key = game;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if overrides.log_profile.is_some() {
            self.logging.profile = overrides.log_profile;
        }
        if overrides.log_dir.is_some() {
            self.logging.dir = overrides.log_dir;
        }
        self
    }
}
