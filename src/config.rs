//! Journal configuration.
//!
//! Handles loading and validating the user's `config.toml`. Every field has a
//! serde default, so a config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! By default the file lives in the platform config directory:
//!
//! ```text
//! Linux:   ~/.config/daybook/config.toml
//! macOS:   ~/Library/Application Support/daybook/config.toml
//! Windows: %APPDATA%\daybook\config\config.toml
//! ```
//!
//! `daybook --config <path>` points somewhere else. A missing file means
//! stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! journal_dir = "~/journal"   # Where entries live (no default)
//! title = "Journal"           # <title> of the assembled document
//! notify = false              # Desktop notification after `build`
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("No journal directory configured: set `journal_dir` in {0} or pass --here")]
    MissingJournalDir(PathBuf),
    #[error("Cannot determine the user config directory")]
    NoConfigDir,
}

/// Journal configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    /// Directory holding the journal entries.
    pub journal_dir: Option<String>,
    /// Title of the assembled document.
    pub title: String,
    /// Send a desktop notification after a successful build.
    pub notify: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            journal_dir: None,
            title: "Journal".to_string(),
            notify: false,
        }
    }
}

impl JournalConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.journal_dir.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "journal_dir must not be empty when set".into(),
            ));
        }
        Ok(())
    }

    /// Look up a single key as a string. This is the key-value view the CLI
    /// uses to resolve the journal directory.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "journal_dir" => self.journal_dir.clone(),
            "title" => Some(self.title.clone()),
            "notify" => Some(self.notify.to_string()),
            _ => None,
        }
    }
}

/// Strip trailing path separators, keeping a lone root intact.
pub fn normalize_dir(raw: &str) -> PathBuf {
    let trimmed = raw.trim_end_matches(['/', MAIN_SEPARATOR]);
    if trimmed.is_empty() && !raw.is_empty() {
        PathBuf::from(&raw[..1])
    } else {
        PathBuf::from(trimmed)
    }
}

/// Resolve the configured journal directory.
///
/// `source` is only used in the error message.
pub fn journal_dir(config: &JournalConfig, source: &Path) -> Result<PathBuf, ConfigError> {
    config
        .get("journal_dir")
        .map(|raw| normalize_dir(&raw))
        .ok_or_else(|| ConfigError::MissingJournalDir(source.to_path_buf()))
}

/// Default config file location in the platform config directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("", "", "daybook")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load config from the file at `path`.
///
/// A missing file yields the stock defaults, and keys the file leaves out keep
/// their default values. The result is validated before it is returned.
pub fn load_config(path: &Path) -> Result<JournalConfig, ConfigError> {
    let config = match fs::read_to_string(path) {
        Ok(content) => toml::from_str::<JournalConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            JournalConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# daybook configuration
# =====================
# All settings are optional. Values shown are the defaults.
# Unknown keys will cause an error.

# Directory where journal entries are stored and index.html is written.
# Required unless commands are run with --here.
# journal_dir = "/home/me/journal"

# Title of the assembled document.
title = "Journal"

# Send a desktop notification after a successful build.
notify = false
"##
}
