//! Settings resolution for Arena.
//!
//! Implements layered settings resolution:
//! 1. Built-in defaults
//! 2. Global settings file (~/.config/arena/settings.json)
//! 3. Environment variables
//! 4. CLI arguments (highest priority, applied by the binary)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::credential::FileCredentialStore;
use crate::error::{Error, Result};

/// Default base URL of the Arena REST API.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the REST API, without trailing slash.
    pub api_url: String,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON log lines.
    pub log_json: bool,
    /// Where the credential store persists the bearer token.
    pub credentials_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_level: "warn".to_string(),
            log_json: false,
            credentials_path: FileCredentialStore::default_path(),
        }
    }
}

/// Settings file overlay. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,
}

impl Settings {
    /// Credentials path, or an error when no home directory is known.
    pub fn require_credentials_path(&self) -> Result<&Path> {
        self.credentials_path.as_deref().ok_or_else(|| {
            Error::Config("Cannot determine home directory; pass --credentials <path>".into())
        })
    }

    fn merge(&mut self, overlay: SettingsFile) {
        if let Some(url) = overlay.api_url {
            self.api_url = url;
        }
        if let Some(level) = overlay.log_level {
            self.log_level = level;
        }
        if let Some(json) = overlay.log_json {
            self.log_json = json;
        }
        if overlay.credentials_path.is_some() {
            self.credentials_path = overlay.credentials_path;
        }
    }

    /// Apply `ARENA_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ARENA_API_URL") {
            self.api_url = val;
        }
        if let Some(val) = lookup("ARENA_LOG_LEVEL") {
            self.log_level = val;
        }
        if let Some(val) = lookup("ARENA_LOG_JSON") {
            self.log_json = matches!(val.as_str(), "1" | "true" | "yes");
        }
        if let Some(val) = lookup("ARENA_CREDENTIALS_PATH") {
            self.credentials_path = Some(PathBuf::from(val));
        }
    }
}

/// Load settings with layered resolution (defaults, global file, environment).
pub fn load_settings() -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(global_path) = global_settings_path() {
        if global_path.exists() {
            settings.merge(load_settings_file(&global_path)?);
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

/// Get the global settings file path.
pub fn global_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("arena").join("settings.json"))
}

fn load_settings_file(path: &Path) -> Result<SettingsFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read settings file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse settings file {}: {}", path.display(), e))
    })
}
