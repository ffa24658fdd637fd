//! Settings persistence: load and save `settings.toml`.
//!
//! Settings are stored in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/in.price-portal.Price-Portal/
//! - Windows: %APPDATA%/price-portal/Price Portal/config/
//! - Linux: ~/.config/price-portal/
//!
//! The session file lives in the matching data folder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use portal_catalog::FilterPolicy;
use portal_sources::HttpOptions;

const APP_QUALIFIER: &str = "in";
const APP_ORG: &str = "price-portal";
const APP_NAME: &str = "Price Portal";
const CONFIG_FILENAME: &str = "settings.toml";
const SESSION_FILENAME: &str = "session.json";

/// Published CSV export of the price sheet.
pub const DEFAULT_CATALOG_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTYmplgfNf6rZ9PvQ_Sp19QlJU_4c0bAIUVxTz9ekW8fqQE04_U3knNK6C1SeEw-yAM-woc9_dJaiQv/pub?gid=774188901&single=true&output=csv";

/// Script endpoint answering `type=checkLogin`.
pub const DEFAULT_AUTH_URL: &str = "https://script.google.com/macros/s/AKfycbwjq3Iv2A2IuY2VQW3ZWOGaQwwBLWemo-mv1Wnl8iGrZb6JLYEUXhQktqpoMlNVmp7A4A/exec";

/// All persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalSettings {
    pub endpoints: EndpointSettings,
    pub network: NetworkSettings,
    pub query: QuerySettings,
}

/// Remote collaborator locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub catalog_url: String,
    pub auth_url: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Append a `t=<unix millis>` parameter to every request.
    pub cache_bust: bool,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            cache_bust: true,
        }
    }
}

impl NetworkSettings {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            cache_bust: self.cache_bust,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub policy: FilterPolicy,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Get the path to the session file.
pub fn session_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(SESSION_FILENAME))
}

/// Load settings from `path`, or from the platform location when `None`.
///
/// Returns default settings if the file is missing, unreadable, or
/// unparsable, or if no location can be determined.
pub fn load_settings(path: Option<&Path>) -> PortalSettings {
    let Some(path) = path.map(Path::to_path_buf).or_else(settings_path) else {
        tracing::warn!("could not determine settings path, using defaults");
        return PortalSettings::default();
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to parse settings file: {e}, using defaults");
                PortalSettings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no settings file found, using defaults");
            PortalSettings::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "failed to read settings file: {e}, using defaults");
            PortalSettings::default()
        }
    }
}

/// Save settings to `path`, or to the platform location when `None`.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_settings(settings: &PortalSettings, path: Option<&Path>) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(settings_path)
        .context("could not determine settings path")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(settings).context("failed to serialize settings")?;
    fs::write(&path, content)
        .with_context(|| format!("failed to write settings file {}", path.display()))?;

    tracing::info!(path = %path.display(), "saved settings");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_exists() {
        assert!(settings_path().is_some());
        assert!(session_path().is_some());
    }

    #[test]
    fn test_defaults_point_at_published_endpoints() {
        let settings = PortalSettings::default();
        assert!(settings.endpoints.catalog_url.ends_with("output=csv"));
        assert!(settings.endpoints.auth_url.ends_with("/exec"));
        assert_eq!(settings.network.timeout_secs, 20);
        assert!(settings.network.cache_bust);
        assert_eq!(settings.query.policy, FilterPolicy::Fallback);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let parsed: PortalSettings = toml::from_str("[query]\npolicy = \"override\"\n").unwrap();
        assert_eq!(parsed.query.policy, FilterPolicy::Override);
        assert_eq!(parsed.endpoints, EndpointSettings::default());
        assert_eq!(parsed.network, NetworkSettings::default());
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let network = NetworkSettings {
            timeout_secs: 0,
            cache_bust: false,
        };
        let options = network.http_options();
        assert_eq!(options.timeout, Duration::from_secs(1));
        assert!(!options.cache_bust);
    }
}
