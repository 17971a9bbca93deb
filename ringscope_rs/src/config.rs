//! Configuration file support for ringscope.
//!
//! Loads optional `.ringscope/config.toml` from the working directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::dashboard::DashboardOptions;
use crate::layout::DEFAULT_SETTLE_INTERVAL_MS;
use crate::theme::FilePreferences;

/// Root configuration structure
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RingscopeConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub preferences: PreferencesConfig,
}

/// Where the analysis service lives
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub upload_path: String,
    pub download_path: String,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            upload_path: "/upload".into(),
            download_path: "/download".into(),
            timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    pub fn download_url(&self) -> String {
        join_url(&self.base_url, &self.download_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub settle_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            settle_interval_ms: DEFAULT_SETTLE_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Preference file; `<config dir>/ringscope/preferences.json` when unset.
    pub path: Option<PathBuf>,
}

impl RingscopeConfig {
    /// Load config from `.ringscope/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        Self::load_from_path(&root.join(".ringscope").join("config.toml"))
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Preference file to use, if any can be determined.
    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences
            .path
            .clone()
            .or_else(FilePreferences::default_path)
    }

    /// Dashboard options derived from this config.
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            settle_interval_ms: self.ui.settle_interval_ms,
            upload_url: self.server.upload_url(),
            download_url: self.server.download_url(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
