//! Client configuration
//!
//! User-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{Paths, DEFAULT_HISTORY_PAGE_SIZE, DEFAULT_SERVER_URL};

/// Client configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Backend base URL
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Camera device index used by the capture path
    #[serde(default)]
    pub camera_index: u32,

    /// History rows shown per page
    #[serde(default = "default_history_page_size")]
    pub history_page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            camera_index: 0,
            history_page_size: default_history_page_size(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from file, creating it with defaults when missing
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            let mut config: ClientConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;

            // a trailing slash on the base URL breaks path joins downstream
            while config.server_url.ends_with('/') {
                config.server_url.pop();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let paths = Paths::get()?;
        let settings_path = paths.settings_path();

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&settings_path, content).context("Failed to write settings file")?;

        Ok(())
    }
}

// Default value functions for serde

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_history_page_size() -> usize {
    DEFAULT_HISTORY_PAGE_SIZE
}
