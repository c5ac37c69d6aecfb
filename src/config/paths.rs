//! Path management for the Moodify client
//!
//! This module manages all filesystem paths used by the application:
//! the settings file, the persisted access token, the cookie jar and
//! the captured-image previews.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

/// Manages all filesystem paths for the application
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config directory path
    config_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(config: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(config)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_dir = if let Some(path) = config_override {
            path
        } else {
            directories::ProjectDirs::from("", "", "moodify")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".moodify"))
        };

        let paths = Self { config_dir };
        paths.create_directories()?;

        Ok(paths)
    }

    fn create_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(self.config_dir.join("captures"))?;
        Ok(())
    }

    // ========== Getters ==========

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path to the settings file
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Path to the persisted access token
    pub fn token_path(&self) -> PathBuf {
        self.config_dir.join("token")
    }

    /// Path to the persisted cookie jar (refresh token rides here)
    pub fn cookies_path(&self) -> PathBuf {
        self.config_dir.join("cookies.json")
    }

    /// Directory holding captured-image previews
    pub fn captures_dir(&self) -> PathBuf {
        self.config_dir.join("captures")
    }
}
