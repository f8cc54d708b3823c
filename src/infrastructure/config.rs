// src/infrastructure/config.rs
use crate::constants::{
    APP_DIR_NAME, DEFAULT_API_BASE_URL, DEFAULT_IMAGE_BASE_URL, SESSION_FILE_NAME,
};
use crate::domain::DomainError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct SessionConfig {
    /// Empty means `<data_dir>/centerview/session.json`
    #[serde(default)]
    pub path: String,
}

fn default_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }
fn default_image_base_url() -> String { DEFAULT_IMAGE_BASE_URL.to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    /// A missing file yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            debug!(?path, "No config file, using defaults");
            return Ok(Self::default());
        }
        debug!(?path, "Loading config");
        Self::load(&path)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
    }

    pub fn session_path(&self) -> Result<PathBuf, DomainError> {
        if !self.session.path.trim().is_empty() {
            return Ok(PathBuf::from(self.session.path.trim()));
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME).join(SESSION_FILE_NAME))
            .ok_or_else(|| DomainError::Config("could not determine data directory".to_string()))
    }
}
