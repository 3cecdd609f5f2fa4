//! Configuration handling for the console client.
//!
//! Configuration is stored in `.fichas/config.yaml` and includes:
//! - The backend API base URL
//! - The API token used for authenticated requests
//!
//! Environment variables (`FICHAS_API_URL`, `FICHAS_API_TOKEN`) take
//! precedence over the file, so deployments can inject credentials
//! without touching the config on disk.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const CONFIG_DIR: &str = ".fichas";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API connection settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend API connection settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from the default path, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the API base URL from the environment or the config file
    pub fn api_url(&self) -> Option<String> {
        if let Ok(url) = env::var("FICHAS_API_URL")
            && !url.is_empty()
        {
            return Some(url);
        }

        self.api.url.clone()
    }

    /// Get the API token from the environment or the config file
    pub fn api_token(&self) -> Option<String> {
        if let Ok(token) = env::var("FICHAS_API_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }

        self.api.token.clone()
    }

    /// Set the API base URL
    pub fn set_api_url(&mut self, url: String) {
        self.api.url = Some(url);
    }

    /// Set the API token
    pub fn set_api_token(&mut self, token: String) {
        self.api.token = Some(token);
    }
}
