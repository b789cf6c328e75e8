//! Instance configuration
//!
//! Backend URL and instance credentials, persisted with `confy` in the
//! OS-specific config directory.

use crate::constant::{APP_NAME, BACKEND_URL_ENV, DEFAULT_BACKEND_URL, FALLBACK_INSTANCE_NAME};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: InstanceConfig,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist.
    ///
    /// `WATCHER_BACKEND_URL` overrides the stored backend URL.
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings: InstanceConfig = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        settings.apply_env_override(std::env::var(BACKEND_URL_ENV).ok());
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Issued by the backend on first start
    #[serde(default)]
    pub instance_key: String,

    #[serde(default)]
    pub instance_secret: String,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            instance_key: String::new(),
            instance_secret: String::new(),
        }
    }
}

impl InstanceConfig {
    pub fn has_credentials(&self) -> bool {
        !self.instance_key.is_empty() && !self.instance_secret.is_empty()
    }

    pub fn set_credentials(&mut self, key: String, secret: String) {
        self.instance_key = key;
        self.instance_secret = secret;
    }

    fn apply_env_override(&mut self, url: Option<String>) {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            info!("Using backend URL from {}: {}", BACKEND_URL_ENV, url);
            self.backend_url = url;
        }
        if self.backend_url.trim().is_empty() {
            self.backend_url = default_backend_url();
        }
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

/// Name this machine registers under.
///
/// # Returns
/// The OS host name, or `watcher-device` when it is empty or not valid UTF-8.
pub fn instance_name() -> String {
    name_or_fallback(gethostname::gethostname().into_string().ok())
}

fn name_or_fallback(host: Option<String>) -> String {
    host.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_INSTANCE_NAME.to_string())
}
