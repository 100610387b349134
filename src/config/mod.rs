//! Configuration management for endor-sweep
//!
//! Settings come from an optional YAML file, overlaid by environment variables
//! (which `main` may have populated from a `.env` file).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::endor::API_HOST;
use crate::client::models::Credential;
use crate::error::{ConfigError, Result};

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_API_SECRET: &str = "API_SECRET";
pub const ENV_NAMESPACE: &str = "ENDOR_NAMESPACE";
pub const ENV_API_HOST: &str = "ENDOR_API_HOST";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Endor Labs API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Endor Labs API secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,

    /// Namespace the queries run in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// API host override (defaults to the public Endor Labs API)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".endor-sweep").join("config.yaml"))
    }

    /// Load configuration from `path`, or from the default location if present.
    ///
    /// An explicit path must exist; a missing default file yields an empty config.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Overlay values from `lookup`; empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = get(ENV_API_SECRET) {
            self.api_secret = Some(v);
        }
        if let Some(v) = get(ENV_NAMESPACE) {
            self.namespace = Some(v);
        }
        if let Some(v) = get(ENV_API_HOST) {
            self.api_host = Some(v);
        }
    }

    /// Key/secret pair for the auth exchange
    pub fn credential(&self) -> Result<Credential> {
        let key = self.api_key.as_ref().ok_or(ConfigError::MissingApiKey)?;
        let secret = self
            .api_secret
            .as_ref()
            .ok_or(ConfigError::MissingApiSecret)?;
        Ok(Credential::new(key.clone(), secret.clone()))
    }

    pub fn require_namespace(&self) -> Result<&str> {
        self.namespace
            .as_deref()
            .ok_or_else(|| ConfigError::MissingNamespace.into())
    }

    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(API_HOST)
    }
}
