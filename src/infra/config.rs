//! Configuration management infrastructure.
//!
//! The signing service is located through a small TOML file holding the
//! service endpoint and an opaque authorization token:
//!
//! ```toml
//! Endpoint = "https://signing.example.com/signtool"
//! Authorization = "Bearer 0123456789abcdef"
//! ```

use crate::infra::error::{SigningError, SigningResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Endpoint and authorization pair for the remote signing service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Base URL the query string is appended to
    #[serde(rename = "Endpoint")]
    pub endpoint: String,

    /// Value sent verbatim in the `Authorization` header
    #[serde(rename = "Authorization")]
    pub authorization: String,
}

impl ServiceConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, authorization: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            authorization: authorization.into(),
        }
    }

    /// Check both fields are usable.
    pub fn validate(&self) -> SigningResult<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            SigningError::ConfigError(format!("Invalid endpoint '{}': {e}", self.endpoint))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SigningError::ConfigError(format!(
                "Endpoint must use http or https, got: {}",
                self.endpoint
            )));
        }

        if self.authorization.trim().is_empty() {
            return Err(SigningError::ConfigError(
                "Authorization must not be empty".to_string(),
            ));
        }

        self.authorization_header()?;
        Ok(())
    }

    /// The token as an HTTP header value.
    pub fn authorization_header(&self) -> SigningResult<reqwest::header::HeaderValue> {
        let mut value = reqwest::header::HeaderValue::from_str(&self.authorization).map_err(|_| {
            SigningError::ConfigError(
                "Authorization is not a valid HTTP header value".to_string(),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.endpoint)
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}

/// Configuration manager for the service config file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a configuration manager using the default path
    pub fn new() -> SigningResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> SigningResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SigningError::ConfigError("Unable to determine user config directory".to_string())
        })?;
        Ok(config_dir.join("signtool").join("signtool.toml"))
    }

    /// Load and validate the configuration file
    pub fn load(&self) -> SigningResult<ServiceConfig> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            SigningError::ConfigError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: ServiceConfig = toml::from_str(&content).map_err(|e| {
            SigningError::ConfigError(format!("Failed to parse config file: {e}"))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &ServiceConfig) -> SigningResult<()> {
        config.validate()?;
        log::info!("Saving configuration to: {}", self.config_path.display());

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SigningError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            SigningError::ConfigError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            SigningError::ConfigError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Write a config file for `config` unless one already exists.
    ///
    /// Returns `false` when an existing file was left untouched.
    pub fn init(&self, config: &ServiceConfig) -> SigningResult<bool> {
        if self.config_path.exists() {
            log::info!(
                "Configuration already exists: {}",
                self.config_path.display()
            );
            return Ok(false);
        }
        self.save(config)?;
        Ok(true)
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
