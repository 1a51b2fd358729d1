//! Signing session: configuration and HTTP client shared by sequential calls.

use crate::adapters::remote::client::SigningClient;
use crate::infra::config::{ConfigManager, ServiceConfig};
use crate::infra::error::SigningResult;

#[derive(Debug)]
enum ConfigSource {
    File(ConfigManager),
    Loaded(ServiceConfig),
}

/// Lazily loads the service configuration and builds one `SigningClient`
/// that every call made through the session reuses.
///
/// The client is dropped together with the session.
#[derive(Debug)]
pub struct SigningSession {
    source: ConfigSource,
    client: Option<SigningClient>,
}

impl SigningSession {
    /// Session reading its configuration through `manager` on first use.
    #[must_use]
    pub fn new(manager: ConfigManager) -> Self {
        Self {
            source: ConfigSource::File(manager),
            client: None,
        }
    }

    /// Session using the config file at the default location.
    pub fn from_default_config() -> SigningResult<Self> {
        Ok(Self::new(ConfigManager::new()?))
    }

    /// Session with an already loaded configuration.
    #[must_use]
    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            source: ConfigSource::Loaded(config),
            client: None,
        }
    }

    /// Whether the client has been created yet.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// The session client, creating it on first call.
    ///
    /// # Errors
    /// Returns `ConfigError` when the configuration cannot be loaded. Nothing
    /// in the session can proceed after that.
    pub fn client(&mut self) -> SigningResult<&SigningClient> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                let config = match &self.source {
                    ConfigSource::File(manager) => manager.load()?,
                    ConfigSource::Loaded(config) => config.clone(),
                };
                log::info!("Using signing service at {}", config.endpoint);
                SigningClient::new(config)?
            }
        };
        Ok(self.client.insert(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::error::SigningError;
    use tempfile::TempDir;

    #[test]
    fn test_client_is_created_once() {
        let mut session =
            SigningSession::with_config(ServiceConfig::new("https://sign.example.com", "token"));
        assert!(!session.is_connected());

        let first = session.client().unwrap() as *const SigningClient;
        let second = session.client().unwrap() as *const SigningClient;
        assert!(session.is_connected());
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let mut session =
            SigningSession::new(ConfigManager::with_path(temp_dir.path().join("none.toml")));

        assert!(matches!(session.client(), Err(SigningError::ConfigError(_))));
        assert!(!session.is_connected());
    }
}
