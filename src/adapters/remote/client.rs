//! Remote signing service client.
//!
//! Uploads one file per call to the configured endpoint and returns the raw
//! reply body. The HTTP client and the endpoint/authorization pair are built
//! once and reused for every upload of a session.

use super::protocol::{request_url, QueryParams, FILE_FIELD};
use crate::infra::config::ServiceConfig;
use crate::infra::error::{SigningError, SigningResult};
use std::path::Path;

/// HTTP client for the remote signing service.
#[derive(Debug)]
pub struct SigningClient {
    endpoint: String,
    authorization: reqwest::header::HeaderValue,
    client: reqwest::Client,
}

impl SigningClient {
    /// Create a new client for the configured endpoint.
    ///
    /// # Errors
    /// Returns `ConfigError` for an unusable config and `TransportError` if
    /// the HTTP client cannot be created.
    pub fn new(config: ServiceConfig) -> SigningResult<Self> {
        config.validate()?;
        let authorization = config.authorization_header()?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("signtool-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SigningError::TransportError(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            endpoint: config.endpoint,
            authorization,
            client,
        })
    }

    /// Upload `path` with `query` and return the full reply body.
    ///
    /// # Errors
    /// Any failure (unreadable file, network error, non-success status)
    /// is reported as a single `TransportError`.
    pub async fn upload(&self, query: &QueryParams, path: &Path) -> SigningResult<Vec<u8>> {
        let url = request_url(&self.endpoint, query);
        log::debug!("POST {} <- {}", url, path.display());

        let body = self.send(&url, path).await.map_err(|e| {
            SigningError::TransportError(format!("Upload failed for {}: {e}", path.display()))
        })?;

        log::debug!("Received {} bytes for {}", body.len(), path.display());
        Ok(body)
    }

    async fn send(&self, url: &str, path: &Path) -> Result<Vec<u8>, String> {
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| format!("cannot open file: {e}"))?;
        let length = file
            .metadata()
            .await
            .map_err(|e| format!("cannot stat file: {e}"))?
            .len();

        let file_name = path
            .file_name()
            .map_or_else(|| FILE_FIELD.to_string(), |n| n.to_string_lossy().into_owned());

        let part = reqwest::multipart::Part::stream_with_length(reqwest::Body::from(file), length)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| e.to_string())?;
        let form = reqwest::multipart::Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, self.authorization.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {status}: {}", error_text.trim()));
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| format!("failed to read response body: {e}"))
    }
}
