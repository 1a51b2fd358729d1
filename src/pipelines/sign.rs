//! `SignWorkflow`: sign a file through the remote service and write the
//! signed bytes back in place.

use super::{FileOutcome, SigningSession};
use crate::adapters::remote::client::SigningClient;
use crate::adapters::remote::protocol::QueryParams;
use crate::domain::{Certificate, HashAlgorithm, SignatureResult, SignatureStatus, TimestampUrl};
use crate::infra::error::{SigningError, SigningResult};
use crate::infra::paths::InputPath;
use std::path::Path;

/// Parameters of a sign request.
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Certificate the service should sign with, selected by thumbprint
    pub certificate: Certificate,
    pub hash_algorithm: HashAlgorithm,
    pub timestamp_server: TimestampUrl,
}

/// Orchestrates signing of a single file.
#[derive(Debug, Clone)]
pub struct SignWorkflow {
    options: SignOptions,
}

impl SignWorkflow {
    #[must_use]
    pub fn new(options: SignOptions) -> Self {
        Self { options }
    }

    /// Sign `path` in place.
    ///
    /// # Errors
    /// Only a session configuration failure is returned as `Err`; every other
    /// failure is reported in the outcome.
    pub async fn run(
        &self,
        session: &mut SigningSession,
        path: impl AsRef<Path>,
    ) -> SigningResult<FileOutcome<SignatureResult>> {
        let client = session.client()?;
        Ok(self.sign_one(client, path.as_ref()).await)
    }

    async fn sign_one(&self, client: &SigningClient, path: &Path) -> FileOutcome<SignatureResult> {
        let input = match InputPath::resolve(path) {
            Ok(input) => input,
            Err(e) => return FileOutcome::failed(path, e),
        };

        match self.sign_resolved(client, &input).await {
            Ok(result) => FileOutcome::succeeded(input.into_path_buf(), result),
            Err(e) => FileOutcome::failed(input.as_path(), e),
        }
    }

    async fn sign_resolved(
        &self,
        client: &SigningClient,
        input: &InputPath,
    ) -> SigningResult<SignatureResult> {
        let query = QueryParams::sign(
            &self.options.timestamp_server,
            &self.options.hash_algorithm,
            &self.options.certificate,
        );

        log::info!(
            "Signing {} (certificate {}, {}, timestamp {})",
            input,
            self.options.certificate.thumbprint(),
            self.options.hash_algorithm,
            self.options.timestamp_server
        );

        let signed = client.upload(&query, input.as_path()).await?;
        if signed.is_empty() {
            return Err(SigningError::TransportError(format!(
                "Upload failed for {}: service returned an empty file",
                input
            )));
        }

        tokio::fs::write(input.as_path(), &signed)
            .await
            .map_err(|e| {
                SigningError::IoError(format!("Failed to write signed file {input}: {e}"))
            })?;

        log::info!("Wrote {} signed bytes to {}", signed.len(), input);

        Ok(SignatureResult::new(input.as_path(), SignatureStatus::Valid)
            .with_signer_certificate(self.options.certificate.clone()))
    }
}
