//! `VerifyWorkflow`: ask the remote service about the signatures of one or
//! more files.
//!
//! Paths are processed strictly in the order given. A failure on one path is
//! recorded in its outcome and the next path is still processed.

use super::{FileOutcome, SigningSession};
use crate::adapters::remote::client::SigningClient;
use crate::adapters::remote::protocol::QueryParams;
use crate::domain::DecodedReply;
use crate::infra::error::SigningResult;
use crate::infra::paths::InputPath;
use crate::services::decoder::ResponseDecoder;
use std::path::Path;

/// Orchestrates verification of a list of files.
#[derive(Debug, Clone, Default)]
pub struct VerifyWorkflow;

impl VerifyWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Verify every path, in order.
    ///
    /// # Errors
    /// Only a session configuration failure is returned as `Err`.
    pub async fn run<P: AsRef<Path>>(
        &self,
        session: &mut SigningSession,
        paths: &[P],
    ) -> SigningResult<Vec<FileOutcome<DecodedReply>>> {
        let client = session.client()?;

        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            outcomes.push(self.verify_one(client, path.as_ref()).await);
        }

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        log::info!(
            "Verified {} file(s), {} failed",
            outcomes.len() - failed,
            failed
        );
        Ok(outcomes)
    }

    async fn verify_one(&self, client: &SigningClient, path: &Path) -> FileOutcome<DecodedReply> {
        let input = match InputPath::resolve(path) {
            Ok(input) => input,
            Err(e) => return FileOutcome::failed(path, e),
        };

        log::info!("Verifying {input}");

        let reply = match client.upload(&QueryParams::verify(), input.as_path()).await {
            Ok(reply) => reply,
            Err(e) => return FileOutcome::failed(input.as_path(), e),
        };

        match ResponseDecoder::new(input.as_path()).decode(&reply) {
            Ok(decoded) => FileOutcome::succeeded(input.into_path_buf(), decoded),
            Err(e) => FileOutcome::failed(input.as_path(), e),
        }
    }
}
